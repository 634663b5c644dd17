use super::usable;
use crate::state::State;
use crate::value::Value;
use crate::writer::ValueWriter;

/// Renders values with an error hook as `=> Error "message"` plus one line per cause.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorWriter;

impl ValueWriter for ErrorWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(hook) = value.ty().methods().error.clone() else {
			return false;
		};
		let report = hook(value);
		write!(st, "=> Error {:?}", report.message);
		let mut st = st.indented();
		for cause in &report.causes {
			st.newline();
			write!(st, "caused by: {cause:?}");
		}
		true
	}
}
