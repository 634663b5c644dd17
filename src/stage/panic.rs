use std::fmt::Write as _;

use tracing::debug;

use crate::markers::PANIC;
use crate::panics::{Caught, contain};
use crate::state::State;
use crate::value::Value;
use crate::writer::{Stage, ValueWriter};

/// Converts a panic in the wrapped writers into a `<panic>: message` marker.
///
/// Output written before the panic is kept. Indentation, depth, and visit changes unwind through
/// their scope guards.
#[derive(Debug, Clone, Default)]
pub struct PanicGuard {
	/// Append an indented backtrace below the marker.
	pub show_trace: bool,
}

impl Stage for PanicGuard {
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool {
		match contain(self.show_trace, || next.write_value(st, value)) {
			Ok(handled) => handled,
			Err(caught) => {
				debug!(type_name = value.ty().name(), message = %caught.message, "contained panic while rendering");
				write_caught(st, &caught);
				true
			}
		}
	}
}

/// Write the marker for a contained panic.
pub(crate) fn write_caught(st: &mut State<'_>, caught: &Caught) {
	st.write_str(PANIC);
	st.write_str(": ");
	let _ = st.indent_writer().write_str(&caught.message);
	if let Some(trace) = &caught.trace {
		let mut st = st.indented();
		st.newline();
		let _ = st.indent_writer().write_str(trace.trim_end());
	}
}
