use crate::markers::NIL;
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::{Stage, ValueWriter};

/// Replaces interface values by their content before the remaining stages see them.
///
/// Empty interfaces render `<nil>`. The content's type is not known from the slot, so the
/// known-type flag is cleared for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwrapInterface;

impl Stage for UnwrapInterface {
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool {
		if value.kind() != Kind::Interface {
			return next.write_value(st, value);
		}
		let mut inner = value.clone();
		while inner.kind() == Kind::Interface {
			let Some(content) = inner.elem() else {
				st.write_str(NIL);
				return true;
			};
			inner = content;
		}
		let mut st = st.known_type_scope(false);
		next.write_value(&mut st, &inner)
	}
}
