use super::usable;
use crate::markers::NIL;
use crate::state::State;
use crate::value::{Handle, Value, WeakPtr};
use crate::writer::ValueWriter;

/// Renders weak references as `=> upgrade() ` followed by the live pointer, or `<nil>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakWriter;

impl ValueWriter for WeakWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(weak) = value.native::<WeakPtr>() else {
			return false;
		};
		st.write_str("=> upgrade() ");
		match weak.upgrade() {
			Some(ptr) => {
				st.write_child(&Value::pointer(&ptr), true);
			}
			None => st.write_str(NIL),
		}
		true
	}
}

/// Renders unique handles as `=> get() ` followed by the canonical value.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueWriter;

impl ValueWriter for UniqueWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(handle) = value.native::<Handle>() else {
			return false;
		};
		st.write_str("=> get() ");
		st.write_child(&handle.get(), true);
		true
	}
}
