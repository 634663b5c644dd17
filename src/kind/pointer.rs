use crate::config::PointerConfig;
use crate::markers::NIL;
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::ValueWriter;

/// Renders pointers as `&` followed by the pointee.
#[derive(Debug, Clone, Default)]
pub struct PointerWriter {
	/// Options.
	pub config: PointerConfig,
}

impl ValueWriter for PointerWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Pointer {
			return false;
		}
		let Some(pointee) = value.elem() else {
			st.write_str(NIL);
			return true;
		};
		if self.config.show_addr
			&& let Some(addr) = value.addr()
		{
			write!(st, "(addr=0x{addr:x}) ");
		}
		st.write_char('&');
		st.write_child(&pointee, true);
		true
	}
}

/// Renders interface content when unwrapping is not done by a stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceWriter;

impl ValueWriter for InterfaceWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Interface {
			return false;
		}
		match value.elem() {
			Some(inner) => {
				st.write_child(&inner, false);
			}
			None => st.write_str(NIL),
		}
		true
	}
}
