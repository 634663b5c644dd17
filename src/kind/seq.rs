use super::{write_info, write_items};
use crate::config::{ArrayConfig, SliceConfig};
use crate::markers::NIL;
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::ValueWriter;

/// Renders fixed-size arrays.
#[derive(Debug, Clone, Default)]
pub struct ArrayWriter {
	/// Options.
	pub config: ArrayConfig,
}

impl ValueWriter for ArrayWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Array {
			return false;
		}
		let len = self.config.show_len.then(|| value.len());
		if write_info(st, len, None, None) {
			st.write_char(' ');
		}
		write_elements(st, value.elements(), self.config.show_indexes, self.config.max_len);
		true
	}
}

/// Renders slices, with a nil check and a length and capacity annotation.
#[derive(Debug, Clone, Default)]
pub struct SliceWriter {
	/// Options.
	pub config: SliceConfig,
}

impl ValueWriter for SliceWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Slice {
			return false;
		}
		if value.is_nil() {
			st.write_str(NIL);
			return true;
		}
		let config = &self.config;
		let len = config.show_len.then(|| value.len());
		let cap = config.show_cap.then(|| value.cap());
		let addr = if config.show_addr { value.addr() } else { None };
		if write_info(st, len, cap, addr) {
			st.write_char(' ');
		}
		write_elements(st, value.elements(), config.show_indexes, config.max_len);
		true
	}
}

fn write_elements(st: &mut State<'_>, items: Vec<Value>, show_indexes: bool, max_len: Option<usize>) {
	write_items(st, items, max_len, |st, idx, item| {
		if show_indexes {
			write!(st, "{idx}: ");
		}
		st.write_child(&item, true);
	});
}
