use super::{write_info, write_items};
use crate::config::{ChanConfig, FuncConfig};
use crate::markers::{INACCESSIBLE, NIL};
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::ValueWriter;

/// Renders channels as their buffer annotation.
///
/// With `show_elements` on, buffered values are received and rendered. This empties the channel.
/// A private channel that was not unlocked is left untouched and marked `<inaccessible>`.
#[derive(Debug, Clone, Default)]
pub struct ChanWriter {
	/// Options.
	pub config: ChanConfig,
}

impl ValueWriter for ChanWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Chan {
			return false;
		}
		let Some(chan) = value.as_chan() else {
			st.write_str(NIL);
			return true;
		};
		let config = &self.config;
		let len = config.show_len.then(|| chan.len());
		let cap = config.show_cap.then(|| chan.cap());
		let addr = config.show_addr.then(|| chan.addr());
		let annotated = write_info(st, len, cap, addr);
		if config.show_elements {
			if annotated {
				st.write_char(' ');
			}
			if !value.is_readable() {
				st.write_str(INACCESSIBLE);
				return true;
			}
			write_items(st, chan.drain(), config.max_len, |st, _, item| {
				st.write_child(&item, true);
			});
		} else if !annotated {
			write!(st, "0x{:x}", chan.addr());
		}
		true
	}
}

/// Renders functions by name.
#[derive(Debug, Clone, Default)]
pub struct FuncWriter {
	/// Options.
	pub config: FuncConfig,
}

impl ValueWriter for FuncWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Func {
			return false;
		}
		let Some(func) = value.as_func() else {
			st.write_str(NIL);
			return true;
		};
		if self.config.show_addr {
			write!(st, "(addr=0x{:x}) ", func.addr());
		}
		st.write_str(if func.name().is_empty() { "fn" } else { func.name() });
		true
	}
}
