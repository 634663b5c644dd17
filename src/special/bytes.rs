use std::fmt;

use super::usable;
use crate::config::BytesConfig;
use crate::kind::write_info;
use crate::markers::TRUNCATED;
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::ValueWriter;

/// Renders `u8` slices and arrays as a `hexdump -C` style block.
#[derive(Debug, Clone, Default)]
pub struct BytesWriter {
	/// Options.
	pub config: BytesConfig,
}

impl ValueWriter for BytesWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let kind = value.kind();
		if !matches!(kind, Kind::Slice | Kind::Array) || value.is_nil() {
			return false;
		}
		if value.ty().elem().map(|elem| elem.kind()) != Some(Kind::U8) {
			return false;
		}
		let config = &self.config;
		let len = config.show_len.then(|| value.len());
		let cap = (config.show_cap && kind == Kind::Slice).then(|| value.cap());
		let addr = if config.show_addr { value.addr() } else { None };
		if write_info(st, len, cap, addr) {
			st.write_char(' ');
		}
		let limit = config.max_len.unwrap_or(usize::MAX);
		let data: Vec<u8> = value.elements().iter().take(limit).filter_map(|item| item.as_u128()).map(|b| b as u8).collect();
		if data.is_empty() && value.is_empty() {
			st.write_str("{}");
			return true;
		}
		st.write_char('{');
		{
			let mut st = st.indented();
			if !data.is_empty() {
				st.newline();
				let _ = hexdump(&mut st.indent_writer(), &data);
			}
			if value.len() > data.len() {
				st.newline();
				st.write_str(TRUNCATED);
			}
		}
		st.newline();
		st.write_char('}');
		true
	}
}

/// Write `data` as `hexdump -C` rows separated by newlines, without a trailing newline.
pub(crate) fn hexdump(out: &mut impl fmt::Write, data: &[u8]) -> fmt::Result {
	for (row, chunk) in data.chunks(16).enumerate() {
		if row > 0 {
			out.write_char('\n')?;
		}
		write!(out, "{:08x}  ", row * 16)?;
		for col in 0..16 {
			match chunk.get(col) {
				Some(b) => write!(out, "{b:02x} ")?,
				None => out.write_str("   ")?,
			}
			if col == 7 {
				out.write_char(' ')?;
			}
		}
		out.write_str(" |")?;
		for &b in chunk {
			out.write_char(if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })?;
		}
		out.write_char('|')?;
	}
	Ok(())
}

/// Renders values with a byte-container hook as `=> AsRef<[u8]> ` followed by their bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteContainerWriter;

impl ValueWriter for ByteContainerWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(hook) = value.ty().methods().bytes.clone() else {
			return false;
		};
		let bytes = hook(value);
		let mark = st.mark();
		st.write_str("=> AsRef<[u8]> ");
		if !st.write_child(&bytes, true) {
			st.rollback(mark);
			return false;
		}
		true
	}
}
