//! Shape-indexed dispatch table and the per-shape renderers.

mod chan;
mod map;
mod pointer;
mod scalar;
mod seq;
mod string;
mod structure;

use std::fmt;
use std::sync::Arc;

pub use chan::{ChanWriter, FuncWriter};
pub use map::MapWriter;
pub use pointer::{InterfaceWriter, PointerWriter};
pub use scalar::{BoolWriter, ComplexWriter, FloatWriter, IntWriter, InvalidWriter, UintWriter, UnsafePointerWriter};
pub use seq::{ArrayWriter, SliceWriter};
pub use string::StringWriter;
pub use structure::{FieldFilter, StructWriter};

use crate::config::KindsConfig;
use crate::markers::TRUNCATED;
use crate::state::State;
use crate::value::{Shape, Value};
use crate::writer::ValueWriter;

/// Fixed table of renderers indexed by [`Shape`].
///
/// Lookup is a single array index. An empty slot declines every value of its shape.
#[derive(Clone)]
pub struct KindDispatcher {
	table: [Option<Arc<dyn ValueWriter>>; Shape::COUNT],
}

impl KindDispatcher {
	/// Table with every slot empty.
	pub fn empty() -> Self {
		Self {
			table: std::array::from_fn(|_| None),
		}
	}

	/// Table with the built-in renderer for every shape, minus `config.disabled`.
	pub fn from_config(config: &KindsConfig) -> Self {
		let mut kinds = Self::empty();
		kinds.set(Shape::Invalid, InvalidWriter);
		kinds.set(Shape::Bool, BoolWriter);
		kinds.set(Shape::Int, IntWriter { radix: config.int_radix });
		kinds.set(Shape::Uint, UintWriter { radix: config.uint_radix });
		kinds.set(Shape::Float, FloatWriter { format: config.float });
		kinds.set(Shape::Complex, ComplexWriter { format: config.float });
		kinds.set(Shape::Array, ArrayWriter { config: config.array.clone() });
		kinds.set(Shape::Chan, ChanWriter { config: config.chan.clone() });
		kinds.set(Shape::Func, FuncWriter { config: config.func.clone() });
		kinds.set(Shape::Interface, InterfaceWriter);
		kinds.set(Shape::Map, MapWriter { config: config.map.clone() });
		kinds.set(Shape::Pointer, PointerWriter { config: config.pointer.clone() });
		kinds.set(Shape::Slice, SliceWriter { config: config.slice.clone() });
		kinds.set(Shape::String, StringWriter { config: config.string.clone() });
		kinds.set(Shape::Struct, StructWriter::from(&config.structure));
		kinds.set(Shape::UnsafePointer, UnsafePointerWriter);
		for shape in &config.disabled {
			kinds.clear(*shape);
		}
		kinds
	}

	/// Renderer in the slot for `shape`.
	pub fn get(&self, shape: Shape) -> Option<&Arc<dyn ValueWriter>> {
		self.table[shape.index()].as_ref()
	}

	/// Replace the renderer for `shape`, returning the previous one.
	pub fn set(&mut self, shape: Shape, writer: impl ValueWriter + 'static) -> Option<Arc<dyn ValueWriter>> {
		self.set_shared(shape, Arc::new(writer))
	}

	/// Replace the renderer for `shape` with a shared writer.
	pub fn set_shared(&mut self, shape: Shape, writer: Arc<dyn ValueWriter>) -> Option<Arc<dyn ValueWriter>> {
		self.table[shape.index()].replace(writer)
	}

	/// Empty the slot for `shape`.
	pub fn clear(&mut self, shape: Shape) -> Option<Arc<dyn ValueWriter>> {
		self.table[shape.index()].take()
	}
}

impl Default for KindDispatcher {
	fn default() -> Self {
		Self::from_config(&KindsConfig::default())
	}
}

impl ValueWriter for KindDispatcher {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		match self.get(value.kind().shape()) {
			Some(writer) => writer.write_value(st, value),
			None => false,
		}
	}
}

impl fmt::Debug for KindDispatcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let filled: Vec<Shape> = Shape::ALL.into_iter().filter(|shape| self.get(*shape).is_some()).collect();
		f.debug_struct("KindDispatcher").field("filled", &filled).finish()
	}
}

/// Write `(len=.. cap=.. addr=0x..)` with only the present parts.
///
/// Returns false and writes nothing when every part is absent.
pub(crate) fn write_info(st: &mut State<'_>, len: Option<usize>, cap: Option<usize>, addr: Option<usize>) -> bool {
	if len.is_none() && cap.is_none() && addr.is_none() {
		return false;
	}
	st.write_char('(');
	let mut sep = "";
	if let Some(len) = len {
		write!(st, "len={len}");
		sep = " ";
	}
	if let Some(cap) = cap {
		write!(st, "{sep}cap={cap}");
		sep = " ";
	}
	if let Some(addr) = addr {
		write!(st, "{sep}addr=0x{addr:x}");
	}
	st.write_char(')');
	true
}

/// Write a brace block with one `item,` line per entry, capped at `max_len`.
///
/// Empty input renders `{}`. Items past the cap are replaced by a single truncation line.
pub(crate) fn write_items<T>(
	st: &mut State<'_>,
	items: impl IntoIterator<Item = T>,
	max_len: Option<usize>,
	mut write_item: impl FnMut(&mut State<'_>, usize, T),
) {
	let mut items = items.into_iter().peekable();
	if items.peek().is_none() {
		st.write_str("{}");
		return;
	}
	st.write_char('{');
	{
		let mut st = st.indented();
		let limit = max_len.unwrap_or(usize::MAX);
		for (idx, item) in items.by_ref().take(limit).enumerate() {
			st.newline();
			write_item(&mut *st, idx, item);
			st.write_char(',');
		}
		if items.peek().is_some() {
			st.newline();
			st.write_str(TRUNCATED);
		}
	}
	st.newline();
	st.write_char('}');
}

/// Longest prefix of `text` with at most `max` characters, and whether anything was cut.
pub(crate) fn truncate_chars(text: &str, max: Option<usize>) -> (&str, bool) {
	let Some(max) = max else {
		return (text, false);
	};
	match text.char_indices().nth(max) {
		Some((at, _)) => (&text[..at], true),
		None => (text, false),
	}
}

#[cfg(test)]
mod tests;
