use crate::config::{FloatFormat, Radix};
use crate::markers::{INVALID, NIL};
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::ValueWriter;

/// Renders the zero value.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvalidWriter;

impl ValueWriter for InvalidWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.is_valid() {
			return false;
		}
		st.write_str(INVALID);
		true
	}
}

/// Renders `true` or `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolWriter;

impl ValueWriter for BoolWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let Some(v) = value.as_bool() else {
			return false;
		};
		st.write_str(if v { "true" } else { "false" });
		true
	}
}

/// Renders signed integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntWriter {
	/// Output radix.
	pub radix: Radix,
}

impl ValueWriter for IntWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let Some(v) = value.as_i128() else {
			return false;
		};
		if v < 0 {
			st.write_char('-');
		}
		write_magnitude(st, self.radix, v.unsigned_abs());
		true
	}
}

/// Renders unsigned integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UintWriter {
	/// Output radix.
	pub radix: Radix,
}

impl ValueWriter for UintWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let Some(v) = value.as_u128() else {
			return false;
		};
		write_magnitude(st, self.radix, v);
		true
	}
}

fn write_magnitude(st: &mut State<'_>, radix: Radix, v: u128) {
	match radix {
		Radix::Decimal => write!(st, "{v}"),
		Radix::Hex => write!(st, "{v:#x}"),
		Radix::Octal => write!(st, "{v:#o}"),
		Radix::Binary => write!(st, "{v:#b}"),
	}
}

/// Renders floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatWriter {
	/// Number format.
	pub format: FloatFormat,
}

impl ValueWriter for FloatWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let Some(v) = value.as_f64() else {
			return false;
		};
		st.write_str(&format_float(self.format, v, value.kind() == Kind::F32));
		true
	}
}

/// Renders complex numbers as `(re+imi)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexWriter {
	/// Format of both parts.
	pub format: FloatFormat,
}

impl ValueWriter for ComplexWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let Some((re, im)) = value.as_complex() else {
			return false;
		};
		let single = value.kind() == Kind::Complex64;
		let re = format_float(self.format, re, single);
		let im = format_float(self.format, im, single);
		let sign = if im.starts_with('-') { "" } else { "+" };
		write!(st, "({re}{sign}{im}i)");
		true
	}
}

/// Renders raw addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsafePointerWriter;

impl ValueWriter for UnsafePointerWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::UnsafePointer {
			return false;
		}
		match value.addr() {
			Some(addr) if addr != 0 => write!(st, "0x{addr:x}"),
			_ => st.write_str(NIL),
		}
		true
	}
}

/// Format `v`; `single` selects `f32` precision for the shortest form.
fn format_float(format: FloatFormat, v: f64, single: bool) -> String {
	match format {
		FloatFormat::Shortest if single => format!("{:?}", v as f32),
		FloatFormat::Shortest => format!("{v:?}"),
		FloatFormat::Fixed(precision) => format!("{v:.precision$}"),
		FloatFormat::Exponent(precision) => format!("{v:.precision$e}"),
	}
}
