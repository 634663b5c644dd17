use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime structural category of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
	/// Zero value carrying no data.
	Invalid,
	/// Boolean.
	Bool,
	/// Signed 8-bit integer.
	I8,
	/// Signed 16-bit integer.
	I16,
	/// Signed 32-bit integer.
	I32,
	/// Signed 64-bit integer.
	I64,
	/// Signed 128-bit integer.
	I128,
	/// Pointer-sized signed integer.
	Isize,
	/// Unsigned 8-bit integer.
	U8,
	/// Unsigned 16-bit integer.
	U16,
	/// Unsigned 32-bit integer.
	U32,
	/// Unsigned 64-bit integer.
	U64,
	/// Unsigned 128-bit integer.
	U128,
	/// Pointer-sized unsigned integer.
	Usize,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// Complex number with 32-bit parts.
	Complex64,
	/// Complex number with 64-bit parts.
	Complex128,
	/// Fixed-length sequence.
	Array,
	/// Buffered queue.
	Chan,
	/// Callable.
	Func,
	/// Dynamically typed slot.
	Interface,
	/// Key/value table.
	Map,
	/// Shared reference to another value.
	Pointer,
	/// Growable sequence.
	Slice,
	/// Text.
	String,
	/// Ordered named fields.
	Struct,
	/// Raw address.
	UnsafePointer,
}

impl Kind {
	/// Dispatcher group for this kind.
	pub fn shape(self) -> Shape {
		match self {
			Self::Invalid => Shape::Invalid,
			Self::Bool => Shape::Bool,
			Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::Isize => Shape::Int,
			Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128 | Self::Usize => Shape::Uint,
			Self::F32 | Self::F64 => Shape::Float,
			Self::Complex64 | Self::Complex128 => Shape::Complex,
			Self::Array => Shape::Array,
			Self::Chan => Shape::Chan,
			Self::Func => Shape::Func,
			Self::Interface => Shape::Interface,
			Self::Map => Shape::Map,
			Self::Pointer => Shape::Pointer,
			Self::Slice => Shape::Slice,
			Self::String => Shape::String,
			Self::Struct => Shape::Struct,
			Self::UnsafePointer => Shape::UnsafePointer,
		}
	}

	/// Lowercase kind label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Invalid => "invalid",
			Self::Bool => "bool",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::I128 => "i128",
			Self::Isize => "isize",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::Usize => "usize",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::Complex64 => "complex64",
			Self::Complex128 => "complex128",
			Self::Array => "array",
			Self::Chan => "chan",
			Self::Func => "func",
			Self::Interface => "interface",
			Self::Map => "map",
			Self::Pointer => "pointer",
			Self::Slice => "slice",
			Self::String => "string",
			Self::Struct => "struct",
			Self::UnsafePointer => "unsafe_pointer",
		}
	}

	/// Type name used for the builtin type of a scalar kind.
	pub(crate) fn builtin_name(self) -> &'static str {
		match self {
			Self::Invalid => "<invalid>",
			Self::Complex64 => "Complex<f32>",
			Self::Complex128 => "Complex<f64>",
			Self::String => "String",
			Self::UnsafePointer => "*const ()",
			other => other.as_str(),
		}
	}

	/// In-memory size of scalar kinds.
	pub(crate) fn builtin_size(self) -> Option<usize> {
		Some(match self {
			Self::Bool | Self::I8 | Self::U8 => 1,
			Self::I16 | Self::U16 => 2,
			Self::I32 | Self::U32 | Self::F32 => 4,
			Self::I64 | Self::U64 | Self::F64 | Self::Complex64 => 8,
			Self::I128 | Self::U128 | Self::Complex128 => 16,
			Self::Isize | Self::Usize | Self::UnsafePointer | Self::Pointer => size_of::<usize>(),
			Self::String => size_of::<String>(),
			_ => return None,
		})
	}

	/// True for kinds whose values carry a shared identity usable for cycle detection.
	pub fn has_identity(self) -> bool {
		matches!(self, Self::Chan | Self::Map | Self::Pointer | Self::Slice)
	}

	/// True for kinds that admit a nil value.
	pub fn is_nilable(self) -> bool {
		matches!(
			self,
			Self::Chan | Self::Func | Self::Interface | Self::Map | Self::Pointer | Self::Slice | Self::UnsafePointer
		)
	}

	/// True for scalar kinds with a builtin type.
	pub fn is_scalar(self) -> bool {
		matches!(
			self.shape(),
			Shape::Bool | Shape::Int | Shape::Uint | Shape::Float | Shape::Complex | Shape::String | Shape::UnsafePointer
		)
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Kind group served by one dispatcher slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
	/// Invalid values.
	Invalid,
	/// Booleans.
	Bool,
	/// Signed integers of every width.
	Int,
	/// Unsigned integers of every width.
	Uint,
	/// Floats of every width.
	Float,
	/// Complex numbers of every width.
	Complex,
	/// Arrays.
	Array,
	/// Channels.
	Chan,
	/// Functions.
	Func,
	/// Interfaces.
	Interface,
	/// Maps.
	Map,
	/// Pointers.
	Pointer,
	/// Slices.
	Slice,
	/// Strings.
	String,
	/// Structs.
	Struct,
	/// Raw addresses.
	UnsafePointer,
}

impl Shape {
	/// Number of dispatcher slots.
	pub const COUNT: usize = 16;

	/// Every shape in slot order.
	pub const ALL: [Shape; Self::COUNT] = [
		Self::Invalid,
		Self::Bool,
		Self::Int,
		Self::Uint,
		Self::Float,
		Self::Complex,
		Self::Array,
		Self::Chan,
		Self::Func,
		Self::Interface,
		Self::Map,
		Self::Pointer,
		Self::Slice,
		Self::String,
		Self::Struct,
		Self::UnsafePointer,
	];

	/// Dispatcher slot index.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Lowercase shape label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Invalid => "invalid",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Uint => "uint",
			Self::Float => "float",
			Self::Complex => "complex",
			Self::Array => "array",
			Self::Chan => "chan",
			Self::Func => "func",
			Self::Interface => "interface",
			Self::Map => "map",
			Self::Pointer => "pointer",
			Self::Slice => "slice",
			Self::String => "string",
			Self::Struct => "struct",
			Self::UnsafePointer => "unsafe_pointer",
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
