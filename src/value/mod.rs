//! Dynamic value model: runtime types, values, and conversions from Rust data.

mod capture;
mod convert;
mod handles;
mod key;
mod kind;
mod types;
mod unique;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use capture::capture;
pub use convert::{Capture, ToValue};
pub use handles::{Chan, Func, Map, Ptr, Slice, WeakPtr};
pub(crate) use key::{ValueKey, identity_of};
pub use kind::{Kind, Shape};
pub use types::{BytesHook, ErrorHook, ErrorReport, Field, IterHook, Methods, PairsHook, TextHook, Type, TypeBuilder};
pub use unique::Handle;

use crate::error::{PrettyError, Result};

pub(crate) type Native = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Data {
	Invalid,
	Bool(bool),
	Int(i128),
	Uint(u128),
	Float(f64),
	Complex(f64, f64),
	String(Arc<str>),
	Array(Arc<[Value]>),
	Slice(Option<Slice>),
	Map(Option<Map>),
	Struct(Arc<[Value]>),
	Pointer(Option<Ptr>),
	Interface(Option<Arc<Value>>),
	Chan(Option<Chan>),
	Func(Option<Func>),
	UnsafePointer(usize),
}

/// One typed runtime value.
///
/// Values are cheap to clone. Composite payloads behind [`Ptr`], [`Slice`], [`Map`], and [`Chan`]
/// are shared, so clones alias the same storage and graphs may be cyclic.
#[derive(Clone)]
pub struct Value {
	ty: Type,
	data: Data,
	readable: bool,
	native: Option<Native>,
}

fn expect_shape(ty: &Type, shape: Shape) -> Result<()> {
	if ty.kind().shape() == shape {
		return Ok(());
	}
	Err(PrettyError::KindMismatch {
		expected: shape.to_string(),
		got: ty.kind().to_string(),
	})
}

impl Value {
	pub(crate) fn from_parts(ty: Type, data: Data) -> Self {
		Self {
			ty,
			data,
			readable: true,
			native: None,
		}
	}

	/// The zero value.
	pub fn invalid() -> Self {
		Self::from_parts(Type::invalid(), Data::Invalid)
	}

	/// `bool` value.
	pub fn bool(v: bool) -> Self {
		Self::from_parts(Type::bool(), Data::Bool(v))
	}

	/// Signed integer of any signed integer type.
	pub fn int(ty: &Type, v: i128) -> Result<Self> {
		expect_shape(ty, Shape::Int)?;
		Ok(Self::from_parts(ty.clone(), Data::Int(v)))
	}

	/// Unsigned integer of any unsigned integer type.
	pub fn uint(ty: &Type, v: u128) -> Result<Self> {
		expect_shape(ty, Shape::Uint)?;
		Ok(Self::from_parts(ty.clone(), Data::Uint(v)))
	}

	/// Float of any float type.
	pub fn float(ty: &Type, v: f64) -> Result<Self> {
		expect_shape(ty, Shape::Float)?;
		Ok(Self::from_parts(ty.clone(), Data::Float(v)))
	}

	/// Complex number of any complex type.
	pub fn complex(ty: &Type, re: f64, im: f64) -> Result<Self> {
		expect_shape(ty, Shape::Complex)?;
		Ok(Self::from_parts(ty.clone(), Data::Complex(re, im)))
	}

	/// `String` value.
	pub fn string(s: impl Into<Arc<str>>) -> Self {
		Self::from_parts(Type::string(), Data::String(s.into()))
	}

	/// Fixed-length array of `elem` values.
	pub fn array(elem: &Type, items: Vec<Value>) -> Self {
		Self::from_parts(Type::array_of(elem, items.len()), Data::Array(items.into()))
	}

	/// Slice value aliasing `slice`.
	pub fn slice(slice: &Slice) -> Self {
		Self::from_parts(Type::slice_of(slice.elem()), Data::Slice(Some(slice.clone())))
	}

	/// Nil slice.
	pub fn nil_slice(elem: &Type) -> Self {
		Self::from_parts(Type::slice_of(elem), Data::Slice(None))
	}

	/// `Vec<u8>` holding a copy of `data`.
	pub fn bytes(data: &[u8]) -> Self {
		Self::bytes_with_capacity(data, data.len())
	}

	/// `Vec<u8>` holding a copy of `data` with an explicit capacity.
	pub fn bytes_with_capacity(data: &[u8], cap: usize) -> Self {
		let u8_ty = Type::u8();
		let items = data.iter().map(|b| Self::from_parts(u8_ty.clone(), Data::Uint(u128::from(*b)))).collect();
		Self::slice(&Slice::with_capacity(&u8_ty, items, cap))
	}

	/// Map value aliasing `map`.
	pub fn map(map: &Map) -> Self {
		Self::from_parts(Type::map_of(map.key_type(), map.value_type()), Data::Map(Some(map.clone())))
	}

	/// Nil map.
	pub fn nil_map(key: &Type, value: &Type) -> Self {
		Self::from_parts(Type::map_of(key, value), Data::Map(None))
	}

	/// Struct value; `fields` must match the declared field count.
	pub fn structure(ty: &Type, fields: Vec<Value>) -> Result<Self> {
		expect_shape(ty, Shape::Struct)?;
		if ty.fields().len() != fields.len() {
			return Err(PrettyError::FieldCount {
				type_name: ty.name().to_owned(),
				expected: ty.fields().len(),
				got: fields.len(),
			});
		}
		Ok(Self::from_parts(ty.clone(), Data::Struct(fields.into())))
	}

	pub(crate) fn structure_unchecked(ty: Type, fields: Vec<Value>) -> Self {
		Self::from_parts(ty, Data::Struct(fields.into()))
	}

	/// Pointer value aliasing `ptr`.
	pub fn pointer(ptr: &Ptr) -> Self {
		Self::from_parts(Type::pointer_to(ptr.elem()), Data::Pointer(Some(ptr.clone())))
	}

	/// Nil pointer.
	pub fn nil_pointer(elem: &Type) -> Self {
		Self::from_parts(Type::pointer_to(elem), Data::Pointer(None))
	}

	/// Interface slot of type `iface` holding `inner`.
	pub fn interface(iface: &Type, inner: Value) -> Result<Self> {
		expect_shape(iface, Shape::Interface)?;
		Ok(Self::from_parts(iface.clone(), Data::Interface(Some(Arc::new(inner)))))
	}

	/// Empty interface slot.
	pub fn nil_interface(iface: &Type) -> Result<Self> {
		expect_shape(iface, Shape::Interface)?;
		Ok(Self::from_parts(iface.clone(), Data::Interface(None)))
	}

	/// Channel value aliasing `chan`.
	pub fn chan(chan: &Chan) -> Self {
		Self::from_parts(Type::chan_of(chan.elem()), Data::Chan(Some(chan.clone())))
	}

	/// Nil channel.
	pub fn nil_chan(elem: &Type) -> Self {
		Self::from_parts(Type::chan_of(elem), Data::Chan(None))
	}

	/// Function value.
	pub fn func(func: &Func) -> Self {
		Self::from_parts(func.sig().clone(), Data::Func(Some(func.clone())))
	}

	/// Nil function of signature `sig`.
	pub fn nil_func(sig: &Type) -> Result<Self> {
		expect_shape(sig, Shape::Func)?;
		Ok(Self::from_parts(sig.clone(), Data::Func(None)))
	}

	/// Raw address; zero is nil.
	pub fn unsafe_pointer(addr: usize) -> Self {
		Self::from_parts(Type::unsafe_pointer(), Data::UnsafePointer(addr))
	}

	/// `Weak<T>` value backed by `weak`.
	pub fn weak(weak: &WeakPtr) -> Self {
		let ty = Type::opaque(&format!("Weak<{}>", weak.elem().name()), &[("ptr", Type::usize())], Methods::default);
		let addr = weak.upgrade().map_or(0, |ptr| ptr.addr());
		let fields = [Self::from_parts(Type::usize(), Data::Uint(addr as u128))];
		Self::from_parts(ty, Data::Struct(Arc::from(fields))).with_native(weak.clone())
	}

	/// Re-type the value as `ty`, which must share its kind (and field count or length).
	pub fn typed(self, ty: &Type) -> Result<Self> {
		if ty.kind() != self.kind() {
			return Err(PrettyError::KindMismatch {
				expected: ty.kind().to_string(),
				got: self.kind().to_string(),
			});
		}
		if ty.kind() == Kind::Struct && ty.fields().len() != self.len() {
			return Err(PrettyError::FieldCount {
				type_name: ty.name().to_owned(),
				expected: ty.fields().len(),
				got: self.len(),
			});
		}
		if let Some(len) = ty.len()
			&& len != self.len()
		{
			return Err(PrettyError::KindMismatch {
				expected: ty.name().to_owned(),
				got: self.ty.name().to_owned(),
			});
		}
		Ok(self.retyped(ty.clone()))
	}

	pub(crate) fn retyped(mut self, ty: Type) -> Self {
		self.ty = ty;
		self
	}

	/// Attach a native Rust payload consulted by specialized writers.
	pub fn with_native<T: Any + Send + Sync>(mut self, native: T) -> Self {
		self.native = Some(Arc::new(native));
		self
	}

	/// Native payload of type `T`, if attached.
	pub fn native<T: Any>(&self) -> Option<&T> {
		self.native.as_deref()?.downcast_ref::<T>()
	}

	/// Mark the value as not readable, as if reached through a private field.
	pub fn into_unreadable(self) -> Self {
		self.with_readable(false)
	}

	pub(crate) fn with_readable(mut self, readable: bool) -> Self {
		self.readable = readable;
		self
	}

	/// Readable copy of an unreadable value; `None` when there is nothing to unlock.
	pub fn unlock(&self) -> Option<Self> {
		self.is_valid().then(|| self.clone().with_readable(true))
	}

	fn child(&self, value: Value) -> Value {
		let readable = self.readable && value.readable;
		value.with_readable(readable)
	}

	pub(crate) fn data(&self) -> &Data {
		&self.data
	}

	/// Runtime type.
	pub fn ty(&self) -> &Type {
		&self.ty
	}

	/// Structural kind.
	pub fn kind(&self) -> Kind {
		self.ty.kind()
	}

	/// False only for the zero value.
	pub fn is_valid(&self) -> bool {
		!matches!(self.data, Data::Invalid)
	}

	/// False for values reached through private fields.
	pub fn is_readable(&self) -> bool {
		self.readable
	}

	/// True for nil slices, maps, pointers, interfaces, channels, functions, and null raw addresses.
	pub fn is_nil(&self) -> bool {
		matches!(
			self.data,
			Data::Slice(None) | Data::Map(None) | Data::Pointer(None) | Data::Interface(None) | Data::Chan(None) | Data::Func(None) | Data::UnsafePointer(0)
		)
	}

	/// Element, field, entry, or byte count.
	pub fn len(&self) -> usize {
		match &self.data {
			Data::Array(items) | Data::Struct(items) => items.len(),
			Data::Slice(Some(slice)) => slice.len(),
			Data::Map(Some(map)) => map.len(),
			Data::Chan(Some(chan)) => chan.len(),
			Data::String(s) => s.len(),
			_ => 0,
		}
	}

	/// True when [`Value::len`] is zero.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Capacity of slices and channels, length of arrays.
	pub fn cap(&self) -> usize {
		match &self.data {
			Data::Array(items) => items.len(),
			Data::Slice(Some(slice)) => slice.cap(),
			Data::Chan(Some(chan)) => chan.cap(),
			_ => 0,
		}
	}

	/// Identity address of reference-bearing values.
	pub fn addr(&self) -> Option<usize> {
		match &self.data {
			Data::Slice(Some(slice)) => Some(slice.addr()),
			Data::Map(Some(map)) => Some(map.addr()),
			Data::Pointer(Some(ptr)) => Some(ptr.addr()),
			Data::Chan(Some(chan)) => Some(chan.addr()),
			Data::Func(Some(func)) => Some(func.addr()),
			Data::UnsafePointer(addr) if *addr != 0 => Some(*addr),
			_ => None,
		}
	}

	/// Array or slice element.
	pub fn index(&self, idx: usize) -> Option<Value> {
		let item = match &self.data {
			Data::Array(items) => items.get(idx).cloned(),
			Data::Slice(Some(slice)) => slice.get(idx),
			_ => None,
		}?;
		Some(self.child(item))
	}

	/// Snapshot of array or slice elements.
	pub fn elements(&self) -> Vec<Value> {
		let items = match &self.data {
			Data::Array(items) => items.to_vec(),
			Data::Slice(Some(slice)) => slice.items(),
			_ => Vec::new(),
		};
		items.into_iter().map(|item| self.child(item)).collect()
	}

	/// Struct field value; private fields come back unreadable.
	pub fn field(&self, idx: usize) -> Option<Value> {
		let Data::Struct(items) = &self.data else {
			return None;
		};
		let value = items.get(idx)?.clone();
		let public = self.ty.field(idx).is_some_and(|field| field.is_public());
		let readable = self.readable && public && value.readable;
		Some(value.with_readable(readable))
	}

	/// Struct field value by name.
	pub fn field_by_name(&self, name: &str) -> Option<Value> {
		self.field(self.ty.field_index(name)?)
	}

	/// Snapshot of map entries in enumeration order.
	pub fn entries(&self) -> Vec<(Value, Value)> {
		let Data::Map(Some(map)) = &self.data else {
			return Vec::new();
		};
		map.entries().into_iter().map(|(key, value)| (self.child(key), self.child(value))).collect()
	}

	/// Pointee of a pointer or content of an interface.
	pub fn elem(&self) -> Option<Value> {
		let inner = match &self.data {
			Data::Pointer(Some(ptr)) => ptr.get(),
			Data::Interface(Some(inner)) => Value::clone(inner),
			_ => return None,
		};
		Some(self.child(inner))
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self.data {
			Data::Bool(v) => Some(v),
			_ => None,
		}
	}

	/// Signed integer payload.
	pub fn as_i128(&self) -> Option<i128> {
		match self.data {
			Data::Int(v) => Some(v),
			_ => None,
		}
	}

	/// Unsigned integer payload.
	pub fn as_u128(&self) -> Option<u128> {
		match self.data {
			Data::Uint(v) => Some(v),
			_ => None,
		}
	}

	/// Float payload.
	pub fn as_f64(&self) -> Option<f64> {
		match self.data {
			Data::Float(v) => Some(v),
			_ => None,
		}
	}

	/// Complex payload as `(re, im)`.
	pub fn as_complex(&self) -> Option<(f64, f64)> {
		match self.data {
			Data::Complex(re, im) => Some((re, im)),
			_ => None,
		}
	}

	/// String payload.
	pub fn as_str(&self) -> Option<&str> {
		match &self.data {
			Data::String(s) => Some(s),
			_ => None,
		}
	}

	/// Pointer handle.
	pub fn as_ptr(&self) -> Option<&Ptr> {
		match &self.data {
			Data::Pointer(ptr) => ptr.as_ref(),
			_ => None,
		}
	}

	/// Slice handle.
	pub fn as_slice(&self) -> Option<&Slice> {
		match &self.data {
			Data::Slice(slice) => slice.as_ref(),
			_ => None,
		}
	}

	/// Map handle.
	pub fn as_map(&self) -> Option<&Map> {
		match &self.data {
			Data::Map(map) => map.as_ref(),
			_ => None,
		}
	}

	/// Channel handle.
	pub fn as_chan(&self) -> Option<&Chan> {
		match &self.data {
			Data::Chan(chan) => chan.as_ref(),
			_ => None,
		}
	}

	/// Function handle.
	pub fn as_func(&self) -> Option<&Func> {
		match &self.data {
			Data::Func(func) => func.as_ref(),
			_ => None,
		}
	}
}

impl Default for Value {
	fn default() -> Self {
		Self::invalid()
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&crate::formatter(self), f)
	}
}

#[cfg(test)]
mod tests;
