use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::error::Error as StdError;
use std::ops::Range;
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, TryLockError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, Timelike, Utc};
use rust_decimal::Decimal;
use serde_json::Value as Json;

use crate::value::{Data, ErrorReport, Field, Kind, Map, Methods, Ptr, Slice, Type, Value, WeakPtr};

/// Conversion of Rust data into the dynamic value model.
pub trait ToValue {
	/// Static type of converted values.
	fn value_type() -> Type;

	/// Convert, sharing reference-counted targets through `cx`.
	fn capture(&self, cx: &mut Capture) -> Value;

	/// Convert with a fresh capture context.
	fn to_value(&self) -> Value {
		self.capture(&mut Capture::new())
	}
}

/// Memo of reference-counted targets seen during one conversion.
///
/// Every `Rc`/`Arc` target becomes exactly one [`Ptr`] cell, so shared and cyclic structure
/// survives conversion. Weak references stay upgradable only while the converted graph itself
/// holds a strong pointer to the same cell.
#[derive(Default)]
pub struct Capture {
	shared: HashMap<(usize, TypeId), Ptr>,
}

impl Capture {
	/// Empty memo.
	pub fn new() -> Self {
		Self::default()
	}

	/// Cell for `target`, created and filled on first sight.
	///
	/// The cell is registered before `fill` runs, so a target reachable from itself resolves to
	/// the same cell instead of recursing.
	pub fn shared<T: ?Sized + 'static>(&mut self, target: *const T, elem: &Type, fill: impl FnOnce(&mut Self) -> Value) -> Ptr {
		let key = (target.cast::<()>() as usize, TypeId::of::<T>());
		if let Some(ptr) = self.shared.get(&key) {
			return ptr.clone();
		}
		let ptr = Ptr::new(elem, Value::invalid());
		self.shared.insert(key, ptr.clone());
		let value = fill(self);
		ptr.set(value);
		ptr
	}

	/// Number of distinct shared targets seen so far.
	pub fn shared_count(&self) -> usize {
		self.shared.len()
	}
}

fn wrapper(kind: Kind, outer: &str, elem: &Type) -> Type {
	Type::generic(kind, &format!("{outer}<{}>", elem.name()), Some(elem), None)
}

fn native_struct<T: Any + Send + Sync>(ty: Type, fields: Vec<Value>, native: T) -> Value {
	Value::structure_unchecked(ty, fields).with_native(native)
}

fn capture_slice<'a, T: ToValue + 'a>(cx: &mut Capture, items: impl Iterator<Item = &'a T>, cap: usize) -> Slice {
	let items = items.map(|item| item.capture(cx)).collect();
	Slice::with_capacity(&T::value_type(), items, cap)
}

fn capture_map<'a, K: ToValue + 'a, V: ToValue + 'a>(cx: &mut Capture, entries: impl Iterator<Item = (&'a K, &'a V)>) -> Map {
	let map = Map::new(&K::value_type(), &V::value_type());
	for (key, value) in entries {
		let key = key.capture(cx);
		let value = value.capture(cx);
		map.append(key, value);
	}
	map
}

macro_rules! scalar_to_value {
	($($t:ty => $ty:ident, $data:ident, $wide:ty;)*) => {
		$(
			impl ToValue for $t {
				fn value_type() -> Type {
					Type::$ty()
				}

				fn capture(&self, _cx: &mut Capture) -> Value {
					Value::from_parts(Type::$ty(), Data::$data(*self as $wide))
				}
			}
		)*
	};
}

scalar_to_value! {
	i8 => i8, Int, i128;
	i16 => i16, Int, i128;
	i32 => i32, Int, i128;
	i64 => i64, Int, i128;
	i128 => i128, Int, i128;
	isize => isize, Int, i128;
	u8 => u8, Uint, u128;
	u16 => u16, Uint, u128;
	u32 => u32, Uint, u128;
	u64 => u64, Uint, u128;
	u128 => u128, Uint, u128;
	usize => usize, Uint, u128;
	f32 => f32, Float, f64;
	f64 => f64, Float, f64;
}

impl ToValue for bool {
	fn value_type() -> Type {
		Type::bool()
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		Value::bool(*self)
	}
}

impl ToValue for char {
	fn value_type() -> Type {
		Type::generic(Kind::String, "char", None, None)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		Value::from_parts(Self::value_type(), Data::String(Arc::from(self.to_string())))
	}
}

impl ToValue for str {
	fn value_type() -> Type {
		Type::string()
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		Value::string(self)
	}
}

impl ToValue for String {
	fn value_type() -> Type {
		Type::string()
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		Value::string(self.as_str())
	}
}

impl<T: ToValue + ?Sized> ToValue for &T {
	fn value_type() -> Type {
		T::value_type()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		(**self).capture(cx)
	}
}

impl<T: ToValue> ToValue for [T] {
	fn value_type() -> Type {
		Type::slice_of(&T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::slice(&capture_slice(cx, self.iter(), self.len()))
	}
}

impl<T: ToValue> ToValue for Vec<T> {
	fn value_type() -> Type {
		Type::slice_of(&T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::slice(&capture_slice(cx, self.iter(), self.capacity()))
	}
}

impl<T: ToValue> ToValue for VecDeque<T> {
	fn value_type() -> Type {
		wrapper(Kind::Slice, "VecDeque", &T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::slice(&capture_slice(cx, self.iter(), self.capacity())).retyped(Self::value_type())
	}
}

impl<T: ToValue> ToValue for BTreeSet<T> {
	fn value_type() -> Type {
		wrapper(Kind::Slice, "BTreeSet", &T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::slice(&capture_slice(cx, self.iter(), self.len())).retyped(Self::value_type())
	}
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
	fn value_type() -> Type {
		Type::array_of(&T::value_type(), N)
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let items = self.iter().map(|item| item.capture(cx)).collect();
		Value::array(&T::value_type(), items)
	}
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
	fn value_type() -> Type {
		Type::map_of(&K::value_type(), &V::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::map(&capture_map(cx, self.iter()))
	}
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
	fn value_type() -> Type {
		let (key, value) = (K::value_type(), V::value_type());
		Type::generic(Kind::Map, &format!("BTreeMap<{}, {}>", key.name(), value.name()), Some(&value), Some(&key))
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::map(&capture_map(cx, self.iter())).retyped(Self::value_type())
	}
}

impl<T: ToValue> ToValue for Option<T> {
	fn value_type() -> Type {
		wrapper(Kind::Interface, "Option", &T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let inner = self.as_ref().map(|inner| Arc::new(inner.capture(cx)));
		Value::from_parts(Self::value_type(), Data::Interface(inner))
	}
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
	fn value_type() -> Type {
		wrapper(Kind::Pointer, "Box", &T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let ptr = Ptr::new(&T::value_type(), (**self).capture(cx));
		Value::from_parts(Self::value_type(), Data::Pointer(Some(ptr)))
	}
}

impl<T: ToValue + ?Sized + 'static> ToValue for Rc<T> {
	fn value_type() -> Type {
		wrapper(Kind::Pointer, "Rc", &T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let ptr = cx.shared(Rc::as_ptr(self), &T::value_type(), |cx| (**self).capture(cx));
		Value::from_parts(Self::value_type(), Data::Pointer(Some(ptr)))
	}
}

impl<T: ToValue + ?Sized + 'static> ToValue for Arc<T> {
	fn value_type() -> Type {
		wrapper(Kind::Pointer, "Arc", &T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let ptr = cx.shared(Arc::as_ptr(self), &T::value_type(), |cx| (**self).capture(cx));
		Value::from_parts(Self::value_type(), Data::Pointer(Some(ptr)))
	}
}

fn weak_type(elem: &Type) -> Type {
	Type::opaque(&format!("Weak<{}>", elem.name()), &[("ptr", Type::usize())], Methods::default)
}

fn downgrade_captured(strong: Value, elem: &Type) -> WeakPtr {
	match strong.as_ptr() {
		Some(ptr) => ptr.downgrade(),
		None => WeakPtr::dangling(elem),
	}
}

impl<T: ToValue + ?Sized + 'static> ToValue for rc::Weak<T> {
	fn value_type() -> Type {
		weak_type(&T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let elem = T::value_type();
		let weak = match self.upgrade() {
			Some(strong) => downgrade_captured(strong.capture(cx), &elem),
			None => WeakPtr::dangling(&elem),
		};
		Value::weak(&weak)
	}
}

impl<T: ToValue + ?Sized + 'static> ToValue for sync::Weak<T> {
	fn value_type() -> Type {
		weak_type(&T::value_type())
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let elem = T::value_type();
		let weak = match self.upgrade() {
			Some(strong) => downgrade_captured(strong.capture(cx), &elem),
			None => WeakPtr::dangling(&elem),
		};
		Value::weak(&weak)
	}
}

impl<T: ToValue + ?Sized> ToValue for RefCell<T> {
	fn value_type() -> Type {
		T::value_type()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		match self.try_borrow() {
			Ok(inner) => inner.capture(cx),
			Err(_) => Value::invalid(),
		}
	}
}

impl<T: ToValue + Copy> ToValue for Cell<T> {
	fn value_type() -> Type {
		T::value_type()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		self.get().capture(cx)
	}
}

impl<T: ToValue + ?Sized> ToValue for Mutex<T> {
	fn value_type() -> Type {
		T::value_type()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		match self.try_lock() {
			Ok(inner) => inner.capture(cx),
			Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().capture(cx),
			Err(TryLockError::WouldBlock) => Value::invalid(),
		}
	}
}

impl<T: ToValue + ?Sized> ToValue for parking_lot::Mutex<T> {
	fn value_type() -> Type {
		T::value_type()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		match self.try_lock() {
			Some(inner) => inner.capture(cx),
			None => Value::invalid(),
		}
	}
}

impl<T: ToValue + ?Sized> ToValue for parking_lot::RwLock<T> {
	fn value_type() -> Type {
		T::value_type()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		match self.try_read() {
			Some(inner) => inner.capture(cx),
			None => Value::invalid(),
		}
	}
}

impl ToValue for () {
	fn value_type() -> Type {
		Type::tuple(&[])
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		Value::structure_unchecked(Self::value_type(), Vec::new())
	}
}

macro_rules! tuple_to_value {
	($($name:ident $idx:tt),+) => {
		impl<$($name: ToValue),+> ToValue for ($($name,)+) {
			fn value_type() -> Type {
				Type::tuple(&[$($name::value_type()),+])
			}

			fn capture(&self, cx: &mut Capture) -> Value {
				Value::structure_unchecked(Self::value_type(), vec![$(self.$idx.capture(cx)),+])
			}
		}
	};
}

tuple_to_value!(A 0);
tuple_to_value!(A 0, B 1);
tuple_to_value!(A 0, B 1, C 2);
tuple_to_value!(A 0, B 1, C 2, D 3);
tuple_to_value!(A 0, B 1, C 2, D 3, E 4);
tuple_to_value!(A 0, B 1, C 2, D 3, E 4, F 5);

impl ToValue for Duration {
	fn value_type() -> Type {
		Type::opaque("Duration", &[("secs", Type::u64()), ("nanos", Type::u32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![self.as_secs().to_value(), self.subsec_nanos().to_value()], *self)
	}
}

impl ToValue for SystemTime {
	fn value_type() -> Type {
		Type::opaque("SystemTime", &[("secs", Type::i64()), ("nanos", Type::u32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		let (secs, nanos) = match self.duration_since(UNIX_EPOCH) {
			Ok(since) => (since.as_secs() as i64, since.subsec_nanos()),
			Err(err) => (-(err.duration().as_secs() as i64), err.duration().subsec_nanos()),
		};
		native_struct(Self::value_type(), vec![secs.to_value(), nanos.to_value()], *self)
	}
}

macro_rules! datetime_to_value {
	($($tz:ty => $name:literal;)*) => {
		$(
			impl ToValue for DateTime<$tz> {
				fn value_type() -> Type {
					Type::opaque($name, &[("secs", Type::i64()), ("nanos", Type::u32()), ("offset", Type::i32())], Methods::default)
				}

				fn capture(&self, _cx: &mut Capture) -> Value {
					let fields = vec![
						self.timestamp().to_value(),
						self.timestamp_subsec_nanos().to_value(),
						self.offset().fix().local_minus_utc().to_value(),
					];
					native_struct(Self::value_type(), fields, *self)
				}
			}
		)*
	};
}

datetime_to_value! {
	Utc => "DateTime<Utc>";
	FixedOffset => "DateTime<FixedOffset>";
	Local => "DateTime<Local>";
}

impl ToValue for NaiveDateTime {
	fn value_type() -> Type {
		Type::opaque("NaiveDateTime", &[("secs", Type::i64()), ("nanos", Type::u32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		let utc = self.and_utc();
		native_struct(Self::value_type(), vec![utc.timestamp().to_value(), utc.timestamp_subsec_nanos().to_value()], *self)
	}
}

impl ToValue for NaiveDate {
	fn value_type() -> Type {
		Type::opaque("NaiveDate", &[("days", Type::i32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![self.num_days_from_ce().to_value()], *self)
	}
}

impl ToValue for NaiveTime {
	fn value_type() -> Type {
		Type::opaque("NaiveTime", &[("secs", Type::u32()), ("nanos", Type::u32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(
			Self::value_type(),
			vec![self.num_seconds_from_midnight().to_value(), self.nanosecond().to_value()],
			*self,
		)
	}
}

impl ToValue for TimeDelta {
	fn value_type() -> Type {
		Type::opaque("TimeDelta", &[("secs", Type::i64()), ("nanos", Type::i32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![self.num_seconds().to_value(), self.subsec_nanos().to_value()], *self)
	}
}

impl ToValue for Decimal {
	fn value_type() -> Type {
		Type::opaque("Decimal", &[("mantissa", Type::i128()), ("scale", Type::u32())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![self.mantissa().to_value(), self.scale().to_value()], *self)
	}
}

fn byte_container_methods() -> Methods {
	Methods {
		bytes: Some(Arc::new(|value: &Value| value.field(0).and_then(|data| data.unlock()).unwrap_or_default())),
		..Methods::default()
	}
}

impl ToValue for bytes::Bytes {
	fn value_type() -> Type {
		Type::opaque("Bytes", &[("data", Type::slice_of(&Type::u8()))], byte_container_methods)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![Value::bytes(self)], self.clone())
	}
}

impl ToValue for bytes::BytesMut {
	fn value_type() -> Type {
		Type::opaque("BytesMut", &[("data", Type::slice_of(&Type::u8()))], byte_container_methods)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![Value::bytes_with_capacity(self, self.capacity())], self.clone())
	}
}

impl ToValue for Json {
	fn value_type() -> Type {
		Type::interface("Json")
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		let inner = match self {
			Json::Null => None,
			Json::Bool(v) => Some(v.capture(cx)),
			Json::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
				(Some(v), _) => v.capture(cx),
				(None, Some(v)) => v.capture(cx),
				(None, None) => n.as_f64().unwrap_or(f64::NAN).capture(cx),
			}),
			Json::String(v) => Some(v.capture(cx)),
			Json::Array(items) => Some(items.capture(cx)),
			Json::Object(map) => Some(map.capture(cx)),
		};
		Value::from_parts(Self::value_type(), Data::Interface(inner.map(Arc::new)))
	}
}

impl ToValue for serde_json::Map<String, Json> {
	fn value_type() -> Type {
		let (key, value) = (Type::string(), Json::value_type());
		Type::generic(Kind::Map, "Map<String, dyn Json>", Some(&value), Some(&key))
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::map(&capture_map(cx, self.iter())).retyped(Self::value_type())
	}
}

macro_rules! range_to_value {
	($($t:ty => $read:ident, $data:ident;)*) => {
		$(
			impl ToValue for Range<$t> {
				fn value_type() -> Type {
					let elem = <$t>::value_type();
					let fields = [Field::public("start", &elem), Field::public("end", &elem)];
					Type::record(&format!("Range<{}>", elem.name()), &fields, || Methods {
						iter: Some(Arc::new(move |value: &Value| {
							let bound = |idx| value.field(idx).and_then(|field| field.$read()).unwrap_or_default();
							let item = elem.clone();
							Box::new((bound(0)..bound(1)).map(move |n| Value::from_parts(item.clone(), Data::$data(n)))) as Box<dyn Iterator<Item = Value>>
						})),
						..Methods::default()
					})
				}

				fn capture(&self, cx: &mut Capture) -> Value {
					Value::structure_unchecked(Self::value_type(), vec![self.start.capture(cx), self.end.capture(cx)])
				}
			}
		)*
	};
}

range_to_value! {
	i32 => as_i128, Int;
	i64 => as_i128, Int;
	u32 => as_u128, Uint;
	u64 => as_u128, Uint;
	usize => as_u128, Uint;
}

impl ToValue for Type {
	fn value_type() -> Type {
		Type::opaque("Type", &[("id", Type::u64())], Methods::default)
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		native_struct(Self::value_type(), vec![self.id().to_value()], self.clone())
	}
}

impl ToValue for Value {
	fn value_type() -> Type {
		Type::interface("Any")
	}

	fn capture(&self, _cx: &mut Capture) -> Value {
		Value::from_parts(Self::value_type(), Data::Interface(Some(Arc::new(self.clone()))))
	}
}

fn short_type_name<T: ?Sized>() -> String {
	let full = std::any::type_name::<T>();
	let mut out = String::with_capacity(full.len());
	let mut segment = String::new();
	for ch in full.chars() {
		if ch.is_alphanumeric() || ch == '_' || ch == ':' {
			segment.push(ch);
			continue;
		}
		out.push_str(segment.rsplit("::").next().unwrap_or_default());
		segment.clear();
		out.push(ch);
	}
	out.push_str(segment.rsplit("::").next().unwrap_or_default());
	out
}

type SharedError = Arc<dyn StdError + Send + Sync>;

impl Value {
	/// Error value reporting `err`'s message and `source()` chain.
	pub fn from_error<E: StdError + Send + Sync + 'static>(err: E) -> Value {
		let ty = Type::opaque(&short_type_name::<E>(), &[("message", Type::string())], || Methods {
			error: Some(Arc::new(|value: &Value| {
				value
					.native::<SharedError>()
					.map(|err| ErrorReport::from_error(err.as_ref()))
					.unwrap_or_default()
			})),
			..Methods::default()
		});
		let message = Value::string(err.to_string());
		let shared: SharedError = Arc::new(err);
		native_struct(ty, vec![message], shared)
	}
}
