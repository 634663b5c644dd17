use std::sync::Arc;

use serde::{Serialize, ser};

use crate::error::{PrettyError, Result};
use crate::value::{Data, Field, Kind, Map, Methods, Slice, ToValue, Type, Value};

/// Capture any `Serialize` value as a dynamic [`Value`].
///
/// Structs keep their names and field order, enum variants become structs named `Enum::Variant`,
/// sequences and maps take the element type of their contents, and mixed contents are wrapped in
/// `dyn Serialize` slots.
pub fn capture<T: ?Sized + Serialize>(value: &T) -> Result<Value> {
	value.serialize(ValueSerializer)
}

fn dyn_serialize() -> Type {
	Type::interface("Serialize")
}

fn option_type() -> Type {
	Type::generic(Kind::Interface, "Option<_>", None, None)
}

fn record(name: &str, fields: &[Field]) -> Type {
	Type::record(name, fields, Methods::default)
}

fn variant_name(name: &str, variant: &str) -> String {
	format!("{name}::{variant}")
}

/// Common element type of `items`, wrapping them in `dyn Serialize` slots when they differ.
fn unify(items: Vec<Value>) -> (Type, Vec<Value>) {
	if let Some(first) = items.first()
		&& items.iter().all(|item| item.ty() == first.ty())
	{
		return (first.ty().clone(), items);
	}
	let iface = dyn_serialize();
	let wrapped = items
		.into_iter()
		.map(|item| Value::from_parts(iface.clone(), Data::Interface(Some(Arc::new(item)))))
		.collect();
	(iface, wrapped)
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
	type Ok = Value;
	type Error = PrettyError;

	type SerializeSeq = SeqCapture;
	type SerializeTuple = SeqCapture;
	type SerializeTupleStruct = FieldsCapture;
	type SerializeTupleVariant = FieldsCapture;
	type SerializeMap = MapCapture;
	type SerializeStruct = FieldsCapture;
	type SerializeStructVariant = FieldsCapture;

	fn serialize_bool(self, v: bool) -> Result<Value> {
		Ok(Value::bool(v))
	}

	fn serialize_i8(self, v: i8) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_i16(self, v: i16) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_i32(self, v: i32) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_i64(self, v: i64) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_i128(self, v: i128) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_u8(self, v: u8) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_u16(self, v: u16) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_u32(self, v: u32) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_u64(self, v: u64) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_u128(self, v: u128) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_f32(self, v: f32) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_f64(self, v: f64) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_char(self, v: char) -> Result<Value> {
		Ok(v.to_value())
	}

	fn serialize_str(self, v: &str) -> Result<Value> {
		Ok(Value::string(v))
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
		Ok(Value::bytes(v))
	}

	fn serialize_none(self) -> Result<Value> {
		Value::nil_interface(&option_type())
	}

	fn serialize_some<T>(self, value: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		let inner = value.serialize(ValueSerializer)?;
		Value::interface(&option_type(), inner)
	}

	fn serialize_unit(self) -> Result<Value> {
		Ok(().to_value())
	}

	fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
		Ok(Value::structure_unchecked(record(name, &[]), Vec::new()))
	}

	fn serialize_unit_variant(self, name: &'static str, _variant_index: u32, variant: &'static str) -> Result<Value> {
		Ok(Value::structure_unchecked(record(&variant_name(name, variant), &[]), Vec::new()))
	}

	fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		let inner = value.serialize(ValueSerializer)?;
		let ty = record(name, &[Field::public("0", inner.ty())]);
		Ok(Value::structure_unchecked(ty, vec![inner]))
	}

	fn serialize_newtype_variant<T>(self, name: &'static str, _variant_index: u32, variant: &'static str, value: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		let inner = value.serialize(ValueSerializer)?;
		let ty = record(&variant_name(name, variant), &[Field::public("0", inner.ty())]);
		Ok(Value::structure_unchecked(ty, vec![inner]))
	}

	fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture> {
		Ok(SeqCapture::new(len.unwrap_or_default(), false))
	}

	fn serialize_tuple(self, len: usize) -> Result<SeqCapture> {
		Ok(SeqCapture::new(len, true))
	}

	fn serialize_tuple_struct(self, name: &'static str, len: usize) -> Result<FieldsCapture> {
		Ok(FieldsCapture::new(name.to_owned(), len))
	}

	fn serialize_tuple_variant(self, name: &'static str, _variant_index: u32, variant: &'static str, len: usize) -> Result<FieldsCapture> {
		Ok(FieldsCapture::new(variant_name(name, variant), len))
	}

	fn serialize_map(self, len: Option<usize>) -> Result<MapCapture> {
		Ok(MapCapture::new(len.unwrap_or_default()))
	}

	fn serialize_struct(self, name: &'static str, len: usize) -> Result<FieldsCapture> {
		Ok(FieldsCapture::new(name.to_owned(), len))
	}

	fn serialize_struct_variant(self, name: &'static str, _variant_index: u32, variant: &'static str, len: usize) -> Result<FieldsCapture> {
		Ok(FieldsCapture::new(variant_name(name, variant), len))
	}
}

/// Sequence and tuple collector.
struct SeqCapture {
	items: Vec<Value>,
	tuple: bool,
}

impl SeqCapture {
	fn new(len: usize, tuple: bool) -> Self {
		Self {
			items: Vec::with_capacity(len),
			tuple,
		}
	}

	fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
		self.items.push(value.serialize(ValueSerializer)?);
		Ok(())
	}

	fn finish(self) -> Value {
		if self.tuple {
			let parts: Vec<Type> = self.items.iter().map(|item| item.ty().clone()).collect();
			return Value::structure_unchecked(Type::tuple(&parts), self.items);
		}
		let (elem, items) = unify(self.items);
		Value::slice(&Slice::new(&elem, items))
	}
}

impl ser::SerializeSeq for SeqCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_element<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.push(value)
	}

	fn end(self) -> Result<Value> {
		Ok(self.finish())
	}
}

impl ser::SerializeTuple for SeqCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_element<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.push(value)
	}

	fn end(self) -> Result<Value> {
		Ok(self.finish())
	}
}

/// Struct, tuple struct, and variant collector.
struct FieldsCapture {
	name: String,
	fields: Vec<Field>,
	values: Vec<Value>,
}

impl FieldsCapture {
	fn new(name: String, len: usize) -> Self {
		Self {
			name,
			fields: Vec::with_capacity(len),
			values: Vec::with_capacity(len),
		}
	}

	fn push<T: ?Sized + Serialize>(&mut self, key: Option<&str>, value: &T) -> Result<()> {
		let value = value.serialize(ValueSerializer)?;
		let name = match key {
			Some(key) => key.to_owned(),
			None => self.values.len().to_string(),
		};
		self.fields.push(Field::public(name, value.ty()));
		self.values.push(value);
		Ok(())
	}

	fn finish(self) -> Value {
		Value::structure_unchecked(record(&self.name, &self.fields), self.values)
	}
}

impl ser::SerializeStruct for FieldsCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.push(Some(key), value)
	}

	fn end(self) -> Result<Value> {
		Ok(self.finish())
	}
}

impl ser::SerializeStructVariant for FieldsCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.push(Some(key), value)
	}

	fn end(self) -> Result<Value> {
		Ok(self.finish())
	}
}

impl ser::SerializeTupleStruct for FieldsCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_field<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.push(None, value)
	}

	fn end(self) -> Result<Value> {
		Ok(self.finish())
	}
}

impl ser::SerializeTupleVariant for FieldsCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_field<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.push(None, value)
	}

	fn end(self) -> Result<Value> {
		Ok(self.finish())
	}
}

/// Map collector.
struct MapCapture {
	keys: Vec<Value>,
	values: Vec<Value>,
}

impl MapCapture {
	fn new(len: usize) -> Self {
		Self {
			keys: Vec::with_capacity(len),
			values: Vec::with_capacity(len),
		}
	}
}

impl ser::SerializeMap for MapCapture {
	type Ok = Value;
	type Error = PrettyError;

	fn serialize_key<T>(&mut self, key: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.keys.push(key.serialize(ValueSerializer)?);
		Ok(())
	}

	fn serialize_value<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		if self.values.len() >= self.keys.len() {
			return Err(PrettyError::Capture("map value serialized before its key".to_owned()));
		}
		self.values.push(value.serialize(ValueSerializer)?);
		Ok(())
	}

	fn end(self) -> Result<Value> {
		let (key_ty, keys) = unify(self.keys);
		let (value_ty, values) = unify(self.values);
		let map = Map::new(&key_ty, &value_ty);
		for (key, value) in keys.into_iter().zip(values) {
			map.append(key, value);
		}
		let ty = Type::generic(Kind::Map, &format!("Map<{}, {}>", key_ty.name(), value_ty.name()), Some(&value_ty), Some(&key_ty));
		Ok(Value::map(&map).retyped(ty))
	}
}
