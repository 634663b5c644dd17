use std::sync::Arc;

use crate::value::{Data, Value};

/// Canonical identity of a comparable value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
	Nil,
	Bool(bool),
	Int(i128),
	Uint(u128),
	Float(u64),
	Complex(u64, u64),
	Str(Arc<str>),
	Addr(usize),
	Seq(Vec<(u64, ValueKey)>),
}

/// Type id plus canonical identity; `None` for slices, maps, and functions.
pub(crate) fn identity_of(value: &Value) -> Option<(u64, ValueKey)> {
	Some((value.ty().id(), key_of(value)?))
}

fn key_of(value: &Value) -> Option<ValueKey> {
	Some(match value.data() {
		Data::Invalid | Data::Interface(None) => ValueKey::Nil,
		Data::Bool(v) => ValueKey::Bool(*v),
		Data::Int(v) => ValueKey::Int(*v),
		Data::Uint(v) => ValueKey::Uint(*v),
		Data::Float(v) => ValueKey::Float(v.to_bits()),
		Data::Complex(re, im) => ValueKey::Complex(re.to_bits(), im.to_bits()),
		Data::String(v) => ValueKey::Str(v.clone()),
		Data::Array(items) | Data::Struct(items) => ValueKey::Seq(items.iter().map(identity_of).collect::<Option<Vec<_>>>()?),
		Data::Interface(Some(inner)) => ValueKey::Seq(vec![identity_of(inner)?]),
		Data::Pointer(ptr) => ValueKey::Addr(ptr.as_ref().map_or(0, |ptr| ptr.addr())),
		Data::Chan(chan) => ValueKey::Addr(chan.as_ref().map_or(0, |chan| chan.addr())),
		Data::UnsafePointer(addr) => ValueKey::Addr(*addr),
		Data::Slice(_) | Data::Map(_) | Data::Func(_) => return None,
	})
}
