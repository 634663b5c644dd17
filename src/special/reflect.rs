use std::sync::Arc;

use super::usable;
use crate::cache::TypeCache;
use crate::kind::write_items;
use crate::state::State;
use crate::value::{Field, Type, Value};
use crate::writer::ValueWriter;

/// Trait names per type.
static TRAITS: TypeCache<Arc<[Arc<str>]>> = TypeCache::new("trait_names");

/// Renders [`Type`] values as a structural dump.
///
/// Nested types are named, not expanded, so self-referential types terminate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectTypeWriter;

enum Entry {
	Text(&'static str, String),
	Fields(Vec<Field>),
}

fn names(types: &[Type]) -> String {
	let names: Vec<&str> = types.iter().map(Type::name).collect();
	format!("({})", names.join(", "))
}

fn entries(ty: &Type) -> Vec<Entry> {
	let mut out = vec![Entry::Text("name", format!("{:?}", ty.name())), Entry::Text("kind", ty.kind().to_string())];
	if let Some(size) = ty.size() {
		out.push(Entry::Text("size", size.to_string()));
	}
	if let Some(base) = ty.base() {
		out.push(Entry::Text("base", base.name().to_owned()));
	}
	if let Some(key) = ty.key() {
		out.push(Entry::Text("key", key.name().to_owned()));
	}
	if let Some(elem) = ty.elem() {
		out.push(Entry::Text("elem", elem.name().to_owned()));
	}
	if let Some(len) = ty.len() {
		out.push(Entry::Text("len", len.to_string()));
	}
	if ty.has_fields() {
		out.push(Entry::Fields(ty.fields().to_vec()));
	}
	if !ty.params().is_empty() || !ty.results().is_empty() {
		out.push(Entry::Text("params", names(ty.params())));
		out.push(Entry::Text("results", names(ty.results())));
	}
	let traits = TRAITS.get_or_insert_with(ty, || ty.methods().trait_names().into());
	if !traits.is_empty() {
		let traits: Vec<&str> = traits.iter().map(|name| &**name).collect();
		out.push(Entry::Text("traits", format!("[{}]", traits.join(", "))));
	}
	out
}

impl ValueWriter for ReflectTypeWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(ty) = value.native::<Type>() else {
			return false;
		};
		write_items(st, entries(ty), None, |st, _, entry| match entry {
			Entry::Text(label, text) => write!(st, "{label}: {text}"),
			Entry::Fields(fields) => {
				st.write_str("fields: ");
				write_items(st, fields, None, |st, _, field| {
					let private = if field.is_public() { "" } else { " (private)" };
					write!(st, "{}: {}{private}", field.name(), field.ty().name());
				});
			}
		});
		true
	}
}
