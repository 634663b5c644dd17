use std::cmp::Ordering;

use super::{write_info, write_items};
use crate::config::MapConfig;
use crate::markers::NIL;
use crate::state::State;
use crate::value::{Kind, Value};
use crate::writer::ValueWriter;

/// Renders maps as `key: value,` lines.
///
/// With `sort_keys` off, entries follow the map's own enumeration order, which callers must not
/// rely on.
#[derive(Debug, Clone, Default)]
pub struct MapWriter {
	/// Options.
	pub config: MapConfig,
}

impl ValueWriter for MapWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Map {
			return false;
		}
		if value.is_nil() {
			st.write_str(NIL);
			return true;
		}
		let config = &self.config;
		let len = config.show_len.then(|| value.len());
		let addr = if config.show_addr { value.addr() } else { None };
		if write_info(st, len, None, addr) {
			st.write_char(' ');
		}
		let mut entries = value.entries();
		if config.sort_keys {
			sort_entries(st, &mut entries);
		}
		write_items(st, entries, config.max_len, |st, _, (key, item)| {
			st.write_child(&key, true);
			st.write_str(": ");
			st.write_child(&item, true);
		});
		true
	}
}

/// Ordering key: shape rank first, then the natural order within the rank.
#[derive(Debug)]
enum SortKey {
	Nil,
	Bool(bool),
	Int(i128),
	Uint(u128),
	Float(f64),
	Text(String),
	Rendered(String),
}

impl SortKey {
	fn rank(&self) -> u8 {
		match self {
			Self::Nil => 0,
			Self::Bool(_) => 1,
			Self::Int(_) => 2,
			Self::Uint(_) => 3,
			Self::Float(_) => 4,
			Self::Text(_) => 5,
			Self::Rendered(_) => 6,
		}
	}

	fn compare(&self, other: &Self) -> Ordering {
		let by_value = match (self, other) {
			(Self::Bool(a), Self::Bool(b)) => a.cmp(b),
			(Self::Int(a), Self::Int(b)) => a.cmp(b),
			(Self::Uint(a), Self::Uint(b)) => a.cmp(b),
			(Self::Float(a), Self::Float(b)) => a.total_cmp(b),
			(Self::Text(a), Self::Text(b)) | (Self::Rendered(a), Self::Rendered(b)) => a.cmp(b),
			_ => Ordering::Equal,
		};
		self.rank().cmp(&other.rank()).then(by_value)
	}
}

fn sort_key(st: &mut State<'_>, key: &Value) -> SortKey {
	let mut concrete = key.clone();
	while concrete.kind() == Kind::Interface {
		match concrete.elem() {
			Some(inner) => concrete = inner,
			None => return SortKey::Nil,
		}
	}
	if !concrete.is_valid() {
		return SortKey::Nil;
	}
	if let Some(v) = concrete.as_bool() {
		return SortKey::Bool(v);
	}
	if let Some(v) = concrete.as_i128() {
		return SortKey::Int(v);
	}
	if let Some(v) = concrete.as_u128() {
		return SortKey::Uint(v);
	}
	if let Some(v) = concrete.as_f64() {
		return SortKey::Float(v);
	}
	if let Some(v) = concrete.as_str() {
		return SortKey::Text(v.to_owned());
	}
	SortKey::Rendered(st.render_detached(key, true))
}

/// Stable sort of map entries by key.
fn sort_entries(st: &mut State<'_>, entries: &mut Vec<(Value, Value)>) {
	let mut keyed: Vec<(SortKey, (Value, Value))> = entries.drain(..).map(|entry| (sort_key(st, &entry.0), entry)).collect();
	keyed.sort_by(|a, b| a.0.compare(&b.0));
	entries.extend(keyed.into_iter().map(|(_, entry)| entry));
}
