//! Process-wide caches keyed by type id.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::trace;

use crate::value::Type;

/// Memo of per-type derived data. Entries are never invalidated; types are immutable once built.
pub(crate) struct TypeCache<V> {
	name: &'static str,
	entries: LazyLock<RwLock<HashMap<u64, V>>>,
}

impl<V: Clone> TypeCache<V> {
	pub(crate) const fn new(name: &'static str) -> Self {
		Self {
			name,
			entries: LazyLock::new(Default::default),
		}
	}

	/// Cached value for `ty`, computing it outside the lock on a miss. The first stored value wins.
	pub(crate) fn get_or_insert_with(&self, ty: &Type, make: impl FnOnce() -> V) -> V {
		if let Some(found) = self.entries.read().get(&ty.id()) {
			return found.clone();
		}
		let value = make();
		let mut entries = self.entries.write();
		entries
			.entry(ty.id())
			.or_insert_with(|| {
				trace!(cache = self.name, type_name = ty.name(), "populated type cache");
				value
			})
			.clone()
	}

	#[cfg(test)]
	pub(crate) fn contains(&self, ty: &Type) -> bool {
		self.entries.read().contains_key(&ty.id())
	}
}
