use std::fmt;
use std::sync::Arc;

use super::write_items;
use crate::cache::TypeCache;
use crate::config::StructConfig;
use crate::state::State;
use crate::value::{Field, Kind, Type, Value};
use crate::writer::ValueWriter;

/// Indexes of public fields per struct type.
static PUBLIC_FIELDS: TypeCache<Arc<[usize]>> = TypeCache::new("public_fields");

/// Which struct fields to render.
#[derive(Clone, Default)]
pub enum FieldFilter {
	/// Every field.
	#[default]
	All,
	/// Public fields only.
	PublicOnly,
	/// Fields accepted by the predicate.
	Custom(Arc<dyn Fn(&Field) -> bool + Send + Sync>),
}

impl FieldFilter {
	fn indexes(&self, ty: &Type) -> Arc<[usize]> {
		match self {
			Self::All => (0..ty.fields().len()).collect(),
			Self::PublicOnly => PUBLIC_FIELDS.get_or_insert_with(ty, || {
				ty.fields().iter().enumerate().filter(|(_, field)| field.is_public()).map(|(idx, _)| idx).collect()
			}),
			Self::Custom(keep) => ty.fields().iter().enumerate().filter(|(_, field)| keep(field)).map(|(idx, _)| idx).collect(),
		}
	}
}

impl fmt::Debug for FieldFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.write_str("All"),
			Self::PublicOnly => f.write_str("PublicOnly"),
			Self::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

/// Renders structs as `name: value,` lines in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StructWriter {
	/// Field selection.
	pub filter: FieldFilter,
}

impl From<&StructConfig> for StructWriter {
	fn from(config: &StructConfig) -> Self {
		let filter = if config.public_only { FieldFilter::PublicOnly } else { FieldFilter::All };
		Self { filter }
	}
}

impl ValueWriter for StructWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if value.kind() != Kind::Struct {
			return false;
		}
		let ty = value.ty();
		let indexes = self.filter.indexes(ty);
		let fields = indexes.iter().filter_map(|idx| Some((ty.field(*idx)?, value.field(*idx)?)));
		write_items(st, fields, None, |st, _, (field, item)| {
			write!(st, "{}: ", field.name());
			st.write_child(&item, false);
		});
		true
	}
}
