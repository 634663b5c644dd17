use std::sync::Arc;

use crate::cache::TypeCache;
use crate::state::State;
use crate::value::{Kind, Type, Value};
use crate::writer::{Stage, ValueWriter};

/// Bracketed type label and the same label with its base type.
static LABELS: TypeCache<(Arc<str>, Arc<str>)> = TypeCache::new("type_labels");

/// Prefixes values with `[TypeName] ` unless the enclosing context already announced the type.
///
/// The prefix is rolled back if the wrapped writers decline the value.
#[derive(Debug, Clone)]
pub struct TypeAnnotator {
	/// Annotate even when the type is already known.
	pub show_known_types: bool,
	/// Append the underlying type of named types, as in `[Celsius (f64)]`.
	pub show_base_type: bool,
}

impl Default for TypeAnnotator {
	fn default() -> Self {
		Self {
			show_known_types: false,
			show_base_type: true,
		}
	}
}

impl TypeAnnotator {
	fn label(&self, ty: &Type) -> Arc<str> {
		let (plain, with_base) = LABELS.get_or_insert_with(ty, || {
			let plain: Arc<str> = Arc::from(format!("[{}]", ty.name()));
			let with_base = match ty.base() {
				Some(base) if base.name() != ty.name() => Arc::from(format!("[{} ({})]", ty.name(), base.name())),
				_ => plain.clone(),
			};
			(plain, with_base)
		});
		if self.show_base_type { with_base } else { plain }
	}
}

impl Stage for TypeAnnotator {
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool {
		if value.kind() == Kind::Invalid || (st.known_type() && !self.show_known_types) {
			let mut st = st.known_type_scope(true);
			return next.write_value(&mut st, value);
		}
		let mark = st.mark();
		st.write_str(&self.label(value.ty()));
		st.write_char(' ');
		let handled = {
			let mut st = st.known_type_scope(true);
			next.write_value(&mut st, value)
		};
		if !handled {
			st.rollback(mark);
		}
		handled
	}
}
