use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::Mutex;
use tracing::trace;

use crate::error::{PrettyError, Result};
use crate::value::{Methods, Ptr, Type, Value, ValueKey, identity_of};

static INTERNED: LazyLock<Mutex<HashMap<(u64, ValueKey), Handle>>> = LazyLock::new(Default::default);

/// Canonical handle for a comparable value; equal values of the same type share one handle.
#[derive(Clone)]
pub struct Handle {
	cell: Ptr,
}

impl Handle {
	/// Intern `value`, returning the shared handle for its identity.
	pub fn make(value: Value) -> Result<Self> {
		let identity = identity_of(&value).ok_or_else(|| PrettyError::NotComparable {
			type_name: value.ty().name().to_owned(),
		})?;
		let ty = value.ty().clone();
		let mut interned = INTERNED.lock();
		let handle = interned.entry(identity).or_insert_with(|| {
			trace!(type_name = ty.name(), "interned unique value");
			Handle {
				cell: Ptr::new(&ty, value),
			}
		});
		Ok(handle.clone())
	}

	/// Canonical value.
	pub fn get(&self) -> Value {
		self.cell.get()
	}

	/// True when both handles are the same canonical entry.
	pub fn ptr_eq(&self, other: &Handle) -> bool {
		self.cell.ptr_eq(&other.cell)
	}

	/// Address of the canonical entry.
	pub fn addr(&self) -> usize {
		self.cell.addr()
	}

	/// The handle itself as a `Handle<T>` value.
	pub fn as_value(&self) -> Value {
		let elem = self.cell.elem();
		let ty = Type::opaque(&format!("Handle<{}>", elem.name()), &[("value", Type::pointer_to(elem))], Methods::default);
		Value::structure_unchecked(ty, vec![Value::pointer(&self.cell)]).with_native(self.clone())
	}
}
