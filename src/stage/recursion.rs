use crate::markers::RECURSION;
use crate::state::{State, Visit};
use crate::value::Value;
use crate::writer::{Stage, ValueWriter};

/// Stops re-entry into a pointer, map, slice, or channel already being expanded on the current path.
///
/// Only the in-progress path counts: the same target reached twice through sibling branches is
/// rendered both times.
#[derive(Debug, Clone, Default)]
pub struct RecursionGuard {
	/// Follow the marker with the type name and address.
	pub show_info: bool,
}

impl Stage for RecursionGuard {
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool {
		if !value.kind().has_identity() {
			return next.write_value(st, value);
		}
		let Some(addr) = value.addr() else {
			return next.write_value(st, value);
		};
		let visit = Visit {
			type_id: value.ty().id(),
			addr,
		};
		if st.is_visited(visit) {
			st.write_str(RECURSION);
			if self.show_info {
				write!(st, " [{}] 0x{addr:x}", value.ty().name());
			}
			return true;
		}
		let mut st = st.enter_visit(visit);
		next.write_value(&mut st, value)
	}
}
