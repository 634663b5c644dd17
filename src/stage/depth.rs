use crate::markers::MAX_DEPTH;
use crate::state::State;
use crate::value::Value;
use crate::writer::{Stage, ValueWriter};

/// Default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Writes `<max depth>` instead of descending past `max` nested values.
#[derive(Debug, Clone)]
pub struct DepthLimit {
	/// Maximum nesting depth.
	pub max: usize,
}

impl Default for DepthLimit {
	fn default() -> Self {
		Self { max: DEFAULT_MAX_DEPTH }
	}
}

impl Stage for DepthLimit {
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool {
		if st.depth() >= self.max {
			st.write_str(MAX_DEPTH);
			return true;
		}
		let mut st = st.enter_depth();
		next.write_value(&mut st, value)
	}
}
