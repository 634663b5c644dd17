use crate::state::State;
use crate::value::Value;
use crate::writer::{Stage, ValueWriter};

/// Hands readable copies of private-field values to the remaining writers.
///
/// Values that cannot be unlocked pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl Stage for AccessGuard {
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool {
		if value.is_readable() {
			return next.write_value(st, value);
		}
		match value.unlock() {
			Some(open) => next.write_value(st, &open),
			None => next.write_value(st, value),
		}
	}
}
