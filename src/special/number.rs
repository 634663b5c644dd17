use rust_decimal::Decimal;

use super::usable;
use crate::state::State;
use crate::value::Value;
use crate::writer::ValueWriter;

/// Renders `rust_decimal::Decimal` values as exact decimal text, `=> Display 1.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalWriter;

impl ValueWriter for DecimalWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(decimal) = value.native::<Decimal>() else {
			return false;
		};
		write!(st, "=> Display {decimal}");
		true
	}
}
