use super::usable;
use crate::config::IterConfig;
use crate::kind::{truncate_chars, write_items};
use crate::markers::TRUNCATED;
use crate::state::State;
use crate::value::Value;
use crate::writer::ValueWriter;

/// Renders values with a display hook as `=> Display "text"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayWriter {
	/// Truncate the text after this many characters.
	pub max_len: Option<usize>,
}

impl ValueWriter for DisplayWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some(hook) = value.ty().methods().display.clone() else {
			return false;
		};
		let text = hook(value);
		let (shown, truncated) = truncate_chars(&text, self.max_len);
		write!(st, "=> Display {shown:?}");
		if truncated {
			st.write_char(' ');
			st.write_str(TRUNCATED);
		}
		true
	}
}

/// Renders values with an iteration hook as `=> iter() {` items `}`.
///
/// Key/value pairs are preferred over plain items when a type has both.
#[derive(Debug, Clone, Default)]
pub struct IterWriter {
	/// Options.
	pub config: IterConfig,
}

impl ValueWriter for IterWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let methods = value.ty().methods();
		let show_indexes = self.config.show_indexes;
		if let Some(pairs) = methods.pairs.clone() {
			st.write_str("=> iter() ");
			write_items(st, pairs(value), self.config.max_len, |st, idx, (key, item)| {
				if show_indexes {
					write!(st, "{idx}: ");
				}
				st.write_child(&key, true);
				st.write_str(": ");
				st.write_child(&item, true);
			});
			return true;
		}
		let Some(iter) = methods.iter.clone() else {
			return false;
		};
		st.write_str("=> iter() ");
		write_items(st, iter(value), self.config.max_len, |st, idx, item| {
			if show_indexes {
				write!(st, "{idx}: ");
			}
			st.write_child(&item, true);
		});
		true
	}
}
