use std::fmt::Write as _;

use super::truncate_chars;
use crate::config::StringConfig;
use crate::markers::TRUNCATED;
use crate::state::State;
use crate::value::Value;
use crate::writer::ValueWriter;

/// Renders strings as `(len=N) "text"`.
///
/// The length counts bytes; truncation counts characters.
#[derive(Debug, Clone, Default)]
pub struct StringWriter {
	/// Options.
	pub config: StringConfig,
}

impl ValueWriter for StringWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		let Some(text) = value.as_str() else {
			return false;
		};
		if self.config.show_len {
			write!(st, "(len={}) ", text.len());
		}
		let (shown, truncated) = truncate_chars(text, self.config.max_len);
		if self.config.quote {
			write!(st, "{shown:?}");
		} else {
			let _ = st.indent_writer().write_str(shown);
		}
		if truncated {
			st.write_char(' ');
			st.write_str(TRUNCATED);
		}
		true
	}
}
