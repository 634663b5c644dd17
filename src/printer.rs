//! Entry point turning values into text.

use std::fmt;
use std::io;
use std::sync::Arc;

use tracing::warn;

use crate::config::Config;
use crate::error::{PrettyError, Result};
use crate::markers::NIL;
use crate::panics::contain;
use crate::pipeline::Pipeline;
use crate::stage::write_caught;
use crate::state::State;
use crate::value::Value;
use crate::writer::ValueWriter;

/// Renders values through a writer, usually a [`Pipeline`].
///
/// A printer is read-only once built and may be shared between threads.
#[derive(Clone)]
pub struct Printer {
	writer: Arc<dyn ValueWriter>,
	indent: String,
}

impl Printer {
	/// Printer rendering through `writer`, indenting with a tab.
	pub fn new(writer: impl ValueWriter + 'static) -> Self {
		Self {
			writer: Arc::new(writer),
			indent: "\t".to_owned(),
		}
	}

	/// Printer for the pipeline described by `config`.
	pub fn from_config(config: &Config) -> Self {
		Self::new(Pipeline::from_config(config)).with_indent(config.indent.clone())
	}

	/// Replace the indentation unit.
	pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
		self.indent = indent.into();
		self
	}

	/// Writer behind this printer.
	pub fn writer(&self) -> &Arc<dyn ValueWriter> {
		&self.writer
	}

	/// Render `value` into `sink`.
	///
	/// The text is rendered completely before the sink is written once.
	pub fn write<W: io::Write + ?Sized>(&self, sink: &mut W, value: &Value) -> Result<()> {
		let text = self.render(value)?;
		sink.write_all(text.as_bytes())?;
		Ok(())
	}

	/// Render `value` to a string.
	///
	/// # Panics
	///
	/// Panics if the writer declines the value, which only happens when the pipeline was
	/// configured without a renderer for its shape.
	pub fn string(&self, value: &Value) -> String {
		match self.render(value) {
			Ok(text) => text,
			Err(err) => panic!("{err}"),
		}
	}

	/// Deferred rendering through [`fmt::Display`].
	pub fn formatter<'a>(&'a self, value: &'a Value) -> Formatted<'a> {
		Formatted { printer: self, value }
	}

	fn render(&self, value: &Value) -> Result<String> {
		if !value.is_valid() {
			return Ok(NIL.to_owned());
		}
		let mut st = State::new(self.writer.as_ref(), &self.indent);
		let outcome = contain(false, || st.write_value(value));
		match outcome {
			Ok(true) => {}
			Ok(false) => {
				return Err(PrettyError::Unhandled {
					type_name: value.ty().name().to_owned(),
				});
			}
			Err(caught) => {
				warn!(type_name = value.ty().name(), message = %caught.message, "panic escaped the rendering pipeline");
				write_caught(&mut st, &caught);
			}
		}
		Ok(st.as_str().to_owned())
	}
}

impl Default for Printer {
	fn default() -> Self {
		Self::from_config(&Config::default())
	}
}

impl fmt::Debug for Printer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Printer").field("indent", &self.indent).finish_non_exhaustive()
	}
}

/// [`fmt::Display`] adapter returned by [`Printer::formatter`].
pub struct Formatted<'a> {
	printer: &'a Printer,
	value: &'a Value,
}

impl fmt::Display for Formatted<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text = self.printer.render(self.value).map_err(|_| fmt::Error)?;
		f.write_str(&text)
	}
}

impl fmt::Debug for Formatted<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}
