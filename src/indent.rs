//! Line-prefixing text sink.

use std::fmt;

/// `fmt::Write` adapter that prefixes every line after the first with `indent` repeated `level` times.
///
/// Used for multi-line text (hex dumps, panic traces) written below a nested entry.
pub struct IndentWriter<'a> {
	out: &'a mut String,
	indent: &'a str,
	level: usize,
	at_line_start: bool,
}

impl<'a> IndentWriter<'a> {
	/// Writer continuing the current line of `out`.
	pub fn new(out: &'a mut String, indent: &'a str, level: usize) -> Self {
		Self {
			out,
			indent,
			level,
			at_line_start: false,
		}
	}

	fn pad(&mut self) {
		for _ in 0..self.level {
			self.out.push_str(self.indent);
		}
	}
}

impl fmt::Write for IndentWriter<'_> {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		for (idx, line) in s.split('\n').enumerate() {
			if idx > 0 {
				self.out.push('\n');
				self.at_line_start = true;
			}
			if line.is_empty() {
				continue;
			}
			if self.at_line_start {
				self.pad();
				self.at_line_start = false;
			}
			self.out.push_str(line);
		}
		Ok(())
	}
}
