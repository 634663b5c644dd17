//! Per-render mutable context.

use std::fmt::{self, Write as _};
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::indent::IndentWriter;
use crate::pool::{Pool, Pooled, reset_string, reset_vec};
use crate::value::Value;
use crate::writer::ValueWriter;

static BUFFERS: Pool<String> = Pool::new(reset_string);
static VISITS: Pool<Vec<Visit>> = Pool::new(reset_vec);

/// One reference-bearing value currently being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visit {
	/// Runtime type id of the value.
	pub type_id: u64,
	/// Identity address of the value.
	pub addr: usize,
}

/// Mutable context threaded through one render.
///
/// Holds the output buffer, the root writer used for recursion, the indentation level, the
/// nesting depth, the in-progress visit stack, and the known-type flag. Nested changes are made
/// through [`Scope`] guards so they unwind on every exit path, panics included.
pub struct State<'w> {
	root: &'w dyn ValueWriter,
	indent: &'w str,
	out: Pooled<'static, String>,
	visited: Pooled<'static, Vec<Visit>>,
	level: usize,
	depth: usize,
	known_type: bool,
}

impl<'w> State<'w> {
	/// Fresh context rendering nested values through `root`.
	pub fn new(root: &'w dyn ValueWriter, indent: &'w str) -> Self {
		Self {
			root,
			indent,
			out: BUFFERS.get(),
			visited: VISITS.get(),
			level: 0,
			depth: 0,
			known_type: false,
		}
	}

	/// Root writer.
	pub fn root(&self) -> &'w dyn ValueWriter {
		self.root
	}

	/// Render `value` through the root writer.
	pub fn write_value(&mut self, value: &Value) -> bool {
		let root = self.root;
		root.write_value(self, value)
	}

	/// Render a nested value with the known-type flag set for its duration.
	pub fn write_child(&mut self, value: &Value, known_type: bool) -> bool {
		let mut st = self.known_type_scope(known_type);
		st.write_value(value)
	}

	/// Append text.
	pub fn write_str(&mut self, s: &str) {
		self.out.push_str(s);
	}

	/// Append one character.
	pub fn write_char(&mut self, c: char) {
		self.out.push(c);
	}

	/// Append formatted text; backs the `write!` macro.
	pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
		let _ = self.out.write_fmt(args);
	}

	/// Start a new line at the current indentation level.
	pub fn newline(&mut self) {
		self.out.push('\n');
		for _ in 0..self.level {
			self.out.push_str(self.indent);
		}
	}

	/// Writer that re-indents embedded newlines at the current level.
	pub fn indent_writer(&mut self) -> IndentWriter<'_> {
		IndentWriter::new(&mut self.out, self.indent, self.level)
	}

	/// Indentation unit.
	pub fn indent_unit(&self) -> &'w str {
		self.indent
	}

	/// Current indentation level.
	pub fn level(&self) -> usize {
		self.level
	}

	/// Increase the indentation level until the guard drops.
	pub fn indented(&mut self) -> Scope<'_, 'w> {
		self.level += 1;
		Scope { st: self, undo: Undo::Dedent }
	}

	/// Current nesting depth.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Increase the nesting depth until the guard drops.
	pub fn enter_depth(&mut self) -> Scope<'_, 'w> {
		self.depth += 1;
		Scope { st: self, undo: Undo::LeaveDepth }
	}

	/// True when the enclosing context already announced the value's type.
	pub fn known_type(&self) -> bool {
		self.known_type
	}

	/// Set the known-type flag until the guard drops.
	pub fn known_type_scope(&mut self, known_type: bool) -> Scope<'_, 'w> {
		let prev = mem::replace(&mut self.known_type, known_type);
		Scope {
			st: self,
			undo: Undo::KnownType(prev),
		}
	}

	/// True when `visit` is already on the in-progress path.
	pub fn is_visited(&self, visit: Visit) -> bool {
		self.visited.contains(&visit)
	}

	/// Values currently being expanded, outermost first.
	pub fn visited(&self) -> &[Visit] {
		&self.visited
	}

	/// Push `visit` on the in-progress path until the guard drops.
	pub fn enter_visit(&mut self, visit: Visit) -> Scope<'_, 'w> {
		self.visited.push(visit);
		Scope {
			st: self,
			undo: Undo::PopVisit,
		}
	}

	/// Current output length, for [`State::rollback`].
	pub fn mark(&self) -> usize {
		self.out.len()
	}

	/// Discard output written since `mark`.
	pub fn rollback(&mut self, mark: usize) {
		self.out.truncate(mark);
	}

	/// Output written so far.
	pub fn as_str(&self) -> &str {
		&self.out
	}

	/// Render `value` into a separate buffer at indentation level zero and return the text.
	///
	/// The main buffer and level are restored even if rendering panics.
	pub fn render_detached(&mut self, value: &Value, known_type: bool) -> String {
		let detached = Detached::new(self);
		detached.st.write_child(value, known_type);
		detached.st.out.as_str().to_owned()
	}
}

impl fmt::Debug for State<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("State")
			.field("level", &self.level)
			.field("depth", &self.depth)
			.field("known_type", &self.known_type)
			.field("visited", &self.visited.len())
			.field("len", &self.out.len())
			.finish()
	}
}

struct Detached<'a, 'w> {
	st: &'a mut State<'w>,
	saved: Pooled<'static, String>,
	level: usize,
}

impl<'a, 'w> Detached<'a, 'w> {
	fn new(st: &'a mut State<'w>) -> Self {
		let mut saved = BUFFERS.get();
		mem::swap(&mut *st.out, &mut *saved);
		let level = mem::replace(&mut st.level, 0);
		Self { st, saved, level }
	}
}

impl Drop for Detached<'_, '_> {
	fn drop(&mut self) {
		mem::swap(&mut *self.st.out, &mut *self.saved);
		self.st.level = self.level;
	}
}

#[derive(Debug, Clone, Copy)]
enum Undo {
	Dedent,
	LeaveDepth,
	KnownType(bool),
	PopVisit,
}

/// Guard restoring one [`State`] change when dropped.
pub struct Scope<'a, 'w> {
	st: &'a mut State<'w>,
	undo: Undo,
}

impl<'w> Deref for Scope<'_, 'w> {
	type Target = State<'w>;

	fn deref(&self) -> &State<'w> {
		self.st
	}
}

impl<'w> DerefMut for Scope<'_, 'w> {
	fn deref_mut(&mut self) -> &mut State<'w> {
		self.st
	}
}

impl Drop for Scope<'_, '_> {
	fn drop(&mut self) {
		match self.undo {
			Undo::Dedent => self.st.level = self.st.level.saturating_sub(1),
			Undo::LeaveDepth => self.st.depth = self.st.depth.saturating_sub(1),
			Undo::KnownType(prev) => self.st.known_type = prev,
			Undo::PopVisit => {
				self.st.visited.pop();
			}
		}
	}
}
