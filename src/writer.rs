//! Writer and stage contracts.

use std::sync::Arc;

use crate::state::State;
use crate::value::Value;

/// Renders one value into a [`State`].
///
/// Returns `true` when the value was handled. A writer that returns `false` must leave the output
/// untouched so the caller can try the next candidate.
pub trait ValueWriter: Send + Sync {
	/// Render `value`, or decline.
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool;
}

impl<F> ValueWriter for F
where
	F: Fn(&mut State<'_>, &Value) -> bool + Send + Sync,
{
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		self(st, value)
	}
}

/// Decorator around the next writer in a chain.
pub trait Stage: Send + Sync {
	/// Render `value`, delegating to `next` as needed.
	fn write_stage(&self, st: &mut State<'_>, value: &Value, next: &dyn ValueWriter) -> bool;
}

/// A [`Stage`] bound to the writer it decorates.
#[derive(Debug, Clone)]
pub struct Wrapped<S, W> {
	/// Decorating stage.
	pub stage: S,
	/// Decorated writer.
	pub inner: W,
}

impl<S, W> Wrapped<S, W> {
	/// Bind `stage` around `inner`.
	pub fn new(stage: S, inner: W) -> Self {
		Self { stage, inner }
	}
}

impl<S: Stage, W: ValueWriter> ValueWriter for Wrapped<S, W> {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		self.stage.write_stage(st, value, &self.inner)
	}
}

/// Ordered writers; the first that handles a value wins.
#[derive(Clone, Default)]
pub struct FirstOf(pub Vec<Arc<dyn ValueWriter>>);

impl FirstOf {
	/// Append a writer.
	pub fn push(&mut self, writer: impl ValueWriter + 'static) {
		self.0.push(Arc::new(writer));
	}

	/// Insert a writer ahead of the existing ones.
	pub fn push_front(&mut self, writer: impl ValueWriter + 'static) {
		self.0.insert(0, Arc::new(writer));
	}

	/// Number of writers.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when no writer is registered.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl ValueWriter for FirstOf {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		self.0.iter().any(|writer| writer.write_value(st, value))
	}
}

impl std::fmt::Debug for FirstOf {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("FirstOf").field(&self.0.len()).finish()
	}
}
