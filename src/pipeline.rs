//! Decorator pipeline assembled from optional stages.

use crate::config::Config;
use crate::kind::KindDispatcher;
use crate::special::builtin_writers;
use crate::stage::{AccessGuard, DepthLimit, PanicGuard, RecursionGuard, TypeAnnotator, UnwrapInterface};
use crate::state::State;
use crate::value::Value;
use crate::writer::{FirstOf, Stage, ValueWriter};

/// Stages in fixed outer-to-inner order, followed by the specialized writers and the kind table.
///
/// Every part is optional and public: clearing a stage skips it without rebuilding the others.
#[derive(Debug, Clone)]
pub struct Pipeline {
	/// Panic containment.
	pub panic: Option<PanicGuard>,
	/// Interface unwrapping.
	pub unwrap: Option<UnwrapInterface>,
	/// Cycle detection.
	pub recursion: Option<RecursionGuard>,
	/// Nesting limit.
	pub depth: Option<DepthLimit>,
	/// Private value unlocking.
	pub access: Option<AccessGuard>,
	/// Type annotation.
	pub annotate: Option<TypeAnnotator>,
	/// Specialized writers, first match wins.
	pub writers: FirstOf,
	/// Shape-based fallback.
	pub kinds: Option<KindDispatcher>,
}

impl Pipeline {
	/// Assemble the pipeline described by `config`.
	pub fn from_config(config: &Config) -> Self {
		Self {
			panic: config.panic.as_ref().map(|panic| PanicGuard {
				show_trace: panic.show_trace,
			}),
			unwrap: config.unwrap_interface.then_some(UnwrapInterface),
			recursion: config.recursion.as_ref().map(|recursion| RecursionGuard {
				show_info: recursion.show_info,
			}),
			depth: config.max_depth.map(|max| DepthLimit { max }),
			access: config.unlock_private.then_some(AccessGuard),
			annotate: config.type_annotation.as_ref().map(|annotation| TypeAnnotator {
				show_known_types: annotation.show_known_types,
				show_base_type: annotation.show_base_type,
			}),
			writers: builtin_writers(&config.writers),
			kinds: Some(KindDispatcher::from_config(&config.kinds)),
		}
	}

	fn stage(&self, step: Step) -> Option<&dyn Stage> {
		match step {
			Step::Panic => self.panic.as_ref().map(|stage| stage as &dyn Stage),
			Step::Unwrap => self.unwrap.as_ref().map(|stage| stage as &dyn Stage),
			Step::Recursion => self.recursion.as_ref().map(|stage| stage as &dyn Stage),
			Step::Depth => self.depth.as_ref().map(|stage| stage as &dyn Stage),
			Step::Access => self.access.as_ref().map(|stage| stage as &dyn Stage),
			Step::Annotate => self.annotate.as_ref().map(|stage| stage as &dyn Stage),
			Step::Terminal => None,
		}
	}

	fn run(&self, mut step: Step, st: &mut State<'_>, value: &Value) -> bool {
		loop {
			let Some(after) = step.next() else {
				return self.write_terminal(st, value);
			};
			if let Some(stage) = self.stage(step) {
				let next = Next { pipeline: self, step: after };
				return stage.write_stage(st, value, &next);
			}
			step = after;
		}
	}

	fn write_terminal(&self, st: &mut State<'_>, value: &Value) -> bool {
		if self.writers.write_value(st, value) {
			return true;
		}
		self.kinds.as_ref().is_some_and(|kinds| kinds.write_value(st, value))
	}
}

impl Default for Pipeline {
	fn default() -> Self {
		Self::from_config(&Config::default())
	}
}

impl ValueWriter for Pipeline {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		self.run(Step::Panic, st, value)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
	Panic,
	Unwrap,
	Recursion,
	Depth,
	Access,
	Annotate,
	Terminal,
}

impl Step {
	fn next(self) -> Option<Self> {
		Some(match self {
			Self::Panic => Self::Unwrap,
			Self::Unwrap => Self::Recursion,
			Self::Recursion => Self::Depth,
			Self::Depth => Self::Access,
			Self::Access => Self::Annotate,
			Self::Annotate => Self::Terminal,
			Self::Terminal => return None,
		})
	}
}

/// Remainder of the pipeline after one stage.
struct Next<'p> {
	pipeline: &'p Pipeline,
	step: Step,
}

impl ValueWriter for Next<'_> {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		self.pipeline.run(self.step, st, value)
	}
}

#[cfg(test)]
mod tests;
