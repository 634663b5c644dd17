//! Pretty-printing of dynamic values for debugging and logging.
//!
//! Rust data is converted into a [`Value`] graph (through [`ToValue`] or serde [`capture`]) and
//! rendered by a [`Pipeline`] of optional stages: panic containment, interface unwrapping, cycle
//! detection, depth limiting, private value unlocking and type annotation. The innermost step
//! tries the specialized writers, then a shape-indexed [`KindDispatcher`].
//!
//! ```
//! use prettyval::ToValue;
//!
//! assert_eq!(prettyval::string(&vec![1i64, 2].to_value()), "[Vec<i64>] (len=2 cap=2) {\n\t1,\n\t2,\n}");
//! ```

use std::io;
use std::sync::LazyLock;

mod cache;
mod config;
mod error;
mod indent;
mod kind;
mod markers;
mod panics;
mod pipeline;
mod pool;
mod printer;
mod special;
mod stage;
mod state;
mod value;
mod writer;

/// Configuration tree and its option types.
pub use config::{
	ArrayConfig, BytesConfig, ChanConfig, Config, DEFAULT_ITER_MAX_LEN, DisplayConfig, FloatFormat, FuncConfig, IterConfig, KindsConfig,
	MapConfig, PanicConfig, PointerConfig, Radix, RecursionConfig, SliceConfig, StringConfig, StructConfig, TimeConfig, TypeAnnotationConfig,
	WritersConfig,
};
/// Error and result aliases.
pub use error::{PrettyError, Result};
/// Line-prefixing text adapter.
pub use indent::IndentWriter;
/// Shape-indexed dispatch table and per-shape renderers.
pub use kind::{
	ArrayWriter, BoolWriter, ChanWriter, ComplexWriter, FieldFilter, FloatWriter, FuncWriter, IntWriter, InterfaceWriter, InvalidWriter,
	KindDispatcher, MapWriter, PointerWriter, SliceWriter, StringWriter, StructWriter, UintWriter, UnsafePointerWriter,
};
/// Fixed output markers.
pub use markers::{INACCESSIBLE, INVALID, MAX_DEPTH, NIL, PANIC, RECURSION, TRUNCATED};
/// Panic recovered while rendering.
pub use panics::Caught;
/// Assembled decorator pipeline.
pub use pipeline::Pipeline;
/// Rendering entry point and its display adapter.
pub use printer::{Formatted, Printer};
/// Specialized writers.
pub use special::{
	ByteContainerWriter, BytesWriter, DecimalWriter, DisplayWriter, ErrorWriter, IterWriter, ReflectTypeWriter, TimeWriter, UniqueWriter,
	WeakWriter, builtin_writers,
};
/// Decorating stages.
pub use stage::{AccessGuard, DEFAULT_MAX_DEPTH, DepthLimit, PanicGuard, RecursionGuard, TypeAnnotator, UnwrapInterface};
/// Per-render context.
pub use state::{Scope, State, Visit};
/// Dynamic value model.
pub use value::{
	BytesHook, Capture, Chan, ErrorHook, ErrorReport, Field, Func, Handle, IterHook, Kind, Map, Methods, PairsHook, Ptr, Shape, Slice,
	TextHook, ToValue, Type, TypeBuilder, Value, WeakPtr, capture,
};
/// Writer and stage contracts.
pub use writer::{FirstOf, Stage, ValueWriter, Wrapped};

static DEFAULT: LazyLock<Printer> = LazyLock::new(Printer::default);

/// Render `value` into `sink` with the default printer.
pub fn write<W: io::Write + ?Sized>(sink: &mut W, value: &Value) -> Result<()> {
	DEFAULT.write(sink, value)
}

/// Render `value` to a string with the default printer.
pub fn string(value: &Value) -> String {
	DEFAULT.string(value)
}

/// Deferred rendering of `value` with the default printer.
pub fn formatter(value: &Value) -> Formatted<'_> {
	DEFAULT.formatter(value)
}
