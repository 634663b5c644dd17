//! Decorating stages wrapped around the value writers.

mod access;
mod annotate;
mod depth;
mod panic;
mod recursion;
mod unwrap;

pub use access::AccessGuard;
pub use annotate::TypeAnnotator;
pub use depth::{DEFAULT_MAX_DEPTH, DepthLimit};
pub use panic::PanicGuard;
pub(crate) use panic::write_caught;
pub use recursion::RecursionGuard;
pub use unwrap::UnwrapInterface;
