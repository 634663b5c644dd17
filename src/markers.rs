//! Fixed output markers.

/// Nil references, empty interfaces, and null addresses.
pub const NIL: &str = "<nil>";
/// Zero value.
pub const INVALID: &str = "<invalid>";
/// Value already being rendered on the current path.
pub const RECURSION: &str = "<recursion>";
/// Nesting limit reached.
pub const MAX_DEPTH: &str = "<max depth>";
/// Output was capped.
pub const TRUNCATED: &str = "<truncated>";
/// Prefix of a contained panic.
pub const PANIC: &str = "<panic>";
/// Content that could not be read.
pub const INACCESSIBLE: &str = "<inaccessible>";
