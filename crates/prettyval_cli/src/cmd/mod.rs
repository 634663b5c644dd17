/// Effective configuration dump.
pub mod config;
/// JSON document rendering.
pub mod render;
