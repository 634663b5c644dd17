use std::fmt;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PrettyError>;

/// Errors produced while building values, loading configuration, and writing rendered output.
#[derive(Debug, Error)]
pub enum PrettyError {
	/// Output sink or input stream failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON input or configuration could not be parsed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// A `Serialize` implementation reported an error during capture.
	#[error("capture: {0}")]
	Capture(String),
	/// Struct value was built with the wrong number of fields.
	#[error("struct {type_name} expects {expected} fields, got {got}")]
	FieldCount {
		/// Struct type name.
		type_name: String,
		/// Declared field count.
		expected: usize,
		/// Supplied field count.
		got: usize,
	},
	/// Value kind does not match the requested type.
	#[error("kind mismatch: expected {expected}, got {got}")]
	KindMismatch {
		/// Kind required by the operation.
		expected: String,
		/// Kind actually supplied.
		got: String,
	},
	/// Struct fields can only be defined once per type.
	#[error("fields already defined for {type_name}")]
	FieldsAlreadyDefined {
		/// Struct type name.
		type_name: String,
	},
	/// Value has no canonical identity (slices, maps, functions).
	#[error("value of type {type_name} is not comparable")]
	NotComparable {
		/// Type of the rejected value.
		type_name: String,
	},
	/// No writer in the pipeline accepted the top-level value.
	#[error("no writer handled value of type {type_name}")]
	Unhandled {
		/// Type of the declined value.
		type_name: String,
	},
}

impl serde::ser::Error for PrettyError {
	fn custom<T: fmt::Display>(msg: T) -> Self {
		Self::Capture(msg.to_string())
	}
}
