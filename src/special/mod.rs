//! Writers that match specific types or hooks ahead of shape-based rendering.
//!
//! Each writer declines (writing nothing) when its type or hook is absent. Hook-based writers also
//! decline unreadable and nil values.

mod bytes;
mod error;
mod hooks;
mod number;
mod reflect;
mod refs;
mod time;

pub use bytes::{ByteContainerWriter, BytesWriter};
pub use error::ErrorWriter;
pub use hooks::{DisplayWriter, IterWriter};
pub use number::DecimalWriter;
pub use reflect::ReflectTypeWriter;
pub use refs::{UniqueWriter, WeakWriter};
pub use time::TimeWriter;

use crate::config::WritersConfig;
use crate::value::Value;
use crate::writer::FirstOf;

/// Built-in specialized writers enabled by `config`, in evaluation order.
pub fn builtin_writers(config: &WritersConfig) -> FirstOf {
	let mut writers = FirstOf::default();
	if config.reflect {
		writers.push(ReflectTypeWriter);
	}
	if let Some(time) = &config.time {
		writers.push(TimeWriter {
			format: time.format.clone(),
		});
	}
	if config.decimal {
		writers.push(DecimalWriter);
	}
	if config.weak {
		writers.push(WeakWriter);
	}
	if config.unique {
		writers.push(UniqueWriter);
	}
	if config.error {
		writers.push(ErrorWriter);
	}
	if let Some(bytes) = &config.bytes {
		writers.push(BytesWriter { config: bytes.clone() });
	}
	if config.byte_container {
		writers.push(ByteContainerWriter);
	}
	if let Some(display) = &config.display {
		writers.push(DisplayWriter {
			max_len: display.max_len,
		});
	}
	if let Some(iter) = &config.iter {
		writers.push(IterWriter { config: iter.clone() });
	}
	writers
}

/// Value whose content and hooks may be consulted.
fn usable(value: &Value) -> bool {
	value.is_readable() && value.is_valid() && !value.is_nil()
}

#[cfg(test)]
mod tests;
