//! Printer configuration.

use serde::{Deserialize, Serialize};
use serde_json::map::Entry;

use crate::error::Result;
use crate::stage::DEFAULT_MAX_DEPTH;
use crate::value::Shape;

/// Complete printer configuration.
///
/// Every field has a default, so partial JSON documents are accepted. `null` disables an
/// optional stage or writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Indentation unit for nested lines.
	pub indent: String,
	/// Panic containment; `None` lets panics propagate to the top-level guard.
	pub panic: Option<PanicConfig>,
	/// Replace interface values by their content.
	pub unwrap_interface: bool,
	/// Cycle detection.
	pub recursion: Option<RecursionConfig>,
	/// Nesting limit.
	pub max_depth: Option<usize>,
	/// Render private-field values as if public.
	pub unlock_private: bool,
	/// `[TypeName]` prefixes.
	pub type_annotation: Option<TypeAnnotationConfig>,
	/// Specialized writers tried before the kind dispatcher.
	pub writers: WritersConfig,
	/// Kind dispatcher slots.
	pub kinds: KindsConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			indent: "\t".to_owned(),
			panic: Some(PanicConfig::default()),
			unwrap_interface: true,
			recursion: Some(RecursionConfig::default()),
			max_depth: Some(DEFAULT_MAX_DEPTH),
			unlock_private: true,
			type_annotation: Some(TypeAnnotationConfig::default()),
			writers: WritersConfig::default(),
			kinds: KindsConfig::default(),
		}
	}
}

impl Config {
	/// Verbose preset: addresses, indexes, traces, and repeated type names.
	pub fn detailed() -> Self {
		let mut config = Self {
			panic: Some(PanicConfig { show_trace: true }),
			recursion: Some(RecursionConfig { show_info: true }),
			type_annotation: Some(TypeAnnotationConfig {
				show_known_types: true,
				show_base_type: true,
			}),
			..Self::default()
		};
		let kinds = &mut config.kinds;
		kinds.array.show_indexes = true;
		kinds.slice.show_indexes = true;
		kinds.slice.show_addr = true;
		kinds.map.show_addr = true;
		kinds.pointer.show_addr = true;
		kinds.chan.show_addr = true;
		kinds.func.show_addr = true;
		if let Some(bytes) = &mut config.writers.bytes {
			bytes.show_addr = true;
		}
		config
	}

	/// Parse a (possibly partial) JSON configuration.
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Apply a (possibly partial) JSON configuration on top of this one.
	///
	/// Objects merge key by key. Any other JSON value, `null` included, replaces the setting.
	pub fn merged_with_json_str(&self, text: &str) -> Result<Self> {
		let mut base = serde_json::to_value(self)?;
		merge_json(&mut base, serde_json::from_str(text)?);
		Ok(serde_json::from_value(base)?)
	}

	/// Pretty JSON form of the configuration.
	pub fn to_json_pretty(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
	match (base, patch) {
		(serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
			for (key, value) in patch {
				match base.entry(key) {
					Entry::Occupied(mut slot) => merge_json(slot.get_mut(), value),
					Entry::Vacant(slot) => {
						slot.insert(value);
					}
				}
			}
		}
		(slot, patch) => *slot = patch,
	}
}

/// Panic containment options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanicConfig {
	/// Append a backtrace below the marker.
	pub show_trace: bool,
}

/// Cycle detection options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecursionConfig {
	/// Follow `<recursion>` with the type name and address.
	pub show_info: bool,
}

/// Type annotation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeAnnotationConfig {
	/// Annotate values whose type the context already announced.
	pub show_known_types: bool,
	/// Append the base type of named types.
	pub show_base_type: bool,
}

impl Default for TypeAnnotationConfig {
	fn default() -> Self {
		Self {
			show_known_types: false,
			show_base_type: true,
		}
	}
}

/// Specialized writer switches, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritersConfig {
	/// Structured dump of `Type` values.
	pub reflect: bool,
	/// Date, time, and duration values.
	pub time: Option<TimeConfig>,
	/// Arbitrary-precision decimals.
	pub decimal: bool,
	/// Weak references.
	pub weak: bool,
	/// Unique handles.
	pub unique: bool,
	/// Error hooks.
	pub error: bool,
	/// Byte sequences as hex dumps.
	pub bytes: Option<BytesConfig>,
	/// Byte-container hooks.
	pub byte_container: bool,
	/// Display hooks.
	pub display: Option<DisplayConfig>,
	/// Iteration hooks.
	pub iter: Option<IterConfig>,
}

impl Default for WritersConfig {
	fn default() -> Self {
		Self {
			reflect: true,
			time: Some(TimeConfig::default()),
			decimal: true,
			weak: true,
			unique: true,
			error: true,
			bytes: Some(BytesConfig::default()),
			byte_container: true,
			display: Some(DisplayConfig::default()),
			iter: Some(IterConfig::default()),
		}
	}
}

/// Time writer options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
	/// `strftime` pattern; RFC 3339 when unset.
	pub format: Option<String>,
}

/// Hex dump options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BytesConfig {
	/// Show the byte count.
	pub show_len: bool,
	/// Show the capacity of growable buffers.
	pub show_cap: bool,
	/// Show the storage address.
	pub show_addr: bool,
	/// Dump at most this many bytes.
	pub max_len: Option<usize>,
}

impl Default for BytesConfig {
	fn default() -> Self {
		Self {
			show_len: true,
			show_cap: true,
			show_addr: false,
			max_len: None,
		}
	}
}

/// Display hook options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
	/// Truncate the text after this many characters.
	pub max_len: Option<usize>,
}

/// Default cap on rendered iterator items.
pub const DEFAULT_ITER_MAX_LEN: usize = 1000;

/// Iteration hook options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterConfig {
	/// Prefix items with their position.
	pub show_indexes: bool,
	/// Render at most this many items.
	pub max_len: Option<usize>,
}

impl Default for IterConfig {
	fn default() -> Self {
		Self {
			show_indexes: false,
			max_len: Some(DEFAULT_ITER_MAX_LEN),
		}
	}
}

/// Integer radix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Radix {
	/// Base 10.
	#[default]
	Decimal,
	/// Base 16 with `0x`.
	Hex,
	/// Base 8 with `0o`.
	Octal,
	/// Base 2 with `0b`.
	Binary,
}

/// Float formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatFormat {
	/// Shortest text that reads back to the same value.
	#[default]
	Shortest,
	/// Fixed number of decimals.
	Fixed(usize),
	/// Scientific notation with a fixed number of decimals.
	Exponent(usize),
}

/// String options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringConfig {
	/// Prefix `(len=N)` with the byte length.
	pub show_len: bool,
	/// Quote and escape the text.
	pub quote: bool,
	/// Truncate after this many characters.
	pub max_len: Option<usize>,
}

impl Default for StringConfig {
	fn default() -> Self {
		Self {
			show_len: true,
			quote: true,
			max_len: None,
		}
	}
}

/// Array options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
	/// Show the length.
	pub show_len: bool,
	/// Prefix elements with their index.
	pub show_indexes: bool,
	/// Render at most this many elements.
	pub max_len: Option<usize>,
}

impl Default for ArrayConfig {
	fn default() -> Self {
		Self {
			show_len: true,
			show_indexes: false,
			max_len: None,
		}
	}
}

/// Slice options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
	/// Show the length.
	pub show_len: bool,
	/// Show the capacity.
	pub show_cap: bool,
	/// Show the storage address.
	pub show_addr: bool,
	/// Prefix elements with their index.
	pub show_indexes: bool,
	/// Render at most this many elements.
	pub max_len: Option<usize>,
}

impl Default for SliceConfig {
	fn default() -> Self {
		Self {
			show_len: true,
			show_cap: true,
			show_addr: false,
			show_indexes: false,
			max_len: None,
		}
	}
}

/// Map options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
	/// Show the entry count.
	pub show_len: bool,
	/// Show the table address.
	pub show_addr: bool,
	/// Order entries by key.
	pub sort_keys: bool,
	/// Render at most this many entries.
	pub max_len: Option<usize>,
}

impl Default for MapConfig {
	fn default() -> Self {
		Self {
			show_len: true,
			show_addr: false,
			sort_keys: true,
			max_len: None,
		}
	}
}

/// Struct options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructConfig {
	/// Skip private fields.
	pub public_only: bool,
}

/// Pointer options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
	/// Show the target address.
	pub show_addr: bool,
}

/// Channel options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChanConfig {
	/// Show the buffered count.
	pub show_len: bool,
	/// Show the capacity.
	pub show_cap: bool,
	/// Show the queue address.
	pub show_addr: bool,
	/// Drain and render buffered values. Consumes them.
	pub show_elements: bool,
	/// Render at most this many drained values.
	pub max_len: Option<usize>,
}

impl Default for ChanConfig {
	fn default() -> Self {
		Self {
			show_len: true,
			show_cap: true,
			show_addr: false,
			show_elements: false,
			max_len: None,
		}
	}
}

/// Function options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuncConfig {
	/// Show the function address.
	pub show_addr: bool,
}

/// Kind dispatcher options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindsConfig {
	/// Signed integer radix.
	pub int_radix: Radix,
	/// Unsigned integer radix.
	pub uint_radix: Radix,
	/// Float and complex formatting.
	pub float: FloatFormat,
	/// Strings.
	pub string: StringConfig,
	/// Arrays.
	pub array: ArrayConfig,
	/// Slices.
	pub slice: SliceConfig,
	/// Maps.
	pub map: MapConfig,
	/// Structs.
	#[serde(rename = "struct")]
	pub structure: StructConfig,
	/// Pointers.
	pub pointer: PointerConfig,
	/// Channels.
	pub chan: ChanConfig,
	/// Functions.
	pub func: FuncConfig,
	/// Slots left empty, so values of these shapes are declined.
	pub disabled: Vec<Shape>,
}

#[cfg(test)]
mod tests;
