use crate::config::{Config, FloatFormat, Radix};
use crate::value::Shape;

#[test]
fn partial_json_keeps_defaults() {
	let config = Config::from_json_str(r#"{"max_depth": 3, "kinds": {"map": {"sort_keys": false}}}"#).expect("parse config");
	assert_eq!(config.max_depth, Some(3));
	assert!(!config.kinds.map.sort_keys);
	assert!(config.kinds.map.show_len);
	assert_eq!(config.indent, "\t");
	assert!(config.panic.is_some());
}

#[test]
fn null_disables_optional_stages() {
	let config = Config::from_json_str(r#"{"panic": null, "type_annotation": null, "writers": {"bytes": null}}"#).expect("parse config");
	assert!(config.panic.is_none());
	assert!(config.type_annotation.is_none());
	assert!(config.writers.bytes.is_none());
	assert!(config.writers.display.is_some());
}

#[test]
fn enums_use_snake_case() {
	let config = Config::from_json_str(r#"{"kinds": {"int_radix": "hex", "float": {"fixed": 2}, "disabled": ["func", "unsafe_pointer"]}}"#)
		.expect("parse config");
	assert_eq!(config.kinds.int_radix, Radix::Hex);
	assert_eq!(config.kinds.float, FloatFormat::Fixed(2));
	assert_eq!(config.kinds.disabled, vec![Shape::Func, Shape::UnsafePointer]);
}

#[test]
fn json_round_trip_preserves_presets() {
	let detailed = Config::detailed();
	let text = detailed.to_json_pretty().expect("serialize");
	assert_eq!(Config::from_json_str(&text).expect("parse"), detailed);
}

#[test]
fn unknown_json_is_rejected_as_error() {
	assert!(Config::from_json_str("{\"max_depth\": \"deep\"}").is_err());
}

#[test]
fn merging_keeps_the_base_preset() {
	let config = Config::detailed()
		.merged_with_json_str(r#"{"recursion": null, "kinds": {"slice": {"show_cap": false}}, "writers": {"iter": {"max_len": 5}}}"#)
		.expect("merge config");
	assert!(config.recursion.is_none());
	assert!(!config.kinds.slice.show_cap);
	assert!(config.kinds.slice.show_indexes);
	assert!(config.kinds.slice.show_addr);
	assert_eq!(config.writers.iter.as_ref().and_then(|iter| iter.max_len), Some(5));
	assert!(config.panic.as_ref().is_some_and(|panic| panic.show_trace));
}
