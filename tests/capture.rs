#![allow(missing_docs)]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Serialize)]
struct Order {
	id: u32,
	tags: Vec<String>,
	note: Option<String>,
}

#[derive(Serialize)]
enum Shape {
	Circle { r: f64 },
	Unit,
	Pair(i32, i32),
}

#[derive(Serialize)]
struct Meters(f64);

#[derive(Serialize)]
struct Sparse {
	id: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	left: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	right: Option<i64>,
}

mod north {
	#[derive(serde::Serialize)]
	pub struct Item {
		pub width: u32,
	}
}

mod south {
	#[derive(serde::Serialize)]
	pub struct Item {
		pub height: u32,
	}
}

#[test]
fn structs_keep_names_and_field_order() {
	let order = Order {
		id: 7,
		tags: vec!["a".to_owned(), "b".to_owned()],
		note: None,
	};
	let value = prettyval::capture(&order).expect("capture order");
	assert_eq!(
		prettyval::string(&value),
		"[Order] {\n\tid: [u32] 7,\n\ttags: [Vec<String>] (len=2 cap=2) {\n\t\t(len=1) \"a\",\n\t\t(len=1) \"b\",\n\t},\n\tnote: <nil>,\n}"
	);
}

#[test]
fn present_options_unwrap_to_their_content() {
	let order = Order {
		id: 1,
		tags: Vec::new(),
		note: Some("rush".to_owned()),
	};
	let out = prettyval::string(&prettyval::capture(&order).expect("capture order"));
	assert!(out.contains("\tnote: [String] (len=4) \"rush\",\n"), "unexpected output: {out}");
}

#[test]
fn enum_variants_become_named_structs() {
	let circle = prettyval::capture(&Shape::Circle { r: 1.5 }).expect("capture circle");
	assert_eq!(prettyval::string(&circle), "[Shape::Circle] {\n\tr: [f64] 1.5,\n}");

	let unit = prettyval::capture(&Shape::Unit).expect("capture unit");
	assert_eq!(prettyval::string(&unit), "[Shape::Unit] {}");

	let pair = prettyval::capture(&Shape::Pair(1, -2)).expect("capture pair");
	assert_eq!(prettyval::string(&pair), "[Shape::Pair] {\n\t0: [i32] 1,\n\t1: [i32] -2,\n}");
}

#[test]
fn newtypes_wrap_one_field() {
	let value = prettyval::capture(&Meters(2.0)).expect("capture meters");
	assert_eq!(prettyval::string(&value), "[Meters] {\n\t0: [f64] 2.0,\n}");
}

#[test]
fn maps_take_the_types_of_their_entries() {
	let mut scores = BTreeMap::new();
	scores.insert("b", 2_u8);
	scores.insert("a", 1_u8);
	let value = prettyval::capture(&scores).expect("capture map");
	assert_eq!(prettyval::string(&value), "[Map<String, u8>] (len=2) {\n\t(len=1) \"a\": 1,\n\t(len=1) \"b\": 2,\n}");
}

#[test]
fn mixed_sequences_are_wrapped_in_slots() {
	let value = prettyval::capture(&serde_json::json!([-1, "two", true])).expect("capture json");
	let out = prettyval::string(&value);
	assert!(out.starts_with("[Vec<dyn Serialize>] (len=3 cap=3) {\n"), "unexpected output: {out}");
	assert!(out.contains("\t[i64] -1,\n"));
	assert!(out.contains("\t[String] (len=3) \"two\",\n"));
	assert!(out.contains("\t[bool] true,\n"));
}

#[test]
fn skipped_fields_keep_the_remaining_names() {
	let left = Sparse {
		id: 1,
		left: Some(3),
		right: None,
	};
	let right = Sparse {
		id: 2,
		left: None,
		right: Some(9),
	};
	let left = prettyval::capture(&left).expect("capture left");
	let right = prettyval::capture(&right).expect("capture right");

	assert_eq!(prettyval::string(&left), "[Sparse] {\n\tid: [i64] 1,\n\tleft: [i64] 3,\n}");
	assert_eq!(prettyval::string(&right), "[Sparse] {\n\tid: [i64] 2,\n\tright: [i64] 9,\n}");
}

#[test]
fn same_short_name_with_different_fields_stays_distinct() {
	let wide = prettyval::capture(&north::Item { width: 1 }).expect("capture north item");
	let tall = prettyval::capture(&south::Item { height: 2 }).expect("capture south item");

	assert_eq!(prettyval::string(&wide), "[Item] {\n\twidth: [u32] 1,\n}");
	assert_eq!(prettyval::string(&tall), "[Item] {\n\theight: [u32] 2,\n}");
	assert_ne!(wide.ty(), tall.ty());
}
