use std::collections::HashMap;

use pretty_assertions::assert_eq;

use crate::config::{ChanConfig, FloatFormat, KindsConfig, MapConfig, PointerConfig, Radix, SliceConfig, StringConfig};
use crate::kind::{ChanWriter, FieldFilter, KindDispatcher, MapWriter, PointerWriter, SliceWriter, StringWriter, StructWriter, write_info};
use crate::state::State;
use crate::value::{Chan, Field, Func, Map, Ptr, Shape, ToValue, Type, TypeBuilder, Value};
use crate::writer::ValueWriter;

fn render(writer: &dyn ValueWriter, value: &Value) -> String {
	let mut st = State::new(writer, "\t");
	assert!(st.write_value(value), "value declined");
	st.as_str().to_owned()
}

fn render_with(kinds: KindsConfig, value: &Value) -> String {
	render(&KindDispatcher::from_config(&kinds), value)
}

fn int(v: i128) -> Value {
	Value::int(&Type::i64(), v).expect("i64 value")
}

#[test]
fn scalars_render_plainly() {
	let kinds = KindDispatcher::default();
	assert_eq!(render(&kinds, &true.to_value()), "true");
	assert_eq!(render(&kinds, &(-42i32).to_value()), "-42");
	assert_eq!(render(&kinds, &7u8.to_value()), "7");
	assert_eq!(render(&kinds, &1.5f64.to_value()), "1.5");
	assert_eq!(render(&kinds, &0.1f32.to_value()), "0.1");
	assert_eq!(render(&kinds, &Value::invalid()), "<invalid>");
	assert_eq!(render(&kinds, &Value::unsafe_pointer(0x10)), "0x10");
	assert_eq!(render(&kinds, &Value::unsafe_pointer(0)), "<nil>");
}

#[test]
fn integer_radix_keeps_sign_outside_prefix() {
	let kinds = KindsConfig {
		int_radix: Radix::Hex,
		uint_radix: Radix::Binary,
		..KindsConfig::default()
	};
	assert_eq!(render_with(kinds.clone(), &(-255i64).to_value()), "-0xff");
	assert_eq!(render_with(kinds, &5u32.to_value()), "0b101");
}

#[test]
fn float_formats() {
	let fixed = KindsConfig {
		float: FloatFormat::Fixed(2),
		..KindsConfig::default()
	};
	assert_eq!(render_with(fixed, &3.14159f64.to_value()), "3.14");
	let exponent = KindsConfig {
		float: FloatFormat::Exponent(1),
		..KindsConfig::default()
	};
	assert_eq!(render_with(exponent, &1234.5f64.to_value()), "1.2e3");
}

#[test]
fn complex_numbers_join_parts() {
	let value = Value::complex(&Type::complex128(), 1.0, -2.0).expect("complex value");
	assert_eq!(render(&KindDispatcher::default(), &value), "(1.0-2.0i)");
	let value = Value::complex(&Type::complex128(), 0.5, 3.0).expect("complex value");
	assert_eq!(render(&KindDispatcher::default(), &value), "(0.5+3.0i)");
}

#[test]
fn strings_quote_and_truncate_by_chars() {
	assert_eq!(render(&StringWriter::default(), &"a\"b\n".to_value()), "(len=4) \"a\\\"b\\n\"");
	let writer = StringWriter {
		config: StringConfig {
			max_len: Some(3),
			..StringConfig::default()
		},
	};
	assert_eq!(render(&writer, &"héllo".to_value()), "(len=6) \"hél\" <truncated>");
	let writer = StringWriter {
		config: StringConfig {
			show_len: false,
			quote: false,
			max_len: None,
		},
	};
	assert_eq!(render(&writer, &"plain".to_value()), "plain");
}

#[test]
fn slices_show_len_and_cap() {
	let kinds = KindDispatcher::default();
	assert_eq!(render(&kinds, &vec![1i64, 2, 3].to_value()), "(len=3 cap=3) {\n\t1,\n\t2,\n\t3,\n}");
	assert_eq!(render(&kinds, &Vec::<i64>::new().to_value()), "(len=0 cap=0) {}");
	assert_eq!(render(&kinds, &Value::nil_slice(&Type::i64())), "<nil>");
}

#[test]
fn slices_truncate_once_with_indexes() {
	let mut kinds = KindDispatcher::default();
	kinds.set(
		Shape::Slice,
		SliceWriter {
			config: SliceConfig {
				show_indexes: true,
				max_len: Some(2),
				..SliceConfig::default()
			},
		},
	);
	let out = render(&kinds, &vec![1i64, 2, 3].to_value());
	assert_eq!(out, "(len=3 cap=3) {\n\t0: 1,\n\t1: 2,\n\t<truncated>\n}");
	assert_eq!(out.matches("<truncated>").count(), 1);
}

#[test]
fn arrays_show_len_only() {
	assert_eq!(render(&KindDispatcher::default(), &[4i16, 5].to_value()), "(len=2) {\n\t4,\n\t5,\n}");
}

#[test]
fn nested_blocks_indent_per_level() {
	let value = vec![vec![1i64], vec![]].to_value();
	assert_eq!(
		render(&KindDispatcher::default(), &value),
		"(len=2 cap=2) {\n\t(len=1 cap=1) {\n\t\t1,\n\t},\n\t(len=0 cap=0) {},\n}"
	);
}

#[test]
fn maps_sort_string_keys() {
	let map: HashMap<String, i64> = [("foo".to_owned(), 1), ("bar".to_owned(), 2)].into_iter().collect();
	assert_eq!(
		render(&KindDispatcher::default(), &map.to_value()),
		"(len=2) {\n\t(len=3) \"bar\": 2,\n\t(len=3) \"foo\": 1,\n}"
	);
}

#[test]
fn maps_sort_mixed_keys_by_rank() {
	let any = Type::interface("Any");
	let map = Map::new(&any, &Type::i64());
	let wrap = |inner: Value| Value::interface(&any, inner).expect("interface value");
	map.insert(wrap("b".to_value()), int(1));
	map.insert(wrap(int(3)), int(2));
	map.insert(wrap(false.to_value()), int(3));
	map.insert(Value::nil_interface(&any).expect("nil interface"), int(4));
	assert_eq!(
		render(&KindDispatcher::default(), &Value::map(&map)),
		"(len=4) {\n\t<nil>: 4,\n\tfalse: 3,\n\t3: 2,\n\t(len=1) \"b\": 1,\n}"
	);
}

#[test]
fn maps_order_unnatural_keys_by_rendered_text() {
	let key_ty = TypeBuilder::structure("Key").field("id", &Type::i64()).build();
	let key = |id| Value::structure(&key_ty, vec![int(id)]).expect("key value");
	let map = Map::new(&key_ty, &Type::bool());
	map.insert(key(2), true.to_value());
	map.insert(key(1), false.to_value());
	assert_eq!(
		render(&KindDispatcher::default(), &Value::map(&map)),
		"(len=2) {\n\t{\n\t\tid: 1,\n\t}: false,\n\t{\n\t\tid: 2,\n\t}: true,\n}"
	);
}

#[test]
fn unsorted_maps_keep_insertion_order() {
	let map = Map::new(&Type::string(), &Type::i64());
	map.insert("b".to_value(), int(1));
	map.insert("a".to_value(), int(2));
	let writer = MapWriter {
		config: MapConfig {
			show_len: false,
			sort_keys: false,
			..MapConfig::default()
		},
	};
	let mut kinds = KindDispatcher::default();
	kinds.set(Shape::Map, writer);
	assert_eq!(render(&kinds, &Value::map(&map)), "{\n\t(len=1) \"b\": 1,\n\t(len=1) \"a\": 2,\n}");
	assert_eq!(render(&kinds, &Value::nil_map(&Type::string(), &Type::i64())), "<nil>");
}

#[test]
fn structs_filter_fields() {
	let ty = TypeBuilder::structure("Point").field("x", &Type::i64()).private_field("y", &Type::i64()).build();
	let value = Value::structure(&ty, vec![int(1), int(2)]).expect("point value");
	assert_eq!(render(&KindDispatcher::default(), &value), "{\n\tx: 1,\n\ty: 2,\n}");

	let mut kinds = KindDispatcher::default();
	kinds.set(Shape::Struct, StructWriter {
		filter: FieldFilter::PublicOnly,
	});
	assert_eq!(render(&kinds, &value), "{\n\tx: 1,\n}");

	kinds.set(Shape::Struct, StructWriter {
		filter: FieldFilter::Custom(std::sync::Arc::new(|field: &Field| field.name() == "y")),
	});
	assert_eq!(render(&kinds, &value), "{\n\ty: 2,\n}");

	let empty = Value::structure(&TypeBuilder::structure("Empty").build(), Vec::new()).expect("empty value");
	assert_eq!(render(&KindDispatcher::default(), &empty), "{}");
}

#[test]
fn pointers_dereference() {
	let ptr = Ptr::new(&Type::i64(), int(5));
	let value = Value::pointer(&ptr);
	assert_eq!(render(&KindDispatcher::default(), &value), "&5");
	assert_eq!(render(&KindDispatcher::default(), &Value::nil_pointer(&Type::i64())), "<nil>");

	let writer = PointerWriter {
		config: PointerConfig { show_addr: true },
	};
	let mut kinds = KindDispatcher::default();
	kinds.set(Shape::Pointer, writer);
	assert_eq!(render(&kinds, &value), format!("(addr=0x{:x}) &5", ptr.addr()));
}

#[test]
fn interfaces_render_content() {
	let any = Type::interface("Any");
	let value = Value::interface(&any, int(9)).expect("interface value");
	assert_eq!(render(&KindDispatcher::default(), &value), "9");
	assert_eq!(render(&KindDispatcher::default(), &Value::nil_interface(&any).expect("nil interface")), "<nil>");
}

#[test]
fn channels_drain_only_when_asked() {
	let chan = Chan::new(&Type::i64(), 4);
	chan.send(int(1)).expect("send");
	chan.send(int(2)).expect("send");
	let value = Value::chan(&chan);
	assert_eq!(render(&KindDispatcher::default(), &value), "(len=2 cap=4)");
	assert_eq!(chan.len(), 2);

	let mut kinds = KindDispatcher::default();
	kinds.set(
		Shape::Chan,
		ChanWriter {
			config: ChanConfig {
				show_elements: true,
				..ChanConfig::default()
			},
		},
	);
	assert_eq!(render(&kinds, &value), "(len=2 cap=4) {\n\t1,\n\t2,\n}");
	assert!(chan.is_empty());
	assert_eq!(render(&kinds, &Value::nil_chan(&Type::i64())), "<nil>");
}

#[test]
fn locked_channels_are_marked_inaccessible() {
	let chan = Chan::new(&Type::i64(), 2);
	chan.send(int(5)).expect("send");
	let locked = Value::chan(&chan).into_unreadable();

	let mut kinds = KindDispatcher::default();
	kinds.set(
		Shape::Chan,
		ChanWriter {
			config: ChanConfig {
				show_elements: true,
				..ChanConfig::default()
			},
		},
	);
	assert_eq!(render(&kinds, &locked), "(len=1 cap=2) <inaccessible>");
	assert_eq!(chan.len(), 1);
}

#[test]
fn functions_render_by_name() {
	let func = Func::new(&Type::func(&[Type::i64()], &[]), "jobs::run");
	assert_eq!(render(&KindDispatcher::default(), &Value::func(&func)), "jobs::run");
}

#[test]
fn cleared_slot_declines_without_output() {
	let kinds = KindDispatcher::from_config(&KindsConfig {
		disabled: vec![Shape::Bool],
		..KindsConfig::default()
	});
	let mut st = State::new(&kinds, "\t");
	assert!(!st.write_value(&true.to_value()));
	assert_eq!(st.as_str(), "");
	assert!(kinds.get(Shape::Bool).is_none());
	assert!(kinds.get(Shape::Int).is_some());
	assert!(KindDispatcher::empty().get(Shape::Int).is_none());
}

#[test]
fn info_is_omitted_when_empty() {
	let kinds = KindDispatcher::empty();
	let mut st = State::new(&kinds, "\t");
	assert!(!write_info(&mut st, None, None, None));
	assert!(write_info(&mut st, Some(1), None, Some(0xab)));
	assert_eq!(st.as_str(), "(len=1 addr=0xab)");
}
