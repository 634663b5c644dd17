use std::collections::HashMap;
use std::rc::Rc;

use crate::error::PrettyError;
use crate::value::{Chan, Field, Handle, Kind, Map, Ptr, Shape, Slice, ToValue, Type, TypeBuilder, Value, WeakPtr};

#[test]
fn builtin_and_composite_types_are_interned() {
	assert_eq!(Type::i64(), Type::i64());
	assert_eq!(Type::slice_of(&Type::i64()), Type::slice_of(&Type::i64()));
	assert_ne!(Type::slice_of(&Type::i64()), Type::slice_of(&Type::i32()));

	assert_eq!(Type::slice_of(&Type::i64()).name(), "Vec<i64>");
	assert_eq!(Type::array_of(&Type::u8(), 4).name(), "[u8; 4]");
	assert_eq!(Type::map_of(&Type::string(), &Type::i64()).name(), "HashMap<String, i64>");
	assert_eq!(Type::pointer_to(&Type::f64()).name(), "&f64");
	assert_eq!(Type::chan_of(&Type::bool()).name(), "Channel<bool>");
	assert_eq!(Type::func(&[Type::i64(), Type::string()], &[Type::bool()]).name(), "fn(i64, String) -> bool");
	assert_eq!(Type::func(&[], &[]).name(), "fn()");
	assert_eq!(Type::tuple(&[Type::i64(), Type::string()]).name(), "(i64, String)");
	assert_eq!(Type::interface("Any").name(), "dyn Any");
	assert_eq!(Type::array_of(&Type::u8(), 4).size(), Some(4));
}

#[test]
fn kinds_map_to_dispatch_shapes() {
	assert_eq!(Kind::I16.shape(), Shape::Int);
	assert_eq!(Kind::Usize.shape(), Shape::Uint);
	assert_eq!(Kind::Complex64.shape(), Shape::Complex);
	assert!(Kind::Pointer.has_identity());
	assert!(!Kind::Func.has_identity());
	assert!(Kind::UnsafePointer.is_nilable());
	for (idx, shape) in Shape::ALL.iter().enumerate() {
		assert_eq!(shape.index(), idx);
	}
}

#[test]
fn struct_fields_track_visibility() {
	let ty = TypeBuilder::structure("Account").field("name", &Type::string()).private_field("balance", &Type::i64()).build();
	let value = Value::structure(&ty, vec![Value::string("ada"), 10_i64.to_value()]).expect("struct value");

	let name = value.field(0).expect("name field");
	let balance = value.field_by_name("balance").expect("balance field");
	assert!(name.is_readable());
	assert!(!balance.is_readable());
	assert_eq!(balance.as_i128(), Some(10));
	assert!(balance.unlock().expect("unlock").is_readable());
}

#[test]
fn struct_construction_checks_field_count() {
	let ty = TypeBuilder::structure("Pair").field("a", &Type::i64()).field("b", &Type::i64()).build();
	let err = Value::structure(&ty, vec![1_i64.to_value()]).expect_err("missing field");
	assert!(matches!(err, PrettyError::FieldCount { expected: 2, got: 1, .. }));
}

#[test]
fn fields_can_be_defined_once_after_creation() {
	let node = TypeBuilder::structure("Node").build();
	assert!(!node.has_fields());
	node.set_fields(vec![Field::public("value", &Type::i64()), Field::public("next", &Type::pointer_to(&node))])
		.expect("define fields");
	assert_eq!(node.fields().len(), 2);
	assert_eq!(node.field(1).expect("next").ty().elem(), Some(&node));

	let err = node.set_fields(Vec::new()).expect_err("second definition");
	assert!(matches!(err, PrettyError::FieldsAlreadyDefined { .. }));
}

#[test]
fn scalar_constructors_reject_wrong_kinds() {
	let err = Value::int(&Type::string(), 1).expect_err("string is not an int");
	assert!(matches!(err, PrettyError::KindMismatch { .. }));
	assert_eq!(Value::int(&Type::i8(), -3).expect("i8").as_i128(), Some(-3));
}

#[test]
fn named_types_keep_base_structure() {
	let celsius = TypeBuilder::named("Celsius", &Type::f64()).display(|v| format!("{}C", v.as_f64().unwrap_or_default())).build();
	assert_eq!(celsius.kind(), Kind::F64);
	assert_eq!(celsius.base(), Some(&Type::f64()));
	assert!(celsius.implements("Display"));

	let value = 21.5_f64.to_value().typed(&celsius).expect("retype");
	assert_eq!(value.ty().name(), "Celsius");
	assert!(1_i64.to_value().typed(&celsius).is_err());
}

#[test]
fn unreadable_values_propagate_to_children() {
	let value = vec![1_i64, 2].to_value().into_unreadable();
	assert!(value.elements().iter().all(|item| !item.is_readable()));
	assert!(!value.index(0).expect("element").is_readable());
}

#[test]
fn nil_values_report_nil() {
	assert!(Value::nil_slice(&Type::i64()).is_nil());
	assert!(Value::nil_map(&Type::string(), &Type::i64()).is_nil());
	assert!(Value::nil_pointer(&Type::i64()).is_nil());
	assert!(Value::nil_interface(&Type::interface("Any")).expect("iface").is_nil());
	assert!(Value::unsafe_pointer(0).is_nil());
	assert!(!Value::unsafe_pointer(0x10).is_nil());
	assert!(!Value::invalid().is_valid());
}

#[test]
fn map_insert_replaces_equal_keys() {
	let map = Map::new(&Type::string(), &Type::i64());
	assert!(map.insert(Value::string("a"), 1_i64.to_value()).is_none());
	let old = map.insert(Value::string("a"), 2_i64.to_value()).expect("replaced");
	assert_eq!(old.as_i128(), Some(1));
	assert_eq!(map.len(), 1);
	assert_eq!(map.get(&Value::string("a")).and_then(|v| v.as_i128()), Some(2));
}

#[test]
fn slices_track_capacity_and_alias_storage() {
	let slice = Slice::with_capacity(&Type::i64(), vec![1_i64.to_value()], 8);
	let value = Value::slice(&slice);
	slice.push(2_i64.to_value());
	assert_eq!(value.len(), 2);
	assert_eq!(value.cap(), 8);
	assert_eq!(value.addr(), Some(slice.addr()));
}

#[test]
fn channels_buffer_up_to_capacity() {
	let chan = Chan::new(&Type::i64(), 2);
	chan.send(1_i64.to_value()).expect("first");
	chan.send(2_i64.to_value()).expect("second");
	assert!(chan.send(3_i64.to_value()).is_err());
	assert_eq!(chan.recv().and_then(|v| v.as_i128()), Some(1));
	assert_eq!(chan.drain().len(), 1);
	assert!(chan.is_empty());
}

#[test]
fn shared_rc_targets_become_one_cell() {
	let shared = Rc::new(5_i64);
	let value = vec![shared.clone(), shared].to_value();
	let items = value.elements();
	assert_eq!(items[0].ty().name(), "Rc<i64>");
	assert_eq!(items[0].addr(), items[1].addr());
}

#[test]
fn weak_references_follow_captured_targets() {
	let strong = Rc::new(7_i64);
	let pair = (strong.clone(), Rc::downgrade(&strong)).to_value();
	let weak = pair.field(1).expect("weak field");
	let upgraded = weak.native::<WeakPtr>().and_then(WeakPtr::upgrade).expect("alive");
	assert_eq!(upgraded.get().as_i128(), Some(7));

	let dead = WeakPtr::dangling(&Type::i64());
	assert!(dead.upgrade().is_none());
}

#[test]
fn unique_handles_share_equal_values() {
	let a = Handle::make(Value::string("shared")).expect("intern");
	let b = Handle::make(Value::string("shared")).expect("intern");
	let c = Handle::make(Value::string("other")).expect("intern");
	assert!(a.ptr_eq(&b));
	assert!(!a.ptr_eq(&c));

	let err = Handle::make(vec![1_i64].to_value()).err().expect("slices are not comparable");
	assert!(matches!(err, PrettyError::NotComparable { .. }));
}

#[test]
fn pointer_cells_alias_on_clone() {
	let ptr = Ptr::new(&Type::i64(), 1_i64.to_value());
	let value = Value::pointer(&ptr);
	ptr.set(2_i64.to_value());
	assert_eq!(value.elem().and_then(|v| v.as_i128()), Some(2));
}

#[test]
fn std_collections_convert_with_rust_names() {
	let mut map = HashMap::new();
	map.insert("k".to_owned(), vec![1_u8]);
	assert_eq!(map.to_value().ty().name(), "HashMap<String, Vec<u8>>");
	assert_eq!(Some(3_i32).to_value().ty().name(), "Option<i32>");
	assert_eq!([1_u16, 2].to_value().ty().name(), "[u16; 2]");
	assert_eq!((1_i64, "x").to_value().ty().name(), "(i64, String)");
	assert_eq!(Box::new(1.5_f32).to_value().ty().name(), "Box<f32>");
}
