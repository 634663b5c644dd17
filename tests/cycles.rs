#![allow(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use pretty_assertions::assert_eq;
use prettyval::{Capture, Field, Kind, Map, Slice, ToValue, Type, TypeBuilder, Value};

struct Node {
	name: String,
	next: RefCell<Option<Rc<Node>>>,
}

static NODE: LazyLock<Type> = LazyLock::new(|| {
	let node = TypeBuilder::structure("Node").build();
	let rc = Type::generic(Kind::Pointer, "Rc<Node>", Some(&node), None);
	let next = Type::generic(Kind::Interface, "Option<Rc<Node>>", Some(&rc), None);
	node.set_fields(vec![Field::public("name", &Type::string()), Field::public("next", &next)])
		.expect("define node fields");
	node
});

impl ToValue for Node {
	fn value_type() -> Type {
		NODE.clone()
	}

	fn capture(&self, cx: &mut Capture) -> Value {
		Value::structure(&NODE, vec![self.name.capture(cx), self.next.capture(cx)]).expect("node value")
	}
}

fn any() -> Type {
	Type::interface("Any")
}

#[test]
fn slice_containing_itself_terminates() {
	let slice = Slice::new(&any(), Vec::new());
	slice.push(Value::interface(&any(), Value::slice(&slice)).expect("interface"));

	let out = prettyval::string(&Value::slice(&slice));
	assert_eq!(out.matches("<recursion>").count(), 1, "unexpected output: {out}");
	assert!(out.starts_with("[Vec<dyn Any>] (len=1 cap="), "unexpected output: {out}");
	assert!(out.ends_with(" {\n\t<recursion>,\n}"), "unexpected output: {out}");
}

#[test]
fn map_containing_itself_terminates() {
	let map = Map::new(&Type::string(), &any());
	map.insert(Value::string("self"), Value::interface(&any(), Value::map(&map)).expect("interface"));

	let out = prettyval::string(&Value::map(&map));
	assert_eq!(out, "[HashMap<String, dyn Any>] (len=1) {\n\t(len=4) \"self\": <recursion>,\n}");
}

#[test]
fn captured_rc_cycle_terminates() {
	let head = Rc::new(Node {
		name: "a".to_owned(),
		next: RefCell::new(None),
	});
	*head.next.borrow_mut() = Some(Rc::clone(&head));

	let value = head.to_value();
	head.next.borrow_mut().take();

	let out = prettyval::string(&value);
	assert_eq!(out.matches("<recursion>").count(), 1, "unexpected output: {out}");
	assert!(out.contains("\tname: [String] (len=1) \"a\",\n"), "unexpected output: {out}");
	assert!(out.contains("\tnext: <recursion>,\n"), "unexpected output: {out}");
}

#[test]
fn two_node_rc_cycle_marks_the_reentry_once() {
	let a = Rc::new(Node {
		name: "a".to_owned(),
		next: RefCell::new(None),
	});
	let b = Rc::new(Node {
		name: "b".to_owned(),
		next: RefCell::new(Some(Rc::clone(&a))),
	});
	*a.next.borrow_mut() = Some(Rc::clone(&b));

	let value = a.to_value();
	a.next.borrow_mut().take();

	let out = prettyval::string(&value);
	assert_eq!(out.matches("<recursion>").count(), 1, "unexpected output: {out}");
	assert!(out.contains("(len=1) \"b\""), "unexpected output: {out}");
}
