use pretty_assertions::assert_eq;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::printer::Printer;
use crate::state::State;
use crate::value::{Ptr, Slice, ToValue, Type, TypeBuilder, Value};

fn render(pipeline: Pipeline, value: &Value) -> String {
	Printer::new(pipeline).string(value)
}

fn self_pointer() -> Value {
	let any = Type::interface("Any");
	let ptr = Ptr::new(&any, Value::invalid());
	ptr.set(Value::interface(&any, Value::pointer(&ptr)).expect("interface"));
	Value::pointer(&ptr)
}

fn exploding() -> Value {
	let ty = TypeBuilder::structure("Fuse").display(|_: &Value| -> String { panic!("boom") }).build();
	Value::structure(&ty, Vec::new()).expect("fuse value")
}

fn yes_for_bools(st: &mut State<'_>, value: &Value) -> bool {
	if value.as_bool().is_none() {
		return false;
	}
	st.write_str("yes");
	true
}

#[test]
fn default_pipeline_annotates_scalars() {
	assert_eq!(render(Pipeline::default(), &123i64.to_value()), "[i64] 123");
	assert_eq!(render(Pipeline::default(), &"test".to_value()), "[String] (len=4) \"test\"");
}

#[test]
fn cleared_annotation_drops_prefixes() {
	let mut pipeline = Pipeline::default();
	pipeline.annotate = None;
	assert_eq!(render(pipeline, &vec![1i64].to_value()), "(len=1 cap=1) {\n\t1,\n}");
}

#[test]
fn unwrapping_announces_the_concrete_type() {
	let any = Type::interface("Any");
	let value = Value::interface(&any, 5i64.to_value()).expect("interface");
	assert_eq!(render(Pipeline::default(), &value), "[i64] 5");

	let mut pipeline = Pipeline::default();
	pipeline.unwrap = None;
	assert_eq!(render(pipeline, &value), "[dyn Any] [i64] 5");
}

#[test]
fn self_reference_stops_at_one_marker() {
	let out = render(Pipeline::default(), &self_pointer());
	assert_eq!(out, "[&dyn Any] &<recursion>");
	assert_eq!(out.matches("<recursion>").count(), 1);
}

#[test]
fn depth_limit_marks_deep_branches() {
	let config = Config {
		max_depth: Some(1),
		..Config::default()
	};
	let value = vec![vec![1i64]].to_value();
	assert_eq!(render(Pipeline::from_config(&config), &value), "[Vec<Vec<i64>>] (len=1 cap=1) {\n\t<max depth>,\n}");
}

#[test]
fn depth_limit_also_ends_cycles_without_recursion_guard() {
	let mut pipeline = Pipeline::from_config(&Config {
		max_depth: Some(3),
		..Config::default()
	});
	pipeline.recursion = None;
	assert_eq!(render(pipeline, &self_pointer()), "[&dyn Any] &[&dyn Any] &[&dyn Any] &<max depth>");
}

#[test]
fn panics_stay_inline() {
	let fuse = exploding();
	let slice = Slice::new(fuse.ty(), vec![fuse.clone(), fuse.clone()]);
	let out = render(Pipeline::default(), &Value::slice(&slice));
	assert_eq!(out, "[Vec<Fuse>] (len=2 cap=2) {\n\t<panic>: boom,\n\t<panic>: boom,\n}");
}

#[test]
fn specialized_writers_run_before_kinds() {
	let mut pipeline = Pipeline::default();
	pipeline.writers.push_front(yes_for_bools);
	assert_eq!(render(pipeline, &true.to_value()), "[bool] yes");
}

#[test]
fn declined_values_leave_no_annotation() {
	let mut pipeline = Pipeline::default();
	pipeline.kinds = None;
	let mut sink = Vec::new();
	let err = Printer::new(pipeline).write(&mut sink, &1i64.to_value()).expect_err("no renderer for i64");
	assert!(err.to_string().contains("i64"));
	assert!(sink.is_empty());
}
