use std::io;
use std::time::{Duration, UNIX_EPOCH};

use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use super::bytes::hexdump;
use crate::config::{BytesConfig, Config, IterConfig, TimeConfig};
use crate::printer::Printer;
use crate::value::{Handle, Ptr, ToValue, Type, TypeBuilder, Value};

#[derive(Debug, thiserror::Error)]
#[error("load failed")]
struct LoadError(#[source] io::Error);

fn render(value: &Value) -> String {
	Printer::default().string(value)
}

fn render_with(config: Config, value: &Value) -> String {
	Printer::from_config(&config).string(value)
}

fn int(v: i128) -> Value {
	Value::int(&Type::i64(), v).expect("i64 value")
}

#[test]
fn decimals_render_exact_text() {
	assert_eq!(render(&Decimal::new(12345, 2).to_value()), "[Decimal] => Display 123.45");
}

#[test]
fn timestamps_render_as_rfc3339() {
	let utc = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid time");
	assert_eq!(render(&utc.to_value()), "[DateTime<Utc>] => to_rfc3339() 2024-01-02T03:04:05Z");

	let offset = FixedOffset::east_opt(3600).expect("valid offset");
	let local = offset.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid time");
	assert_eq!(render(&local.to_value()), "[DateTime<FixedOffset>] => to_rfc3339() 2024-01-02T03:04:05+01:00");

	let date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
	assert_eq!(render(&date.to_value()), "[NaiveDate] => Debug 2024-01-02");

	let system = UNIX_EPOCH + Duration::from_secs(86_400);
	assert_eq!(render(&system.to_value()), "[SystemTime] => to_rfc3339() 1970-01-02T00:00:00Z");
}

#[test]
fn durations_use_compact_forms() {
	assert_eq!(render(&Duration::from_millis(1500).to_value()), "[Duration] => Debug 1.5s");
	assert_eq!(render(&TimeDelta::try_seconds(90).expect("valid delta").to_value()), "[TimeDelta] => Display PT90S");
}

#[test]
fn time_patterns_fall_back_when_invalid() {
	let utc = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid time");
	let mut config = Config::default();
	config.writers.time = Some(TimeConfig {
		format: Some("%Y/%m/%d".to_owned()),
	});
	assert_eq!(render_with(config.clone(), &utc.to_value()), "[DateTime<Utc>] => format() 2024/01/02");
	let date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
	assert_eq!(render_with(config.clone(), &date.to_value()), "[NaiveDate] => format() 2024/01/02");

	config.writers.time = Some(TimeConfig {
		format: Some("%Q".to_owned()),
	});
	assert_eq!(render_with(config, &utc.to_value()), "[DateTime<Utc>] => to_rfc3339() 2024-01-02T03:04:05Z");
}

#[test]
fn disabled_time_writer_shows_structure() {
	let mut config = Config::default();
	config.writers.time = None;
	let out = render_with(config, &Duration::from_secs(2).to_value());
	assert_eq!(out, "[Duration] {\n\tsecs: [u64] 2,\n\tnanos: [u32] 0,\n}");
}

#[test]
fn weak_references_follow_live_targets() {
	let ptr = Ptr::new(&Type::i64(), int(7));
	let weak = ptr.downgrade();
	assert_eq!(render(&Value::weak(&weak)), "[Weak<i64>] => upgrade() &7");
	drop(ptr);
	assert_eq!(render(&Value::weak(&weak)), "[Weak<i64>] => upgrade() <nil>");
}

#[test]
fn unique_handles_show_canonical_value() {
	let handle = Handle::make(int(3)).expect("comparable value");
	assert_eq!(render(&handle.as_value()), "[Handle<i64>] => get() 3");
}

#[test]
fn errors_list_their_causes() {
	let err = LoadError(io::Error::other("disk full"));
	assert_eq!(render(&Value::from_error(err)), "[LoadError] => Error \"load failed\"\n\tcaused by: \"disk full\"");
}

#[test]
fn byte_slices_render_as_hexdump() {
	let out = render(&b"hello world".to_vec().to_value());
	let row = format!("00000000  68 65 6c 6c 6f 20 77 6f  72 6c 64 {}|hello world|", " ".repeat(16));
	assert_eq!(out, format!("[Vec<u8>] (len=11 cap=11) {{\n\t{row}\n}}"));
	assert_eq!(render(&Vec::<u8>::new().to_value()), "[Vec<u8>] (len=0 cap=0) {}");
}

#[test]
fn hexdump_truncates_after_max_len() {
	let mut config = Config::default();
	config.writers.bytes = Some(BytesConfig {
		show_cap: false,
		max_len: Some(4),
		..BytesConfig::default()
	});
	let out = render_with(config, &b"abcdef".to_vec().to_value());
	let row = format!("00000000  61 62 63 64 {}|abcd|", " ".repeat(38));
	assert_eq!(out, format!("[Vec<u8>] (len=6) {{\n\t{row}\n\t<truncated>\n}}"));
}

#[test]
fn hexdump_rows_cover_sixteen_bytes() {
	let mut out = String::new();
	hexdump(&mut out, &[0x41; 17]).expect("write to string");
	let lines: Vec<&str> = out.lines().collect();
	assert_eq!(lines.len(), 2);
	assert_eq!(lines[0], "00000000  41 41 41 41 41 41 41 41  41 41 41 41 41 41 41 41  |AAAAAAAAAAAAAAAA|");
	assert!(lines[1].starts_with("00000010  41 "));
	assert!(lines[1].ends_with("|A|"));
}

#[test]
fn byte_containers_recurse_into_bytes() {
	let out = render(&bytes::Bytes::from_static(b"hi").to_value());
	let row = format!("00000000  68 69 {}|hi|", " ".repeat(44));
	assert_eq!(out, format!("[Bytes] => AsRef<[u8]> (len=2 cap=2) {{\n\t{row}\n}}"));
}

#[test]
fn display_hooks_render_quoted_text() {
	let ty = TypeBuilder::structure("Version")
		.field("major", &Type::u32())
		.display(|value: &Value| format!("v{}", value.field(0).and_then(|major| major.as_u128()).unwrap_or_default()))
		.build();
	let value = Value::structure(&ty, vec![1u32.to_value()]).expect("version value");
	assert_eq!(render(&value), "[Version] => Display \"v1\"");

	let mut config = Config::default();
	config.writers.display = Some(crate::config::DisplayConfig { max_len: Some(1) });
	assert_eq!(render_with(config, &value), "[Version] => Display \"v\" <truncated>");
}

#[test]
fn display_hooks_skip_private_values_without_unlocking() {
	let celsius = TypeBuilder::named("Celsius", &Type::f64())
		.display(|value: &Value| format!("{}C", value.as_f64().unwrap_or_default()))
		.build();
	let room = TypeBuilder::structure("Room").private_field("temp", &celsius).build();
	let value = Value::structure(&room, vec![Value::float(&celsius, 21.5).expect("celsius value")]).expect("room value");
	assert_eq!(render(&value), "[Room] {\n\ttemp: [Celsius (f64)] => Display \"21.5C\",\n}");

	let mut config = Config::default();
	config.unlock_private = false;
	assert_eq!(render_with(config, &value), "[Room] {\n\ttemp: [Celsius (f64)] 21.5,\n}");
}

#[test]
fn ranges_iterate_with_a_cap() {
	assert_eq!(render(&(0i64..3).to_value()), "[Range<i64>] => iter() {\n\t0,\n\t1,\n\t2,\n}");

	let mut config = Config::default();
	config.writers.iter = Some(IterConfig {
		show_indexes: true,
		max_len: Some(2),
	});
	assert_eq!(render_with(config, &(5u32..100).to_value()), "[Range<u32>] => iter() {\n\t0: 5,\n\t1: 6,\n\t<truncated>\n}");
}

#[test]
fn pair_hooks_render_as_entries() {
	let ty = TypeBuilder::structure("Env")
		.pairs(|_: &Value| Box::new(std::iter::once(("HOME".to_value(), "/root".to_value()))) as Box<dyn Iterator<Item = (Value, Value)>>)
		.build();
	let value = Value::structure(&ty, Vec::new()).expect("env value");
	assert_eq!(render(&value), "[Env] => iter() {\n\t(len=4) \"HOME\": (len=5) \"/root\",\n}");
}

#[test]
fn types_render_as_structural_dump() {
	let ty = TypeBuilder::structure("ReflectPoint")
		.field("x", &Type::i64())
		.private_field("y", &Type::i64())
		.display(|_: &Value| "point".to_owned())
		.size(16)
		.build();
	assert_eq!(
		render(&ty.to_value()),
		"[Type] {\n\tname: \"ReflectPoint\",\n\tkind: struct,\n\tsize: 16,\n\tfields: {\n\t\tx: i64,\n\t\ty: i64 (private),\n\t},\n\ttraits: [Display],\n}"
	);
	assert_eq!(
		render(&Type::map_of(&Type::string(), &Type::bool()).to_value()),
		"[Type] {\n\tname: \"HashMap<String, bool>\",\n\tkind: map,\n\tkey: String,\n\telem: bool,\n}"
	);
}
