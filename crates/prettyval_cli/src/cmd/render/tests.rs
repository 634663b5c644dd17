use clap::Parser;
use prettyval::Config;

use super::{Args, apply_overrides, load_config};

#[derive(Parser)]
struct Harness {
	#[command(flatten)]
	args: Args,
}

fn parse(argv: &[&str]) -> Args {
	Harness::parse_from(std::iter::once("prettyval").chain(argv.iter().copied())).args
}

#[test]
fn overrides_adjust_every_container_limit() {
	let args = parse(&["doc.json", "--no-sort", "--max-depth", "4", "--max-len", "2", "--show-addr", "--show-known-types"]);
	let mut config = Config::default();
	apply_overrides(&mut config, &args);

	assert!(!config.kinds.map.sort_keys);
	assert_eq!(config.max_depth, Some(4));
	assert_eq!(config.kinds.string.max_len, Some(2));
	assert_eq!(config.kinds.slice.max_len, Some(2));
	assert_eq!(config.kinds.map.max_len, Some(2));
	assert!(config.kinds.pointer.show_addr);
	assert!(config.type_annotation.as_ref().is_some_and(|annotation| annotation.show_known_types));
}

#[test]
fn no_flags_keep_defaults() {
	let args = parse(&[]);
	assert!(args.path.is_none());
	assert_eq!(load_config(&args).expect("default config"), Config::default());
}

#[test]
fn detailed_flag_selects_preset() {
	let args = parse(&["--detailed"]);
	assert_eq!(load_config(&args).expect("detailed config"), Config::detailed());
}

#[test]
fn config_file_is_merged_over_defaults() {
	let path = prettyval_testkit::fixture_path("compact.json");
	let path = path.to_string_lossy().into_owned();
	let args = parse(&["--config", &path]);
	let config = load_config(&args).expect("config from fixture");
	assert!(config.type_annotation.is_none());
	assert!(!config.kinds.slice.show_cap);
	assert_eq!(config.indent, "  ");
}

#[test]
fn config_file_is_merged_over_detailed_preset() {
	let path = prettyval_testkit::fixture_path("compact.json");
	let path = path.to_string_lossy().into_owned();
	let args = parse(&["--detailed", "--config", &path]);
	let config = load_config(&args).expect("config from fixture");

	assert!(config.type_annotation.is_none());
	assert!(!config.kinds.slice.show_cap);
	assert_eq!(config.indent, "  ");
	assert!(config.kinds.slice.show_indexes);
	assert!(config.recursion.as_ref().is_some_and(|recursion| recursion.show_info));
}
