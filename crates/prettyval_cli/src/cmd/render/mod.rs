use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use prettyval::{Config, Printer, Result, ToValue};
use tracing::debug;

#[derive(clap::Args)]
pub struct Args {
	/// JSON document; `-` or nothing reads stdin.
	pub path: Option<PathBuf>,
	/// JSON configuration file, merged over the defaults or the `--detailed` preset.
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Start from the verbose preset.
	#[arg(long)]
	pub detailed: bool,
	/// Keep map entries in document order.
	#[arg(long)]
	pub no_sort: bool,
	/// Nesting limit.
	#[arg(long)]
	pub max_depth: Option<usize>,
	/// Cap on rendered elements, entries and string characters.
	#[arg(long)]
	pub max_len: Option<usize>,
	/// Show storage addresses.
	#[arg(long)]
	pub show_addr: bool,
	/// Annotate values whose type is already known.
	#[arg(long)]
	pub show_known_types: bool,
}

/// Render one JSON document to stdout.
pub fn run(args: Args) -> Result<()> {
	let config = load_config(&args)?;
	let text = read_input(args.path.as_deref())?;
	let document: serde_json::Value = serde_json::from_str(&text)?;
	debug!(bytes = text.len(), "parsed input document");

	let printer = Printer::from_config(&config);
	let mut stdout = io::stdout().lock();
	printer.write(&mut stdout, &document.to_value())?;
	writeln!(stdout)?;
	Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
	match path {
		Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
		_ => {
			let mut text = String::new();
			io::stdin().read_to_string(&mut text)?;
			Ok(text)
		}
	}
}

pub(crate) fn load_config(args: &Args) -> Result<Config> {
	let mut config = if args.detailed { Config::detailed() } else { Config::default() };
	if let Some(path) = &args.config {
		config = config.merged_with_json_str(&fs::read_to_string(path)?)?;
	}
	apply_overrides(&mut config, args);
	Ok(config)
}

pub(crate) fn apply_overrides(config: &mut Config, args: &Args) {
	let kinds = &mut config.kinds;
	if args.no_sort {
		kinds.map.sort_keys = false;
	}
	if let Some(max_depth) = args.max_depth {
		config.max_depth = Some(max_depth);
	}
	if let Some(max_len) = args.max_len {
		kinds.string.max_len = Some(max_len);
		kinds.array.max_len = Some(max_len);
		kinds.slice.max_len = Some(max_len);
		kinds.map.max_len = Some(max_len);
		kinds.chan.max_len = Some(max_len);
	}
	if args.show_addr {
		kinds.slice.show_addr = true;
		kinds.map.show_addr = true;
		kinds.pointer.show_addr = true;
		kinds.chan.show_addr = true;
		kinds.func.show_addr = true;
	}
	if args.show_known_types
		&& let Some(annotation) = &mut config.type_annotation
	{
		annotation.show_known_types = true;
	}
}

#[cfg(test)]
mod tests;
