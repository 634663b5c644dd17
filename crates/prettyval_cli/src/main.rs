#![allow(missing_docs)]

use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "prettyval", about = "Annotated pretty-printing of JSON documents")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Render a JSON document.
	Render(cmd::render::Args),
	/// Print the effective configuration as JSON.
	Config(cmd::config::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> prettyval::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Render(args) => cmd::render::run(args),
		Commands::Config(args) => cmd::config::run(args),
	}
}
