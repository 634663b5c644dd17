use prettyval::{Config, Result};

#[derive(clap::Args)]
pub struct Args {
	/// Start from the verbose preset.
	#[arg(long)]
	pub detailed: bool,
}

/// Print the default (or detailed) configuration as pretty JSON.
pub fn run(args: Args) -> Result<()> {
	let config = if args.detailed { Config::detailed() } else { Config::default() };
	println!("{}", config.to_json_pretty()?);
	Ok(())
}
