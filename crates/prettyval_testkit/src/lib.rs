//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static ADDR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"0x[0-9a-f]+").expect("address pattern compiles"));

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Replace every hex address in rendered text with `0xADDR`.
pub fn normalize_addrs(text: &str) -> String {
	ADDR.replace_all(text, "0xADDR").into_owned()
}

#[cfg(test)]
mod tests {
	use super::{fixture_path, normalize_addrs};

	#[test]
	fn addresses_are_masked() {
		assert_eq!(normalize_addrs("&<recursion> [&T] 0x7ffd3a10 (addr=0xdead)"), "&<recursion> [&T] 0xADDR (addr=0xADDR)");
		assert_eq!(normalize_addrs("no addresses"), "no addresses");
	}

	#[test]
	fn fixtures_live_in_workspace_root() {
		assert!(fixture_path("inventory.json").is_file());
	}
}
