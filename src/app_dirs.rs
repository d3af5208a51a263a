//! Where `tview` keeps its override document and rendered previews.
//!
//! `TVIEW_CONFIG_DIR` and `TVIEW_CACHE_DIR` win over the platform locations
//! from `directories`. Setting either to an empty string counts as unset.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

const CONFIG_DIR_ENV: &str = "TVIEW_CONFIG_DIR";
const CACHE_DIR_ENV: &str = "TVIEW_CACHE_DIR";

/// File name of the renderer override document inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

fn resolve(env_var: &str, platform: fn(&ProjectDirs) -> &Path) -> Result<PathBuf> {
	match env::var_os(env_var) {
		Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
		_ => ProjectDirs::from("", "", "tview")
			.map(|dirs| platform(&dirs).to_path_buf())
			.with_context(|| format!("no home directory found; set {env_var}")),
	}
}

/// Directory holding the renderer override document.
pub fn get_config_dir() -> Result<PathBuf> {
	resolve(CONFIG_DIR_ENV, ProjectDirs::config_dir)
}

/// Default location of the renderer override document.
pub fn default_config_file() -> Result<PathBuf> {
	Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Directory holding rendered previews.
pub fn get_cache_dir() -> Result<PathBuf> {
	resolve(CACHE_DIR_ENV, ProjectDirs::cache_dir)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_config_file_lives_in_the_config_dir() {
		let dir = get_config_dir().unwrap();
		let file = default_config_file().unwrap();
		assert_eq!(file.parent(), Some(dir.as_path()));
		assert!(file.ends_with(CONFIG_FILE_NAME));
	}
}
