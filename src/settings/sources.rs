use std::path::PathBuf;

use anyhow::{Context, Result};
use tview::{app_dirs, renderers::bootstrap_config};

use super::resolved::SettingSource;
use crate::cli::CliArgs;

pub(super) struct ConfigFile {
	pub(super) path: PathBuf,
	pub(super) origin: SettingSource,
}

/// Pick the renderer override document.
///
/// Only the default location is bootstrapped; a path named explicitly is
/// read as-is and simply ignored if it does not exist.
pub(super) fn resolve_config_file(cli: &CliArgs) -> Result<ConfigFile> {
	if let Some(path) = &cli.config {
		return Ok(ConfigFile {
			path: path.clone(),
			origin: SettingSource::CliFlag("--config"),
		});
	}

	let path = app_dirs::default_config_file()
		.context("failed to locate the default config file")?;
	bootstrap_config(&path);
	Ok(ConfigFile {
		path,
		origin: SettingSource::Default,
	})
}

/// Pick the cache directory, or `None` when caching is disabled.
pub(super) fn resolve_cache_dir(cli: &CliArgs) -> Result<Option<PathBuf>> {
	if cli.no_cache {
		return Ok(None);
	}

	match &cli.cache_dir {
		Some(dir) => Ok(Some(dir.clone())),
		None => app_dirs::get_cache_dir()
			.map(Some)
			.context("failed to locate the cache directory"),
	}
}
