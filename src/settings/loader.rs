use anyhow::{Error, Result};
use tview::Geometry;

use super::resolved::{ResolvedConfig, Target};
use super::sources::{resolve_cache_dir, resolve_config_file};
use crate::cli::CliArgs;

/// Combine CLI arguments, environment overrides and platform defaults.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let config = resolve_config_file(cli)?;
	let cache_dir = resolve_cache_dir(cli)?;
	let geometry = Geometry::detect().with_overrides(cli.width, cli.height, cli.x, cli.y);
	let target = match &cli.file {
		Some(path) => Target::File(path.clone()),
		None => Target::Stdin,
	};

	let resolved = ResolvedConfig {
		target,
		config_file: config.path,
		config_origin: config.origin,
		cache_dir,
		geometry,
	};
	resolved.validate().map_err(Error::new)?;

	Ok(resolved)
}
