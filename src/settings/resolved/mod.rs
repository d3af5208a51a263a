use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tview::Geometry;

/// Where a preview's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	File(PathBuf),
	Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Default,
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Default => f.write_str("default location"),
		}
	}
}

/// A zero width or height leaves renderers nothing to draw into.
#[derive(Debug, Error)]
#[error("{flag} must be at least 1")]
pub(crate) struct EmptyPreviewArea {
	pub(crate) flag: &'static str,
}

/// Settings a preview runs with.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub target: Target,
	pub config_file: PathBuf,
	pub(crate) config_origin: SettingSource,
	/// `None` when caching is disabled.
	pub cache_dir: Option<PathBuf>,
	pub geometry: Geometry,
}

impl ResolvedConfig {
	pub(super) fn validate(&self) -> Result<(), EmptyPreviewArea> {
		for (flag, value) in [("--width", self.geometry.width), ("--height", self.geometry.height)] {
			if value == 0 {
				return Err(EmptyPreviewArea { flag });
			}
		}
		Ok(())
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		match &self.target {
			Target::File(path) => println!("  Target: {}", path.display()),
			Target::Stdin => println!("  Target: (stdin)"),
		}
		println!(
			"  Config file: {} ({})",
			self.config_file.display(),
			self.config_origin
		);
		match &self.cache_dir {
			Some(dir) => println!("  Cache directory: {}", dir.display()),
			None => println!("  Cache directory: (disabled)"),
		}
		println!(
			"  Geometry: {}x{}",
			self.geometry.width, self.geometry.height
		);
		if let Some(x) = self.geometry.x {
			println!("  Offset x: {x}");
		}
		if let Some(y) = self.geometry.y {
			println!("  Offset y: {y}");
		}
	}
}
