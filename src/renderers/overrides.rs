use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use tracing::{debug, warn};

use crate::media::MediaType;
use crate::resolver::CommandSpec;

/// Contents written to a config file that does not exist yet.
const BOOTSTRAP_CONTENTS: &str = "{}\n";

/// User-supplied replacements for renderer table entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererOverrides {
	entries: BTreeMap<MediaType, Vec<CommandSpec>>,
}

impl RendererOverrides {
	pub fn new<K, C, I>(entries: I) -> Self
	where
		K: Into<MediaType>,
		C: Into<CommandSpec>,
		I: IntoIterator<Item = (K, Vec<C>)>,
	{
		let entries = entries
			.into_iter()
			.map(|(key, commands)| {
				(
					key.into(),
					commands.into_iter().map(Into::into).collect::<Vec<_>>(),
				)
			})
			.collect();
		Self { entries }
	}

	/// Parse an override document held in memory.
	pub fn parse(contents: &str, format: FileFormat) -> Result<Self> {
		let config = Config::builder()
			.add_source(File::from_str(contents, format))
			.build()
			.context("failed to parse renderer overrides")?;
		Self::from_config(config)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(super) fn into_entries(self) -> impl Iterator<Item = (MediaType, Vec<CommandSpec>)> {
		self.entries.into_iter()
	}

	fn from_config(config: Config) -> Result<Self> {
		let entries = config
			.try_deserialize()
			.context("renderer overrides must map media types to lists of commands")?;
		Ok(Self { entries })
	}
}

/// Load renderer overrides from `path`.
///
/// A missing, unreadable or malformed document is never fatal: the problem
/// is logged and no overrides apply, leaving the defaults in effect.
pub fn load_overrides(path: &Path) -> RendererOverrides {
	match read_overrides(path) {
		Ok(overrides) => {
			debug!(
				path = %path.display(),
				keys = overrides.len(),
				"loaded renderer overrides"
			);
			overrides
		}
		Err(err) => {
			warn!("{}: ignoring renderer overrides: {err:#}", path.display());
			RendererOverrides::default()
		}
	}
}

fn read_overrides(path: &Path) -> Result<RendererOverrides> {
	let config = Config::builder()
		.add_source(File::from(path).format(format_for(path)).required(false))
		.build()
		.with_context(|| format!("failed to read {}", path.display()))?;
	RendererOverrides::from_config(config)
}

/// Pick the document format from the file extension, JSON unless stated
/// otherwise.
fn format_for(path: &Path) -> FileFormat {
	match path.extension().and_then(|ext| ext.to_str()) {
		Some("toml") => FileFormat::Toml,
		Some("yaml" | "yml") => FileFormat::Yaml,
		_ => FileFormat::Json,
	}
}

/// Create an empty override document at `path` if nothing exists there yet.
///
/// Failures are logged and otherwise ignored so a read-only or missing
/// config directory never blocks a preview.
pub fn bootstrap_config(path: &Path) {
	if path.exists() {
		return;
	}

	let result = path
		.parent()
		.map_or(Ok(()), fs::create_dir_all)
		.and_then(|()| fs::write(path, BOOTSTRAP_CONTENTS));

	match result {
		Ok(()) => debug!(path = %path.display(), "created empty renderer config"),
		Err(err) => warn!("{}: cannot create config file: {err}", path.display()),
	}
}
