use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;
use tview::{
	CacheStore, Dispatcher, RenderContext, Resolver, build_table, load_overrides,
};

use crate::settings::{ResolvedConfig, Target};

/// Coordinates building the dispatcher and previewing the configured target.
pub(crate) struct PreviewWorkflow {
	dispatcher: Dispatcher,
	config: ResolvedConfig,
}

impl PreviewWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let table = build_table(load_overrides(&config.config_file));
		let cache = match &config.cache_dir {
			Some(dir) => CacheStore::open(dir)?,
			None => CacheStore::disabled(),
		};
		let dispatcher = Dispatcher::new(table, Resolver::new(), cache);
		Ok(Self { dispatcher, config })
	}

	/// Preview the target into `out`.
	pub(crate) fn run(self, out: &mut dyn Write) -> Result<()> {
		let geometry = self.config.geometry;

		// Delegates expect a real file, so stdin is spooled to disk first.
		let spool;
		let ctx = match &self.config.target {
			Target::File(path) => RenderContext::new(path, geometry),
			Target::Stdin => {
				let (file, content) = spool_stdin()?;
				let ctx = RenderContext::new(file.path(), geometry).with_content(content);
				spool = file;
				debug!(path = %spool.path().display(), "spooled stdin");
				ctx
			}
		};

		let report = self.dispatcher.dispatch(&ctx, out)?;
		out.flush().context("failed to flush preview")?;
		debug!(
			cache_hit = report.was_cache_hit(),
			executions = report.executions(),
			media_type = %report.classification.media_type,
			"preview finished"
		);
		Ok(())
	}
}

fn spool_stdin() -> Result<(NamedTempFile, Vec<u8>)> {
	let mut content = Vec::new();
	io::stdin()
		.lock()
		.read_to_end(&mut content)
		.context("failed to read stdin")?;

	let file = NamedTempFile::new().context("failed to create a spool file for stdin")?;
	fs::write(file.path(), &content)
		.with_context(|| format!("failed to write {}", file.path().display()))?;
	Ok((file, content))
}
