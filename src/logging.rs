//! Diagnostics for skipped renderers, cache activity and config problems.
//!
//! Everything goes to stderr so it never mixes with the preview on stdout.
//! `TVIEW_LOG` takes an `EnvFilter` directive and wins over the default
//! level picked by the caller.

use tracing::Level;
use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "TVIEW_LOG";

/// Install the global subscriber. Calling this more than once is harmless.
pub fn initialize(verbose: bool) {
	let default_level = if verbose { Level::DEBUG } else { Level::WARN };
	let filter = EnvFilter::try_from_env(FILTER_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init();
}
