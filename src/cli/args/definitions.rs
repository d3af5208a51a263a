use std::path::PathBuf;

use clap::{ColorChoice, Parser};

use super::styles::{cli_styles, long_version};

const AFTER_HELP: &str = "\
The file is classified by content and handed to the first available renderer
listed for its mimetype. Renderers read the file on stdin and also receive it
through TVIEW_FILE (or `{}` in the command). Geometry is exported as
TVIEW_WIDTH, TVIEW_HEIGHT, TVIEW_X and TVIEW_Y.

Example: tview page.html";

/// Command-line arguments accepted by the `tview` binary.
#[derive(Parser, Debug)]
#[command(
	name = "tview",
	version,
	long_version = long_version(),
	about = "Preview a file with the renderer registered for its mimetype",
	after_help = AFTER_HELP,
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(value_name = "FILE", help = "File to preview (default: read from stdin)")]
	pub(crate) file: Option<PathBuf>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "TVIEW_CONFIG",
		help = "Renderer override document (default: config.json in the config directory)"
	)]
	pub(crate) config: Option<PathBuf>,
	#[arg(
		long = "cache-dir",
		value_name = "DIR",
		help = "Directory for rendered previews (default: platform cache directory)"
	)]
	pub(crate) cache_dir: Option<PathBuf>,
	#[arg(
		long = "no-cache",
		help = "Always render and never store the result (default: disabled)"
	)]
	pub(crate) no_cache: bool,
	#[arg(
		short = 'W',
		long,
		value_name = "COLS",
		help = "Preview width in columns (default: terminal width)"
	)]
	pub(crate) width: Option<u16>,
	#[arg(
		short = 'H',
		long,
		value_name = "ROWS",
		help = "Preview height in rows (default: terminal height)"
	)]
	pub(crate) height: Option<u16>,
	#[arg(
		short = 'x',
		value_name = "COL",
		help = "Horizontal offset of the preview pane (default: unset)"
	)]
	pub(crate) x: Option<u16>,
	#[arg(
		short = 'y',
		value_name = "ROW",
		help = "Vertical offset of the preview pane (default: unset)"
	)]
	pub(crate) y: Option<u16>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration and exit (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'v',
		long,
		help = "Log classification, cache and renderer decisions to stderr (default: disabled)"
	)]
	pub(crate) verbose: bool,
}
