mod cli;
mod settings;
mod workflow;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use cli::parse_cli;
use tview::logging;
use workflow::PreviewWorkflow;

fn main() -> ExitCode {
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("tview: {err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
		return Ok(());
	}

	let workflow = PreviewWorkflow::from_config(resolved)?;
	let stdout = io::stdout();
	workflow.run(&mut stdout.lock())
}
