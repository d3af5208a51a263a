use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::cache::CacheWriter;
use crate::context::RenderContext;
use crate::resolver::Invocation;

/// Runs a resolved invocation to completion.
///
/// The dispatch engine only sees the exit status; how the command is
/// actually started lives behind this trait.
pub trait Executor {
	/// Run `invocation` with its standard output captured into `stdout`.
	///
	/// An `Err` means the process could not be started at all.
	fn execute(
		&self,
		invocation: &Invocation,
		ctx: &RenderContext,
		stdout: &mut CacheWriter,
	) -> io::Result<ExitStatus>;
}

/// Executes invocations through `/bin/sh -c`.
///
/// The delegate reads the target file on stdin, writes its preview to the
/// cache writer and shares the parent's stderr.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
	shell: PathBuf,
}

impl ShellExecutor {
	pub fn new(shell: impl Into<PathBuf>) -> Self {
		Self {
			shell: shell.into(),
		}
	}
}

impl Default for ShellExecutor {
	fn default() -> Self {
		Self::new("/bin/sh")
	}
}

impl Executor for ShellExecutor {
	fn execute(
		&self,
		invocation: &Invocation,
		ctx: &RenderContext,
		stdout: &mut CacheWriter,
	) -> io::Result<ExitStatus> {
		let stdin = File::open(ctx.path())?;

		Command::new(&self.shell)
			.arg("-c")
			.arg("--")
			.arg(&invocation.script)
			.envs(invocation.env.iter().map(|(name, value)| (*name, value)))
			.stdin(Stdio::from(stdin))
			.stdout(stdout.stdio()?)
			.stderr(Stdio::inherit())
			.status()
	}
}
