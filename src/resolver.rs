//! Expansion of renderer command templates into runnable invocations.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::context::RenderContext;
use crate::error::{PreviewError, Result};

/// Placeholder replaced by a reference to the target path.
pub const FILE_PLACEHOLDER: &str = "{}";

/// Environment variable carrying the target path.
pub const FILE_ENV: &str = "TVIEW_FILE";

/// What `{}` expands to. The path itself only travels through the
/// environment, so names that are not UTF-8 reach the delegate intact.
const FILE_REFERENCE: &str = "\"$TVIEW_FILE\"";

/// A renderer command template, run through `/bin/sh -c`.
///
/// The first whitespace-delimited token names the program. Every `{}` in
/// the remainder becomes `"$TVIEW_FILE"`; templates without one only see
/// the file on stdin and through `TVIEW_FILE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct CommandSpec(String);

impl CommandSpec {
	pub fn new(template: impl Into<String>) -> Self {
		Self(template.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Program token and the rest of the template.
	pub fn split_program(&self) -> Option<(&str, &str)> {
		let trimmed = self.0.trim();
		if trimmed.is_empty() {
			return None;
		}
		Some(
			trimmed
				.split_once(char::is_whitespace)
				.map(|(program, rest)| (program, rest.trim_start()))
				.unwrap_or((trimmed, "")),
		)
	}
}

impl fmt::Display for CommandSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for CommandSpec {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for CommandSpec {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// A fully expanded command, ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
	/// Absolute path of the program named by the template.
	pub program: PathBuf,
	/// Shell script with the program path and placeholders substituted.
	pub script: String,
	/// Variables added on top of the inherited environment.
	pub env: Vec<(&'static str, OsString)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	Available(Invocation),
	/// The named program is not on the search path.
	Unavailable { program: String },
}

/// Looks programs up and expands templates against a [`RenderContext`].
#[derive(Debug, Clone, Default)]
pub struct Resolver {
	search_path: Option<OsString>,
}

impl Resolver {
	/// Resolve against the process `PATH`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Resolve against an explicit `PATH`-style list instead of the process one.
	pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
		Self {
			search_path: Some(search_path.into()),
		}
	}

	pub fn resolve(&self, spec: &CommandSpec, ctx: &RenderContext) -> Result<Resolution> {
		let (program, rest) = spec.split_program().ok_or(PreviewError::EmptyCommand)?;

		let resolved = match self.locate(program) {
			Ok(path) => path,
			Err(err) if is_not_found(&err) => {
				return Ok(Resolution::Unavailable {
					program: program.to_string(),
				});
			}
			Err(source) => {
				return Err(PreviewError::Lookup {
					program: program.to_string(),
					source,
				});
			}
		};

		let quoted_program = shell_words::quote(&resolved.to_string_lossy()).into_owned();
		let script = if rest.is_empty() {
			quoted_program
		} else {
			format!("{quoted_program} {}", rest.replace(FILE_PLACEHOLDER, FILE_REFERENCE))
		};

		let mut env = vec![(FILE_ENV, ctx.path().as_os_str().to_os_string())];
		env.extend(
			ctx.geometry()
				.env_vars()
				.into_iter()
				.map(|(name, value)| (name, OsString::from(value))),
		);

		Ok(Resolution::Available(Invocation {
			program: resolved,
			script,
			env,
		}))
	}

	fn locate(&self, program: &str) -> which::Result<PathBuf> {
		match &self.search_path {
			Some(paths) => {
				let cwd = env::current_dir().unwrap_or_default();
				which::which_in(program, Some(paths), cwd)
			}
			None => which::which(program),
		}
	}
}

/// Lookup failures that mean the program simply is not there. With no
/// `PATH` at all only absolute program paths can be found.
fn is_not_found(err: &which::Error) -> bool {
	matches!(
		err,
		which::Error::CannotFindBinaryPath | which::Error::CannotGetCurrentDirAndPathListEmpty
	)
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::os::unix::fs::PermissionsExt;

	use tempfile::tempdir;

	use super::*;
	use crate::context::Geometry;

	fn install(dir: &std::path::Path, name: &str) -> PathBuf {
		let path = dir.join(name);
		fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
		fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
		path
	}

	#[test]
	fn empty_templates_are_rejected() {
		let ctx = RenderContext::new("/tmp/file", Geometry::default());
		let err = Resolver::new()
			.resolve(&CommandSpec::new("   "), &ctx)
			.unwrap_err();
		assert!(matches!(err, PreviewError::EmptyCommand));
	}

	#[test]
	fn missing_programs_are_unavailable() {
		let dir = tempdir().unwrap();
		let resolver = Resolver::with_search_path(dir.path());
		let ctx = RenderContext::new("/tmp/file", Geometry::default());

		let resolution = resolver
			.resolve(&CommandSpec::new("nope --flag {}"), &ctx)
			.unwrap();
		assert_eq!(
			resolution,
			Resolution::Unavailable {
				program: "nope".into()
			}
		);
	}

	#[test]
	fn program_and_placeholders_are_substituted() {
		let dir = tempdir().unwrap();
		let program = install(dir.path(), "viewer");
		let resolver = Resolver::with_search_path(dir.path());
		let ctx = RenderContext::new("/tmp/my file.txt", Geometry::new(90, 30));

		let Resolution::Available(invocation) = resolver
			.resolve(&CommandSpec::new("viewer --width=$TVIEW_WIDTH {}"), &ctx)
			.unwrap()
		else {
			panic!("viewer should resolve");
		};

		assert_eq!(invocation.program, program);
		assert_eq!(
			invocation.script,
			format!("{} --width=$TVIEW_WIDTH \"$TVIEW_FILE\"", program.display())
		);
		assert!(
			invocation
				.env
				.contains(&("TVIEW_FILE", OsString::from("/tmp/my file.txt")))
		);
		assert!(invocation.env.contains(&("TVIEW_WIDTH", OsString::from("90"))));
		assert!(invocation.env.contains(&("TVIEW_HEIGHT", OsString::from("30"))));
		assert!(!invocation.env.iter().any(|(name, _)| *name == "TVIEW_X"));
	}

	#[test]
	fn templates_without_placeholder_get_no_positional_path() {
		let dir = tempdir().unwrap();
		let program = install(dir.path(), "pager");
		let resolver = Resolver::with_search_path(dir.path());
		let ctx = RenderContext::new("/tmp/file", Geometry::default());

		let Resolution::Available(invocation) = resolver
			.resolve(&CommandSpec::new("pager"), &ctx)
			.unwrap()
		else {
			panic!("pager should resolve");
		};
		assert_eq!(invocation.script, program.display().to_string());
	}

	#[test]
	fn an_empty_path_list_means_unavailable_not_fatal() {
		assert!(is_not_found(&which::Error::CannotFindBinaryPath));
		assert!(is_not_found(
			&which::Error::CannotGetCurrentDirAndPathListEmpty
		));
		assert!(!is_not_found(&which::Error::CannotCanonicalize));
	}

	#[test]
	fn absolute_program_paths_resolve_without_a_search_path() {
		let dir = tempdir().unwrap();
		let program = install(dir.path(), "viewer");
		let resolver = Resolver::with_search_path("");
		let ctx = RenderContext::new("/tmp/file", Geometry::default());

		let template = format!("{} {{}}", program.display());
		let resolution = resolver
			.resolve(&CommandSpec::new(template), &ctx)
			.unwrap();
		assert!(matches!(
			resolution,
			Resolution::Available(ref invocation) if invocation.program == program
		));
	}

	#[test]
	fn split_program_trims_surrounding_whitespace() {
		let spec = CommandSpec::new("  bat   --color=always {} ");
		assert_eq!(spec.split_program(), Some(("bat", "--color=always {}")));
	}
}
