use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::media::MediaType;

/// Errors that end a preview.
///
/// Messages leave the underlying cause to the error's `source`, so print
/// them with `{:#}` through `anyhow` to see the whole chain.
///
/// Unavailable and failing candidates are not errors; the dispatch engine
/// moves on to the next candidate and only reports [`PreviewError::Exhausted`]
/// once the chain runs dry.
#[derive(Debug, Error)]
pub enum PreviewError {
	/// The target file could not be read.
	#[error("cannot read {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The cache directory or one of its entries could not be accessed.
	#[error("cache {}", path.display())]
	Cache {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// A renderer table entry held an empty command.
	#[error("empty command template in renderer table")]
	EmptyCommand,

	/// Looking up a program failed for a reason other than it being absent.
	#[error("{program}: cannot search for program")]
	Lookup {
		program: String,
		#[source]
		source: which::Error,
	},

	/// No candidate in the fallback chain was both available and successful.
	#[error("{media_type}: no usable renderer")]
	Exhausted { media_type: MediaType },

	/// Writing the preview to its destination failed.
	#[error("failed to write preview")]
	Output(#[source] io::Error),
}

impl PreviewError {
	pub(crate) fn cache(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Cache {
			path: path.into(),
			source,
		}
	}
}

pub type Result<T, E = PreviewError> = std::result::Result<T, E>;
