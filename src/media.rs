use std::fmt;

use serde::Deserialize;

/// Normalized content-type identifier such as `text/plain`.
///
/// Parameters (`; charset=utf-8` and friends) are stripped and the remainder
/// is lowercased, so two media types compare equal whenever their essence
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub struct MediaType(String);

impl MediaType {
	/// Key of the universal fallback tier.
	pub const OCTET_STREAM: &'static str = "application/octet-stream";

	pub fn new(raw: impl AsRef<str>) -> Self {
		let raw = raw.as_ref();
		let essence = raw.split(';').next().unwrap_or(raw);
		Self(essence.trim().to_ascii_lowercase())
	}

	pub fn octet_stream() -> Self {
		Self(Self::OCTET_STREAM.to_string())
	}

	pub fn is_octet_stream(&self) -> bool {
		self.0 == Self::OCTET_STREAM
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for MediaType {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for MediaType {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
