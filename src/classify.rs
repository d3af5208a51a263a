//! Content sniffing.
//!
//! Magic-byte detection is delegated to the `infer` crate. Content `infer`
//! does not recognise gets a second look for text formats before falling
//! back to `application/octet-stream`. Every detected type is paired with a
//! generalized parent so the dispatch engine has a middle tier to fall back
//! on before the universal fallback.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::IgnoredAny;

use crate::media::MediaType;

const TEXT_PLAIN: &str = "text/plain";
const TEXT_XML: &str = "text/xml";
const APPLICATION_ZIP: &str = "application/zip";

/// Zip containers whose parent is `application/zip`.
const ZIP_CONTAINERS: &[&str] = &[
	"application/vnd.openxmlformats-officedocument.wordprocessingml.document",
	"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
	"application/vnd.openxmlformats-officedocument.presentationml.presentation",
	"application/vnd.oasis.opendocument.text",
	"application/vnd.oasis.opendocument.spreadsheet",
	"application/vnd.oasis.opendocument.presentation",
	"application/epub+zip",
	"application/java-archive",
	"application/vnd.android.package-archive",
];

/// Text formats whose parent is `text/plain`.
const TEXT_FORMATS: &[&str] = &[
	"application/json",
	"text/html",
	"text/xml",
	"text/csv",
	"text/x-shellscript",
];

/// Result of classifying a piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
	/// Most specific type the detector could determine.
	pub media_type: MediaType,
	/// Generalized type, `application/octet-stream` when there is none.
	pub parent: MediaType,
}

impl Classification {
	fn from_detected(media_type: MediaType) -> Self {
		let parent = parent_of(&media_type);
		Self { media_type, parent }
	}
}

/// Classify raw content. Unknown content classifies as octet-stream.
pub fn classify(bytes: &[u8]) -> Classification {
	if let Some(kind) = infer::get(bytes) {
		return Classification::from_detected(MediaType::new(kind.mime_type()));
	}

	match sniff_text(bytes) {
		Some(media_type) => Classification::from_detected(MediaType::new(media_type)),
		None => Classification {
			media_type: MediaType::octet_stream(),
			parent: MediaType::octet_stream(),
		},
	}
}

/// Read `path` and classify its content.
pub fn classify_path(path: &Path) -> io::Result<Classification> {
	let bytes = fs::read(path)?;
	Ok(classify(&bytes))
}

fn sniff_text(bytes: &[u8]) -> Option<&'static str> {
	if bytes.contains(&0) {
		return None;
	}
	let text = std::str::from_utf8(bytes).ok()?;
	let head = text.trim_start();

	if (head.starts_with('{') || head.starts_with('['))
		&& serde_json::from_str::<IgnoredAny>(text).is_ok()
	{
		return Some("application/json");
	}

	let lowered = head
		.get(..head.len().min(64))
		.unwrap_or(head)
		.to_ascii_lowercase();
	if lowered.starts_with("<!doctype html") || lowered.starts_with("<html") {
		return Some("text/html");
	}
	if lowered.starts_with("<?xml") {
		return Some(TEXT_XML);
	}

	Some(TEXT_PLAIN)
}

fn parent_of(media_type: &MediaType) -> MediaType {
	let essence = media_type.as_str();
	if ZIP_CONTAINERS.contains(&essence) {
		MediaType::new(APPLICATION_ZIP)
	} else if TEXT_FORMATS.contains(&essence) {
		MediaType::new(TEXT_PLAIN)
	} else if essence == "image/svg+xml" {
		MediaType::new(TEXT_XML)
	} else {
		MediaType::octet_stream()
	}
}
