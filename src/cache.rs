//! Content-addressed store for rendered previews.
//!
//! Entries live in a flat directory and are named by the hex digest of a
//! [`CacheKey`]. Nothing is ever evicted. Writers render into a temporary
//! file next to the entry and rename it into place on success, so a reader
//! never observes a half-written entry and concurrent writers simply race to
//! be the last rename.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::process::Stdio;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::context::Geometry;
use crate::error::{PreviewError, Result};

/// SHA-256 over file content and display geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
	pub fn compute(content: &[u8], geometry: &Geometry) -> Self {
		let mut hasher = Sha256::new();
		hasher.update(content);
		hasher.update(geometry.width.to_le_bytes());
		hasher.update(geometry.height.to_le_bytes());
		for offset in [geometry.x, geometry.y] {
			match offset {
				Some(value) => {
					hasher.update([1u8]);
					hasher.update(value.to_le_bytes());
				}
				None => hasher.update([0u8]),
			}
		}
		let mut digest = [0u8; 32];
		digest.copy_from_slice(&hasher.finalize());
		Self(digest)
	}

	/// Lowercase hex digest, used as the entry file name.
	pub fn hex(&self) -> String {
		let mut out = String::with_capacity(self.0.len() * 2);
		for byte in self.0 {
			let _ = write!(out, "{byte:02x}");
		}
		out
	}
}

/// Flat on-disk directory of rendered previews.
#[derive(Debug, Clone)]
pub struct CacheStore {
	dir: Option<PathBuf>,
}

impl CacheStore {
	/// Open the store rooted at `dir`, creating the directory if needed.
	pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
		let dir = dir.into();
		fs::create_dir_all(&dir).map_err(|err| PreviewError::cache(&dir, err))?;
		Ok(Self { dir: Some(dir) })
	}

	/// A store that never hits and forgets every render once replayed.
	pub fn disabled() -> Self {
		Self { dir: None }
	}

	pub fn entry_path(&self, key: &CacheKey) -> Option<PathBuf> {
		self.dir.as_ref().map(|dir| dir.join(key.hex()))
	}

	pub fn lookup(&self, key: &CacheKey) -> bool {
		self.entry_path(key).is_some_and(|path| path.is_file())
	}

	/// Start capturing a render for `key`.
	///
	/// This succeeds whether or not an entry already exists; the existing
	/// entry is only replaced once the new one is committed.
	pub fn open_for_write(&self, key: &CacheKey) -> Result<CacheWriter> {
		let (file, target) = match &self.dir {
			Some(dir) => {
				let file = NamedTempFile::new_in(dir).map_err(|err| PreviewError::cache(dir, err))?;
				(file, Some(dir.join(key.hex())))
			}
			None => {
				let file = NamedTempFile::new()
					.map_err(|err| PreviewError::cache(std::env::temp_dir(), err))?;
				(file, None)
			}
		};
		Ok(CacheWriter { file, target })
	}

	pub fn read(&self, key: &CacheKey) -> Result<Vec<u8>> {
		let path = self.existing_entry(key)?;
		fs::read(&path).map_err(|err| PreviewError::cache(path, err))
	}

	/// Stream a stored entry into `out`.
	pub fn replay(&self, key: &CacheKey, out: &mut dyn Write) -> Result<u64> {
		let path = self.existing_entry(key)?;
		let mut file = File::open(&path).map_err(|err| PreviewError::cache(&path, err))?;
		io::copy(&mut file, out).map_err(PreviewError::Output)
	}

	fn existing_entry(&self, key: &CacheKey) -> Result<PathBuf> {
		self.entry_path(key).ok_or_else(|| {
			PreviewError::cache(
				key.hex(),
				io::Error::new(io::ErrorKind::NotFound, "cache is disabled"),
			)
		})
	}
}

/// Pending cache entry that a renderer writes its standard output into.
///
/// Dropping the writer without calling [`CacheWriter::commit`] discards
/// whatever was captured.
#[derive(Debug)]
pub struct CacheWriter {
	file: NamedTempFile,
	target: Option<PathBuf>,
}

impl CacheWriter {
	/// Handle suitable for a child process's standard output.
	pub fn stdio(&self) -> io::Result<Stdio> {
		let handle = self.file.as_file().try_clone()?;
		Ok(Stdio::from(handle))
	}

	/// Publish the captured output and return it for replay.
	pub fn commit(self) -> Result<RenderedEntry> {
		let mut file = match self.target {
			Some(target) => self
				.file
				.persist(&target)
				.map_err(|err| PreviewError::cache(&target, err.error))?,
			None => self.file.into_file(),
		};
		file.seek(SeekFrom::Start(0))
			.map_err(|err| PreviewError::cache("<render>", err))?;
		Ok(RenderedEntry { file })
	}
}

impl Write for CacheWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.file.write(buf)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.file.flush()
	}
}

/// A committed render, positioned at its first byte.
#[derive(Debug)]
pub struct RenderedEntry {
	file: File,
}

impl RenderedEntry {
	pub fn replay(mut self, out: &mut dyn Write) -> Result<u64> {
		io::copy(&mut self.file, out).map_err(PreviewError::Output)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn geometry_changes_the_key() {
		let content = b"same bytes";
		let narrow = CacheKey::compute(content, &Geometry::new(80, 24));
		let wide = CacheKey::compute(content, &Geometry::new(120, 24));
		let offset = CacheKey::compute(
			content,
			&Geometry::new(80, 24).with_overrides(None, None, Some(0), None),
		);
		assert_ne!(narrow, wide);
		assert_ne!(narrow, offset);
	}

	#[test]
	fn identical_inputs_collide() {
		let geometry = Geometry::new(100, 30);
		assert_eq!(
			CacheKey::compute(b"abc", &geometry),
			CacheKey::compute(b"abc", &geometry)
		);
	}

	#[test]
	fn hex_is_sixty_four_lowercase_digits() {
		let hex = CacheKey::compute(b"", &Geometry::default()).hex();
		assert_eq!(hex.len(), 64);
		assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
	}

	#[test]
	fn committed_entries_can_be_looked_up_and_replayed() {
		let dir = tempdir().unwrap();
		let store = CacheStore::open(dir.path().join("nested")).unwrap();
		let key = CacheKey::compute(b"file", &Geometry::default());
		assert!(!store.lookup(&key));

		let mut writer = store.open_for_write(&key).unwrap();
		writer.write_all(b"rendered").unwrap();
		let mut out = Vec::new();
		writer.commit().unwrap().replay(&mut out).unwrap();
		assert_eq!(out, b"rendered");

		assert!(store.lookup(&key));
		assert_eq!(store.read(&key).unwrap(), b"rendered");

		let mut replayed = Vec::new();
		store.replay(&key, &mut replayed).unwrap();
		assert_eq!(replayed, b"rendered");
	}

	#[test]
	fn dropped_writer_leaves_no_entry() {
		let dir = tempdir().unwrap();
		let store = CacheStore::open(dir.path()).unwrap();
		let key = CacheKey::compute(b"file", &Geometry::default());

		let mut writer = store.open_for_write(&key).unwrap();
		writer.write_all(b"partial").unwrap();
		drop(writer);

		assert!(!store.lookup(&key));
		assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
	}

	#[test]
	fn reopening_an_existing_entry_replaces_it() {
		let dir = tempdir().unwrap();
		let store = CacheStore::open(dir.path()).unwrap();
		let key = CacheKey::compute(b"file", &Geometry::default());

		for payload in [&b"first"[..], &b"second"[..]] {
			let mut writer = store.open_for_write(&key).unwrap();
			writer.write_all(payload).unwrap();
			writer.commit().unwrap();
		}

		assert_eq!(store.read(&key).unwrap(), b"second");
	}

	#[test]
	fn disabled_store_never_hits() {
		let store = CacheStore::disabled();
		let key = CacheKey::compute(b"file", &Geometry::default());

		let mut writer = store.open_for_write(&key).unwrap();
		writer.write_all(b"ephemeral").unwrap();
		let mut out = Vec::new();
		writer.commit().unwrap().replay(&mut out).unwrap();

		assert_eq!(out, b"ephemeral");
		assert!(!store.lookup(&key));
		assert!(store.read(&key).is_err());
	}
}
