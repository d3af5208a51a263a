use std::path::{Path, PathBuf};

use terminal_size::{Height, Width, terminal_size};

const FALLBACK_WIDTH: u16 = 80;
const FALLBACK_HEIGHT: u16 = 24;

/// Display area a renderer is asked to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
	pub width: u16,
	pub height: u16,
	pub x: Option<u16>,
	pub y: Option<u16>,
}

impl Geometry {
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			x: None,
			y: None,
		}
	}

	/// Size of the attached terminal, or 80x24 when there is none.
	pub fn detect() -> Self {
		match terminal_size() {
			Some((Width(width), Height(height))) => Self::new(width, height),
			None => Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT),
		}
	}

	/// Replace individual fields with explicitly requested values.
	pub fn with_overrides(
		mut self,
		width: Option<u16>,
		height: Option<u16>,
		x: Option<u16>,
		y: Option<u16>,
	) -> Self {
		if let Some(width) = width {
			self.width = width;
		}
		if let Some(height) = height {
			self.height = height;
		}
		self.x = x.or(self.x);
		self.y = y.or(self.y);
		self
	}

	/// Environment variables describing this geometry to a delegate.
	pub fn env_vars(&self) -> Vec<(&'static str, String)> {
		let mut vars = vec![
			("TVIEW_WIDTH", self.width.to_string()),
			("TVIEW_HEIGHT", self.height.to_string()),
		];
		if let Some(x) = self.x {
			vars.push(("TVIEW_X", x.to_string()));
		}
		if let Some(y) = self.y {
			vars.push(("TVIEW_Y", y.to_string()));
		}
		vars
	}
}

impl Default for Geometry {
	fn default() -> Self {
		Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
	}
}

/// Everything a single dispatch needs to know about its target.
#[derive(Debug, Clone)]
pub struct RenderContext {
	path: PathBuf,
	content: Option<Vec<u8>>,
	geometry: Geometry,
}

impl RenderContext {
	pub fn new(path: impl Into<PathBuf>, geometry: Geometry) -> Self {
		Self {
			path: path.into(),
			content: None,
			geometry,
		}
	}

	/// Attach content that has already been read so it is not read twice.
	pub fn with_content(mut self, content: Vec<u8>) -> Self {
		self.content = Some(content);
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn content(&self) -> Option<&[u8]> {
		self.content.as_deref()
	}

	pub fn geometry(&self) -> Geometry {
		self.geometry
	}
}
