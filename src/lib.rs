//! Core crate exports for `tview`, a terminal previewer that hands files to
//! external renderers based on their content type.
//!
//! The root module re-exports the pieces an embedder needs to assemble a
//! [`Dispatcher`]: a [`RendererTable`], a [`Resolver`] and a [`CacheStore`].

pub mod app_dirs;
pub mod cache;
pub mod classify;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod media;
pub mod renderers;
pub mod resolver;

pub use cache::{CacheKey, CacheStore};
pub use classify::{Classification, classify};
pub use context::{Geometry, RenderContext};
pub use dispatch::{DispatchReport, Dispatcher, Executor, ShellExecutor};
pub use error::PreviewError;
pub use media::MediaType;
pub use renderers::{RendererOverrides, RendererTable, build_table, load_overrides};
pub use resolver::{CommandSpec, Resolver};
