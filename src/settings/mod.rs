//! Resolution of CLI arguments and platform directories into the settings
//! a preview runs with.
//!
//! `load` is the primary entry point and returns a [`ResolvedConfig`].

mod loader;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{ResolvedConfig, Target};
