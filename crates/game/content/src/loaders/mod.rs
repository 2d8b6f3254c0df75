//! Content loaders for reading adventure data from files.
//!
//! RON holds the records, TOML holds the configuration. Every loader reports
//! failures with the offending path attached.

pub mod adventure;
pub mod config;
pub mod factory;

pub use adventure::AdventureLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
