//! Game configuration loader.

use std::path::Path;

use adventure_core::GameConfig;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Keys the file leaves out keep
    /// their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e))
    }

    /// Like [`ConfigLoader::load`], but a missing file means the defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<GameConfig> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<GameConfig, toml::de::Error> {
        toml::from_str(content)
    }
}
