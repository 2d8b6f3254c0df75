//! Content factory for building games from data files.

use std::path::{Path, PathBuf};

use adventure_core::{Adventure, AdventureData, Game, GameConfig, RandomSource};
use tracing::info;

use crate::loaders::{AdventureLoader, ConfigLoader, LoadResult};

/// Content factory that loads a whole adventure from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── rooms.ron
/// ├── artifacts.ron    (optional)
/// ├── monsters.ron     (optional)
/// ├── effects.ron      (optional)
/// └── player.ron       (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the defaults when the
    /// adventure ships none.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("config.toml"))
    }

    /// Load the adventure records.
    pub fn load_adventure(&self) -> LoadResult<AdventureData> {
        AdventureLoader::load(&self.data_dir)
    }

    /// Loads config and records and builds a game around the given hooks.
    ///
    /// The game is not started; call [`Game::start`] to run the first turn.
    pub fn build_game(
        &self,
        adventure: Adventure,
        rng: Box<dyn RandomSource>,
    ) -> LoadResult<Game> {
        let config = self.load_config()?;
        let data = self.load_adventure()?;
        let slug = adventure.slug.clone();
        let game = Game::new(data, adventure, config, rng).map_err(|e| {
            anyhow::anyhow!(
                "Adventure data at {} is inconsistent: {}",
                self.data_dir.display(),
                e
            )
        })?;
        info!(adventure = %slug, dir = %self.data_dir.display(), "adventure loaded");
        Ok(game)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use adventure_core::{FixedRng, RoomId, SpellRecharge};

    use super::*;

    fn gatehouse() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/gatehouse"))
    }

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_adventure_loads() {
        let factory = gatehouse();
        let config = factory.load_config().unwrap();
        assert_eq!(config.money_name, "silver marks");
        assert_eq!(config.spell_recharge, SpellRecharge::Percentage(50));

        let data = factory.load_adventure().unwrap();
        assert_eq!(data.rooms.len(), 3);
        assert_eq!(data.player.name, "Wanderer");
    }

    #[test]
    fn bundled_adventure_builds_and_starts() {
        let mut game = gatehouse()
            .build_game(Adventure::new("gatehouse"), Box::new(FixedRng::new([])))
            .unwrap();
        game.start().unwrap();
        assert_eq!(game.current_room(), Some(RoomId(1)));
        assert!(game.state.history.mentions("Gatehouse"));
    }

    #[test]
    fn inconsistent_data_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rooms.ron"),
            "(rooms: [(id: Some(1), name: \"A\"), (id: Some(1), name: \"B\")])",
        )
        .unwrap();
        let err = ContentFactory::new(dir.path())
            .build_game(Adventure::new("broken"), Box::new(FixedRng::new([])))
            .unwrap_err();
        assert!(err.to_string().contains("inconsistent"));
    }
}
