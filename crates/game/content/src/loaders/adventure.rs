//! Adventure record loader.

use std::path::Path;

use adventure_core::env::{
    AdventureData, ArtifactRecord, EffectRecord, MonsterRecord, PlayerRecord, RoomRecord,
};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Room catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomCatalog {
    pub rooms: Vec<RoomRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactCatalog {
    pub artifacts: Vec<ArtifactRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<EffectRecord>,
}

/// Loader for an adventure directory.
///
/// `rooms.ron` is required. `artifacts.ron`, `monsters.ron`, `effects.ron`
/// and `player.ron` may be left out, in which case the adventure has none of
/// them (or the default player).
pub struct AdventureLoader;

impl AdventureLoader {
    pub const ROOMS_FILE: &'static str = "rooms.ron";
    pub const ARTIFACTS_FILE: &'static str = "artifacts.ron";
    pub const MONSTERS_FILE: &'static str = "monsters.ron";
    pub const EFFECTS_FILE: &'static str = "effects.ron";
    pub const PLAYER_FILE: &'static str = "player.ron";

    /// Load every record file in `dir`.
    pub fn load(dir: &Path) -> LoadResult<AdventureData> {
        let rooms: RoomCatalog = Self::load_ron(&dir.join(Self::ROOMS_FILE))?;
        if rooms.rooms.is_empty() {
            anyhow::bail!("Adventure at {} has no rooms", dir.display());
        }
        let artifacts: ArtifactCatalog = Self::load_optional(&dir.join(Self::ARTIFACTS_FILE))?;
        let monsters: MonsterCatalog = Self::load_optional(&dir.join(Self::MONSTERS_FILE))?;
        let effects: EffectCatalog = Self::load_optional(&dir.join(Self::EFFECTS_FILE))?;
        let player: PlayerRecord = Self::load_optional(&dir.join(Self::PLAYER_FILE))?;

        debug!(
            dir = %dir.display(),
            rooms = rooms.rooms.len(),
            artifacts = artifacts.artifacts.len(),
            monsters = monsters.monsters.len(),
            effects = effects.effects.len(),
            "loaded adventure records"
        );

        Ok(AdventureData {
            rooms: rooms.rooms,
            artifacts: artifacts.artifacts,
            monsters: monsters.monsters,
            effects: effects.effects,
            player,
        })
    }

    fn load_optional<T: DeserializeOwned + Default>(path: &Path) -> LoadResult<T> {
        if path.exists() {
            Self::load_ron(path)
        } else {
            Ok(T::default())
        }
    }

    fn load_ron<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse RON at {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOMS: &str = r#"(
        rooms: [
            (
                id: Some(1),
                name: "Cellar",
                description: "Barrels line the walls.",
                is_dark: true,
                exits: [(direction: "u", room_to: -999)],
            ),
        ],
    )"#;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn optional_files_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AdventureLoader::ROOMS_FILE, ROOMS);

        let data = AdventureLoader::load(dir.path()).unwrap();
        assert_eq!(data.rooms.len(), 1);
        assert!(data.rooms[0].is_dark);
        assert_eq!(data.rooms[0].exits[0].room_to, -999);
        assert!(data.artifacts.is_empty());
        assert!(data.monsters.is_empty());
        assert_eq!(data.player, PlayerRecord::default());
    }

    #[test]
    fn records_keep_their_defaults_for_absent_fields() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AdventureLoader::ROOMS_FILE, ROOMS);
        write(
            dir.path(),
            AdventureLoader::MONSTERS_FILE,
            r#"(monsters: [(name: "rat", room_id: Some(1), count: 3, name_plural: Some("rats"))])"#,
        );
        write(
            dir.path(),
            AdventureLoader::ARTIFACTS_FILE,
            r#"(artifacts: [(name: "lantern", type: 5, room_id: Some(1), is_lit: true)])"#,
        );

        let data = AdventureLoader::load(dir.path()).unwrap();
        let rats = &data.monsters[0];
        assert_eq!(rats.count, 3);
        assert_eq!(rats.friendliness, "hostile");
        assert_eq!(rats.courage, 100);
        assert_eq!(data.artifacts[0].kind, 5);
        assert!(data.artifacts[0].is_lit);
    }

    #[test]
    fn missing_rooms_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AdventureLoader::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(AdventureLoader::ROOMS_FILE));
    }

    #[test]
    fn empty_room_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AdventureLoader::ROOMS_FILE, "(rooms: [])");
        let err = AdventureLoader::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("no rooms"));
    }

    #[test]
    fn malformed_records_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AdventureLoader::ROOMS_FILE, ROOMS);
        write(dir.path(), AdventureLoader::EFFECTS_FILE, "(effects: [(text: 12)])");
        let err = AdventureLoader::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(AdventureLoader::EFFECTS_FILE));
    }
}
