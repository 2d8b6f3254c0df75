//! Adventure data loaders.
//!
//! An adventure is authored as a directory of flat keyed records:
//! - Rooms and their exits (`rooms.ron`)
//! - Artifacts (`artifacts.ron`)
//! - Monsters and monster groups (`monsters.ron`)
//! - Narrative effects (`effects.ron`)
//! - The player character (`player.ron`)
//! - Rule tunables (`config.toml`)
//!
//! Records are the `adventure-core` record types deserialized with serde;
//! scripted behavior (hooks and custom commands) is supplied in code when the
//! game is built.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{AdventureLoader, ConfigLoader, ContentFactory, LoadResult};
