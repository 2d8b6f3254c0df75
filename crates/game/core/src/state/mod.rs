//! Authoritative game state representation.
//!
//! This module owns the entity types, the repositories that store them and
//! the turn bookkeeping. Everything mutates through [`crate::Game`].
pub mod types;
mod turn;

use std::collections::BTreeMap;

use crate::repository::{
    ArtifactRepository, EffectRepository, MonsterRepository, RoomRepository,
};
pub use turn::{GameStatus, Statistics, TurnState};
pub use types::*;

/// Canonical snapshot of a running adventure.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub rooms: RoomRepository,
    pub artifacts: ArtifactRepository,
    pub monsters: MonsterRepository,
    pub effects: EffectRepository,
    pub history: History,
    pub turn: TurnState,
    pub status: GameStatus,
    pub statistics: Statistics,
    /// Free-form counters and flags for adventure scripts.
    pub data: BTreeMap<String, i64>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Room the player stands in.
    pub fn current_room(&self) -> Option<RoomId> {
        self.rooms.current()
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Active
    }

    /// Script counter, 0 when unset.
    pub fn flag(&self, key: &str) -> i64 {
        self.data.get(key).copied().unwrap_or(0)
    }

    pub fn set_flag(&mut self, key: impl Into<String>, value: i64) {
        self.data.insert(key.into(), value);
    }
}
