use super::Tick;

/// Turn clock and combat bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    /// Completed turns.
    pub clock: Tick,

    /// False while a modal question is awaiting an answer or the game is over.
    pub running: bool,

    /// A hostile monster is in the player's room.
    pub in_battle: bool,

    /// Suppresses monster battle actions for the rest of this turn.
    pub skip_battle_actions: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            clock: 0,
            running: true,
            in_battle: false,
            skip_battle_actions: false,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the adventure is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    Active,
    /// The player left the adventure alive.
    Won,
    Died,
}

/// Running totals shown on the exit screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub secret_doors_found: u32,
    pub enemies_killed: u32,
}
