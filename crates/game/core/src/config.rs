/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Room the player enters when the adventure starts.
    pub starting_room: u32,

    /// Ask for confirmation before leaving through an exit sentinel.
    pub exit_prompt: bool,

    /// Message written when the player leaves the adventure.
    pub exit_message: String,

    /// Currency noun used in gold-related messages.
    pub money_name: String,

    /// How spell abilities recover every turn.
    pub spell_recharge: SpellRecharge,

    /// Group members delegated a combat action per tick, at most
    /// [`GameConfig::MAX_GROUP_ACTORS_PER_TICK`].
    pub group_actors_per_tick: usize,

    pub flee_verbs: FleeVerbs,
}

/// Verb used when one or several monsters flee ("flees" / "flee").
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeVerbs {
    pub singular: String,
    pub plural: String,
}

impl FleeVerbs {
    pub fn for_count(&self, count: usize) -> &str {
        if count == 1 { &self.singular } else { &self.plural }
    }
}

impl Default for FleeVerbs {
    fn default() -> Self {
        Self {
            singular: "flees".to_owned(),
            plural: "flee".to_owned(),
        }
    }
}

/// Per-turn spell ability recovery rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpellRecharge {
    /// Abilities recover this many points per turn.
    Constant(i32),
    /// Abilities recover this percentage of their current value per turn,
    /// at least one point.
    Percentage(i32),
}

impl SpellRecharge {
    /// Amount restored this turn for a spell currently at `ability`.
    pub fn amount(self, ability: i32) -> i32 {
        match self {
            Self::Constant(points) => points,
            Self::Percentage(percent) => (ability * percent / 100).max(1),
        }
    }
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Group members that take a combat action on a single tick.
    pub const MAX_GROUP_ACTORS_PER_TICK: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_ROOM: u32 = 1;
    pub const DEFAULT_MONEY_NAME: &'static str = "gold pieces";
    pub const DEFAULT_EXIT_MESSAGE: &'static str = "You successfully ride off into the sunset.";

    pub fn new() -> Self {
        Self {
            starting_room: Self::DEFAULT_STARTING_ROOM,
            exit_prompt: true,
            exit_message: Self::DEFAULT_EXIT_MESSAGE.to_owned(),
            money_name: Self::DEFAULT_MONEY_NAME.to_owned(),
            spell_recharge: SpellRecharge::Constant(1),
            group_actors_per_tick: Self::MAX_GROUP_ACTORS_PER_TICK,
            flee_verbs: FleeVerbs::default(),
        }
    }

    /// Effective per-tick group delegation cap.
    pub fn group_actor_cap(&self) -> usize {
        self.group_actors_per_tick.min(Self::MAX_GROUP_ACTORS_PER_TICK)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for SpellRecharge {
    fn default() -> Self {
        Self::Constant(1)
    }
}
