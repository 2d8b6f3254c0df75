//! Event hook bus.
//!
//! Every overridable core behavior is wrapped in a named event. An adventure
//! registers at most one handler per event; the engine dispatches through
//! [`crate::Game`] so handlers can read and mutate the whole game.
//!
//! # Contract
//!
//! - No handler, or a handler returning [`HookValue::Bool`]`(true)`: the
//!   engine proceeds with the default behavior.
//! - Any other [`HookOutcome::Handled`] value is an override. Gate events
//!   cancel the default; value events replace the computed number; target
//!   events replace the chosen monster.
//! - A handler may return a [`crate::CommandError`] to reject the command.

mod dispatch;
mod registry;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::state::{ArtifactId, ExitTarget, MonsterId, RoomId, Spell};

pub use registry::{Adventure, CommandFn, CustomCommand, HookFn, HookRegistry};

/// Names of every hookable behavior.
///
/// Names serialize in camelCase ("beforeMove", "endTurn1").
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum EventName {
    // lifecycle
    /// `None` once, when the adventure starts.
    Start,
    /// `None` when the player leaves; a veto keeps them in the adventure.
    Exit,

    // movement
    /// `Move` before the player leaves a room.
    BeforeMove,
    /// `Move` after the player arrived.
    AfterMove,
    /// `Flee` before the player flees.
    Flee,

    // interaction
    BeforeGet,
    AfterGet,
    BeforeOpen,
    AfterOpen,
    BeforeClose,
    AfterClose,
    BeforeRead,
    AfterRead,
    /// `Give` before an artifact changes hands.
    Give,
    AfterGive,
    /// `Gold` before gold changes hands.
    GiveGold,
    Use,
    Drop,
    Wear,
    Remove,
    Ready,

    // combat
    /// `Attack` before the player attacks a monster.
    AttackMonster,
    /// `Artifact` before the player attacks an artifact.
    AttackArtifact,
    /// `Combat`: value event replacing the to-hit odds.
    AttackOdds,
    /// `Combat`: value event replacing rolled damage.
    AttackDamage,
    /// `Combat` after damage was applied.
    AttackDamageAfter,
    /// `Combat` before the miss message; a veto silences it.
    Miss,
    /// `Combat` with the fumble roll; a veto cancels the fumble effect.
    Fumble,
    /// `Death`; a veto keeps the monster alive.
    Death,
    /// `Monster` after a monster died.
    AfterDeath,
    /// `Monster` before a monster's battle action.
    MonsterAction,
    /// `Combat` with the default target as defender: target event replacing it.
    ChooseTarget,

    // perception
    SeeMonster,
    SeeArtifact,
    SeeRoom,
    RevealArtifact,

    // spellcasting
    BeforeSpell,
    SpellBacklash,
    SpellExpires,
    /// `Roll` when the power spell succeeds.
    Power,
    /// `Spell` before a blast spell hits.
    Blast,
    /// `Combat`: value event replacing blast damage.
    BlastDamage,
    /// `Monster` after the player's armor class was recomputed.
    ArmorClass,

    // turn phases
    EndTurn,
    #[strum(serialize = "endTurn1")]
    EndTurn1,
    #[strum(serialize = "endTurn2")]
    EndTurn2,
}

/// Argument list carried by an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookArgs {
    None,
    Command {
        arg: String,
    },
    Move {
        arg: String,
        from: RoomId,
        to: ExitTarget,
    },
    Flee {
        arg: String,
    },
    Artifact {
        arg: String,
        artifact: ArtifactId,
    },
    Give {
        arg: String,
        artifact: ArtifactId,
        recipient: MonsterId,
    },
    Gold {
        arg: String,
        amount: i32,
        recipient: MonsterId,
    },
    Attack {
        arg: String,
        target: MonsterId,
    },
    Combat {
        attacker: MonsterId,
        defender: MonsterId,
        value: i32,
    },
    Monster {
        monster: MonsterId,
    },
    Death {
        monster: MonsterId,
        attacker: Option<MonsterId>,
    },
    Reveal {
        artifact: ArtifactId,
    },
    Room {
        room: RoomId,
    },
    Spell {
        spell: Spell,
        target: Option<MonsterId>,
    },
    Roll {
        roll: i32,
    },
}

/// Value a handler returns when it handled the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookValue {
    Bool(bool),
    Number(i32),
    Monster(MonsterId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HookOutcome {
    /// No handler ran; the default behavior applies.
    #[default]
    NotHandled,
    Handled(HookValue),
}

impl HookOutcome {
    /// Handled, but let the default behavior run.
    pub const fn proceed() -> Self {
        Self::Handled(HookValue::Bool(true))
    }

    /// Cancel the default behavior.
    pub const fn veto() -> Self {
        Self::Handled(HookValue::Bool(false))
    }

    /// Replace the computed value.
    pub const fn value(value: i32) -> Self {
        Self::Handled(HookValue::Number(value))
    }

    /// Replace the chosen target.
    pub const fn target(monster: MonsterId) -> Self {
        Self::Handled(HookValue::Monster(monster))
    }

    /// True when the default behavior should run.
    pub fn allows_default(self) -> bool {
        matches!(self, Self::NotHandled | Self::Handled(HookValue::Bool(true)))
    }
}
