//! Player commands.
//!
//! Each command is a small struct implementing [`ActionTransition`]; the
//! [`Action`] enum names them all so the command boundary can parse a verb
//! and argument, label the history entry and run the command as one turn.
//!
//! # Module Structure
//!
//! - `movement`: move, flee, look
//! - `inventory`: get, drop, wear, remove, ready, give
//! - `interact`: open, close, read, use / eat / drink
//! - `combat`: attack a monster or an artifact
//! - `magic`: blast, heal, speed, power

mod combat;
mod interact;
mod inventory;
mod magic;
mod movement;
mod transition;

use std::fmt;

pub use combat::AttackAction;
pub use interact::{CloseAction, OpenAction, ReadAction, UseAction, UseVerb};
pub use inventory::{DropAction, GetAction, GiveAction, ReadyAction, RemoveAction, WearAction};
pub use magic::SpellAction;
pub use movement::{FleeAction, LookAction, MoveAction};
pub use transition::ActionTransition;

use crate::engine::Game;
use crate::error::GameResult;
use crate::state::{ArtifactId, MonsterId, Spell, normalize_direction};

const DIRECTIONS: [&str; 10] = ["n", "s", "e", "w", "ne", "nw", "se", "sw", "u", "d"];

/// Every core command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move(MoveAction),
    Flee(FleeAction),
    Look(LookAction),
    Get(GetAction),
    Drop(DropAction),
    Wear(WearAction),
    Remove(RemoveAction),
    Ready(ReadyAction),
    Give(GiveAction),
    Open(OpenAction),
    Close(CloseAction),
    Read(ReadAction),
    Use(UseAction),
    Attack(AttackAction),
    Spell(SpellAction),
}

impl Action {
    /// Maps a verb and its argument to a core command. Unknown verbs give
    /// `None`.
    pub fn parse(verb: &str, arg: &str) -> Option<Self> {
        let verb = verb.trim().to_lowercase();
        let arg = arg.trim().to_owned();
        let direction = normalize_direction(&verb);
        if DIRECTIONS.contains(&direction.as_str()) {
            return Some(Self::Move(MoveAction::new(direction)));
        }
        let action = match verb.as_str() {
            "flee" => Self::Flee(FleeAction { arg }),
            "look" | "examine" => Self::Look(LookAction { arg }),
            "get" => Self::Get(GetAction { arg }),
            "drop" => Self::Drop(DropAction { arg }),
            "wear" => Self::Wear(WearAction { arg }),
            "remove" => Self::Remove(RemoveAction { arg }),
            "ready" => Self::Ready(ReadyAction { arg }),
            "give" => Self::Give(GiveAction { arg }),
            "open" => Self::Open(OpenAction { arg }),
            "close" => Self::Close(CloseAction { arg }),
            "read" => Self::Read(ReadAction { arg }),
            "use" => Self::Use(UseAction { verb: UseVerb::Use, arg }),
            "eat" => Self::Use(UseAction { verb: UseVerb::Eat, arg }),
            "drink" => Self::Use(UseAction { verb: UseVerb::Drink, arg }),
            "attack" => Self::Attack(AttackAction { arg }),
            "blast" => Self::Spell(SpellAction { spell: Spell::Blast, arg }),
            "heal" => Self::Spell(SpellAction { spell: Spell::Heal, arg }),
            "speed" => Self::Spell(SpellAction { spell: Spell::Speed, arg }),
            "power" => Self::Spell(SpellAction { spell: Spell::Power, arg }),
            _ => return None,
        };
        Some(action)
    }

    fn as_transition(&self) -> &dyn ActionTransition {
        match self {
            Self::Move(action) => action,
            Self::Flee(action) => action,
            Self::Look(action) => action,
            Self::Get(action) => action,
            Self::Drop(action) => action,
            Self::Wear(action) => action,
            Self::Remove(action) => action,
            Self::Ready(action) => action,
            Self::Give(action) => action,
            Self::Open(action) => action,
            Self::Close(action) => action,
            Self::Read(action) => action,
            Self::Use(action) => action,
            Self::Attack(action) => action,
            Self::Spell(action) => action,
        }
    }

    /// Runs the command without advancing the clock.
    pub fn perform(&self, game: &mut Game) -> GameResult<()> {
        self.as_transition().run(game)
    }

    fn verb(&self) -> &str {
        match self {
            Self::Move(action) => &action.direction,
            Self::Flee(_) => "flee",
            Self::Look(_) => "look",
            Self::Get(_) => "get",
            Self::Drop(_) => "drop",
            Self::Wear(_) => "wear",
            Self::Remove(_) => "remove",
            Self::Ready(_) => "ready",
            Self::Give(_) => "give",
            Self::Open(_) => "open",
            Self::Close(_) => "close",
            Self::Read(_) => "read",
            Self::Use(action) => action.verb.as_ref(),
            Self::Attack(_) => "attack",
            Self::Spell(action) => action.spell.as_ref(),
        }
    }

    fn arg(&self) -> &str {
        match self {
            Self::Move(_) => "",
            Self::Flee(action) => &action.arg,
            Self::Look(action) => &action.arg,
            Self::Get(action) => &action.arg,
            Self::Drop(action) => &action.arg,
            Self::Wear(action) => &action.arg,
            Self::Remove(action) => &action.arg,
            Self::Ready(action) => &action.arg,
            Self::Give(action) => &action.arg,
            Self::Open(action) => &action.arg,
            Self::Close(action) => &action.arg,
            Self::Read(action) => &action.arg,
            Self::Use(action) => &action.arg,
            Self::Attack(action) => &action.arg,
            Self::Spell(action) => &action.arg,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg() {
            "" => f.write_str(self.verb()),
            arg => write!(f, "{} {arg}", self.verb()),
        }
    }
}

/// Artifact called `name` in the player's room or inventory.
fn local_artifact(game: &Game, name: &str) -> Option<ArtifactId> {
    game.state.artifacts.find_local(name, game.current_room())
}

/// Monster called `name` in the player's room.
fn local_monster(game: &Game, name: &str) -> Option<MonsterId> {
    game.state.monsters.find_local(name, game.current_room())
}

/// The current room's description mentions `word` (lowercase).
fn room_mentions(game: &Game, word: &str) -> bool {
    game.state
        .rooms
        .current_room()
        .is_some_and(|room| room.info.description.to_lowercase().contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_directions_parse_as_moves() {
        assert_eq!(Action::parse("North", ""), Some(Action::Move(MoveAction::new("n"))));
        assert_eq!(Action::parse("u", "").map(|a| a.to_string()), Some("u".to_owned()));
    }

    #[test]
    fn eat_and_drink_share_the_use_command() {
        let Some(Action::Use(action)) = Action::parse("drink", "potion") else {
            panic!("drink should parse");
        };
        assert_eq!(action.verb, UseVerb::Drink);
        assert_eq!(Action::Use(action).to_string(), "drink potion");
    }

    #[test]
    fn unknown_verbs_are_left_to_the_caller() {
        assert_eq!(Action::parse("xyzzy", ""), None);
    }
}
