//! The running game and its command boundary.
//!
//! [`Game`] owns the state, the active adventure's hooks and commands, the
//! random source and the modal. Every player command enters through
//! [`Game::execute`] or [`Game::run_command`]; both catch [`CommandError`]s
//! at the boundary, write the message to the history, and skip the turn.

mod artifacts;
#[cfg(test)]
pub(crate) mod fixtures;
mod monsters;
mod setup;
mod spells;
mod turns;
mod visibility;

use std::rc::Rc;

use tracing::{debug, trace};

use crate::action::Action;
use crate::config::GameConfig;
use crate::env::RandomSource;
use crate::error::{CommandError, ExecuteError, GameResult, InvariantError};
use crate::hooks::{Adventure, CustomCommand, EventName, HookArgs, HookRegistry};
use crate::modal::Modal;
use crate::state::{
    Artifact, ArtifactId, GameState, GameStatus, Monster, MonsterId, Room, RoomId, Style,
};

pub use artifacts::{ArtifactHit, DamageSource};
pub use monsters::{FollowMode, Stat};
pub use spells::BlastTarget;

/// Result of one command at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The command ran and the turn advanced.
    Completed,
    /// The command was rejected; the message is also in the history.
    Rejected(CommandError),
    /// A modal question is waiting; the turn finishes once it closes.
    AwaitingAnswer,
}

/// A running adventure.
pub struct Game {
    pub state: GameState,
    pub config: GameConfig,
    pub(crate) modal: Modal,
    rng: Box<dyn RandomSource>,
    hooks: Rc<HookRegistry>,
    commands: Rc<[CustomCommand]>,
    slug: String,
}

impl Game {
    /// Wraps an already-populated state with an adventure.
    pub fn from_state(
        state: GameState,
        adventure: Adventure,
        config: GameConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        debug!(
            target: "core::turn",
            adventure = %adventure.slug,
            hooks = adventure.hooks.len(),
            commands = adventure.commands.len(),
            "adventure activated"
        );
        Self {
            state,
            config,
            modal: Modal::default(),
            rng,
            hooks: Rc::new(adventure.hooks),
            commands: adventure.commands.into(),
            slug: adventure.slug,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub(crate) fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    // ===== randomness =====

    /// Rolls dice through the game's random source.
    pub fn roll(&mut self, dice: i32, sides: i32) -> i32 {
        let result = self.rng.roll(dice, sides);
        trace!(target: "core::combat", dice, sides, result, "roll");
        result
    }

    pub fn random_index(&mut self, len: usize) -> Option<usize> {
        self.rng.random_index(len)
    }

    /// Swaps the random source, e.g. to replay scripted rolls.
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.rng = rng;
    }

    pub(crate) fn flavor_index(&mut self, len: usize) -> usize {
        self.rng.flavor_index(len)
    }

    // ===== transcript =====

    pub fn say(&mut self, text: impl Into<String>) {
        self.state.history.say(text);
    }

    pub fn write(&mut self, text: impl Into<String>, style: Style) {
        self.state.history.write(text, style);
    }

    // ===== lookups =====

    pub fn player(&self) -> Result<&Monster, InvariantError> {
        self.state.monsters.player()
    }

    pub fn monster(&self, id: MonsterId) -> Result<&Monster, InvariantError> {
        self.state.monsters.require(id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Result<&mut Monster, InvariantError> {
        self.state.monsters.require_mut(id)
    }

    pub fn artifact(&self, id: ArtifactId) -> Result<&Artifact, InvariantError> {
        self.state.artifacts.require(id)
    }

    pub fn artifact_mut(&mut self, id: ArtifactId) -> Result<&mut Artifact, InvariantError> {
        self.state.artifacts.require_mut(id)
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, InvariantError> {
        self.state.rooms.require(id)
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.state.rooms.current()
    }

    /// Living monster standing in the player's room.
    pub fn is_here(&self, id: MonsterId) -> bool {
        let room = self.current_room();
        room.is_some()
            && self
                .state
                .monsters
                .get(id)
                .is_some_and(|monster| monster.is_alive() && monster.room_id == room)
    }

    // ===== command boundary =====

    /// Runs one core action as a full turn.
    pub fn execute(&mut self, action: &Action) -> Result<TurnOutcome, InvariantError> {
        let action = action.clone();
        self.run_turn(action.to_string(), move |game| action.perform(game))
    }

    /// Runs a parsed verb and argument: adventure commands first, then core actions.
    pub fn run_command(&mut self, verb: &str, arg: &str) -> Result<TurnOutcome, InvariantError> {
        let label = if arg.is_empty() {
            verb.to_owned()
        } else {
            format!("{verb} {arg}")
        };
        let custom = self
            .commands
            .iter()
            .find(|command| command.handles(verb))
            .map(|command| Rc::clone(&command.run));
        if let Some(run) = custom {
            let (verb, arg) = (verb.to_owned(), arg.to_owned());
            return self.run_turn(label, move |game| run(game, &verb, &arg));
        }
        match Action::parse(verb, arg) {
            Some(action) => self.run_turn(label, move |game| action.perform(game)),
            None => self.run_turn(label, |_| {
                Err(ExecuteError::reject("I don't know that command."))
            }),
        }
    }

    fn run_turn<F>(&mut self, label: String, perform: F) -> Result<TurnOutcome, InvariantError>
    where
        F: FnOnce(&mut Game) -> GameResult<()>,
    {
        self.state.history.push(label.clone());
        if self.state.is_over() {
            let err = CommandError::new("The adventure is over.");
            self.write(err.message.clone(), Style::Warning);
            return Ok(TurnOutcome::Rejected(err));
        }
        if self.modal.is_open() {
            let err = CommandError::new("Please answer the question first.");
            self.write(err.message.clone(), Style::Warning);
            return Ok(TurnOutcome::Rejected(err));
        }
        debug!(target: "core::turn", command = %label, clock = self.state.turn.clock, "command");
        let result = perform(self).and_then(|()| self.tick());
        self.settle(result)
    }

    /// Converts an engine result into a boundary outcome.
    pub(crate) fn settle(&mut self, result: GameResult<()>) -> Result<TurnOutcome, InvariantError> {
        match result {
            Ok(()) if self.modal.is_open() => Ok(TurnOutcome::AwaitingAnswer),
            Ok(()) => Ok(TurnOutcome::Completed),
            Err(ExecuteError::Command(err)) => {
                debug!(target: "core::turn", message = %err, "command rejected");
                self.write(err.message.clone(), Style::Warning);
                Ok(TurnOutcome::Rejected(err))
            }
            Err(ExecuteError::Invariant(err)) => Err(err),
        }
    }

    /// Ends the adventure with the player alive, announcing it unless
    /// `silent`.
    pub fn exit(&mut self, silent: bool) -> GameResult<()> {
        if !self.gate(EventName::Exit, HookArgs::None)? {
            return Ok(());
        }
        if !silent {
            let message = self.config.exit_message.clone();
            self.write(message, Style::Success);
        }
        self.state.status = GameStatus::Won;
        self.state.turn.running = false;
        debug!(target: "core::turn", "player left the adventure");
        Ok(())
    }

    /// Ends the adventure with the player dead.
    pub fn die(&mut self) {
        self.state.status = GameStatus::Died;
        self.state.turn.running = false;
        self.state.turn.skip_battle_actions = true;
        debug!(target: "core::turn", "player died");
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("adventure", &self.slug)
            .field("clock", &self.state.turn.clock)
            .field("status", &self.state.status)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
