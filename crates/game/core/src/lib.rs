//! Rules core for classic text adventures.
//!
//! `adventure-core` owns the world model (rooms, artifacts, monsters, groups
//! and effects), the player commands, melee and spell combat, and the turn
//! cycle that follows every command. Adventures customize the rules through
//! named hooks and custom commands registered on an [`Adventure`]. All state
//! mutation flows through [`Game`], and loaders such as `adventure-content`
//! build one from [`env::AdventureData`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod hooks;
pub mod modal;
pub mod repository;
pub mod state;

pub use action::{
    Action, ActionTransition, AttackAction, CloseAction, DropAction, FleeAction, GetAction,
    GiveAction, LookAction, MoveAction, OpenAction, ReadAction, ReadyAction, RemoveAction,
    SpellAction, UseAction, UseVerb, WearAction,
};
pub use config::{FleeVerbs, GameConfig, SpellRecharge};
pub use engine::{
    ArtifactHit, BlastTarget, DamageSource, FollowMode, Game, Stat, TurnOutcome,
};
pub use env::{AdventureData, FixedRng, PcgRng, RandomSource};
pub use error::{
    CommandError, ErrorSeverity, ExecuteError, GameError, GameResult, HookError, InvariantError,
};
pub use hooks::{Adventure, CustomCommand, EventName, HookArgs, HookOutcome, HookRegistry};
pub use modal::{Question, QuestionKind};
pub use state::{
    Armament, Artifact, ArtifactId, ArtifactKind, Effect, EffectId, Exit, ExitTarget, GameState,
    GameStatus, History, Monster, MonsterId, Reaction, Room, RoomId, Spell, Style, TurnState,
};
