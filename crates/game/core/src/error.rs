//! Common error infrastructure for adventure-core.
//!
//! Two kinds of failure flow through the engine and they must never be mixed:
//!
//! - [`CommandError`] is a player-facing rejection ("You can't go that way!").
//!   It aborts the current command before the turn advances, and the message is
//!   written to the history at the command boundary.
//! - [`InvariantError`] signals corrupted adventure data or an engine bug
//!   (duplicate ids, unknown references). It is never shown as a game message
//!   and bubbles out of [`crate::Game::execute`].
//!
//! [`HookError`] is raised while an adventure is being activated, before any
//! command runs.

use crate::state::{ArtifactId, EffectId, MonsterId, RoomId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player may retry with a different command
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted adventure data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative command.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown target, exit blocked, container closed
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - adventure data corrupted, cannot continue.
    ///
    /// Examples: duplicate entity id, hook registered under an unknown event
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all adventure-core errors.
///
/// Provides a uniform interface for error classification across the crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Player-facing rejection of a command.
///
/// Raised by default command logic or by adventure hooks. The engine catches
/// it at the command boundary, writes [`CommandError::message`] to the history
/// and skips the turn without staging any further mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "COMMAND_REJECTED"
    }
}

/// Violated data or engine invariant. Never converted into a game message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("room id {0} already exists")]
    DuplicateRoom(RoomId),

    #[error("artifact id {0} already exists")]
    DuplicateArtifact(ArtifactId),

    #[error("monster id {0} already exists")]
    DuplicateMonster(MonsterId),

    #[error("effect id {0} already exists")]
    DuplicateEffect(EffectId),

    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    #[error("artifact {0} does not exist")]
    UnknownArtifact(ArtifactId),

    #[error("monster {0} does not exist")]
    UnknownMonster(MonsterId),

    #[error("the player record is missing")]
    MissingPlayer,

    #[error("monster id {0} is outside the top-level id range")]
    MonsterIdOutOfRange(MonsterId),

    #[error("monster {0} is not a group")]
    NotAGroup(MonsterId),

    #[error("artifact type code {0} is not recognized")]
    UnknownArtifactKind(u8),

    #[error("a modal was opened without questions")]
    EmptyModal,

    #[error("no modal question is awaiting an answer")]
    NoPendingQuestion,
}

impl GameError for InvariantError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyModal | Self::NoPendingQuestion => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateRoom(_)
            | Self::DuplicateArtifact(_)
            | Self::DuplicateMonster(_)
            | Self::DuplicateEffect(_) => "DUPLICATE_ID",
            Self::UnknownRoom(_) | Self::UnknownArtifact(_) | Self::UnknownMonster(_) => {
                "UNKNOWN_REFERENCE"
            }
            Self::MissingPlayer => "MISSING_PLAYER",
            Self::MonsterIdOutOfRange(_) => "MONSTER_ID_OUT_OF_RANGE",
            Self::NotAGroup(_) => "NOT_A_GROUP",
            Self::UnknownArtifactKind(_) => "UNKNOWN_ARTIFACT_KIND",
            Self::EmptyModal => "EMPTY_MODAL",
            Self::NoPendingQuestion => "NO_PENDING_QUESTION",
        }
    }
}

/// Failure while wiring an adventure's hook table or custom commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("hook '{0}' does not name a known event")]
    UnknownEvent(String),

    #[error("custom command '{0}' declares no verbs")]
    CommandWithoutVerbs(String),
}

impl GameError for HookError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEvent(_) => "UNKNOWN_EVENT",
            Self::CommandWithoutVerbs(_) => "COMMAND_WITHOUT_VERBS",
        }
    }
}

/// Errors surfaced while running engine operations.
///
/// Hooks and engine methods return this so that both a [`CommandError`]
/// raised deep inside an operation and an [`InvariantError`] propagate with `?`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl ExecuteError {
    /// Shorthand for rejecting a command with a player-facing message.
    pub fn reject(message: impl Into<String>) -> Self {
        Self::Command(CommandError::new(message))
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Command(err) => err.severity(),
            Self::Invariant(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Command(err) => err.error_code(),
            Self::Invariant(err) => err.error_code(),
        }
    }
}

/// Result alias used by engine operations and hook handlers.
pub type GameResult<T> = Result<T, ExecuteError>;
