use crate::engine::Game;
use crate::error::GameResult;

/// Defines how a concrete player command changes the game.
///
/// Implementors surface their rejections in [`ActionTransition::pre_validate`]
/// where they can, so a refused command leaves the state untouched. Checks
/// that depend on hooks or on revealing something run inside `apply` and
/// reject from there.
pub trait ActionTransition {
    /// Validates pre-conditions against the state **before** any mutation.
    fn pre_validate(&self, _game: &Game) -> GameResult<()> {
        Ok(())
    }

    /// Fires the command's hooks and applies its default behavior.
    /// Implementations may assume `pre_validate` already passed.
    fn apply(&self, game: &mut Game) -> GameResult<()>;

    /// Validates, then applies.
    fn run(&self, game: &mut Game) -> GameResult<()> {
        self.pre_validate(game)?;
        self.apply(game)
    }
}
