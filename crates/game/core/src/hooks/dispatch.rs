use tracing::{debug, trace, warn};

use super::{EventName, HookArgs, HookOutcome, HookValue};
use crate::engine::Game;
use crate::error::GameResult;
use crate::state::MonsterId;

impl Game {
    /// Runs the handler for `event`, if any, and returns what it said.
    pub fn trigger(&mut self, event: EventName, args: HookArgs) -> GameResult<HookOutcome> {
        let Some(handler) = self.hooks().find(event).cloned() else {
            trace!(target: "core::hooks", event = %event, "no handler");
            return Ok(HookOutcome::NotHandled);
        };
        trace!(target: "core::hooks", event = %event, args = ?args, "dispatching");
        let outcome = handler(self, &args)?;
        if !outcome.allows_default() {
            debug!(target: "core::hooks", event = %event, outcome = ?outcome, "handler overrode default");
        }
        Ok(outcome)
    }

    /// Gate event: true when the default behavior should run.
    pub fn gate(&mut self, event: EventName, args: HookArgs) -> GameResult<bool> {
        Ok(self.trigger(event, args)?.allows_default())
    }

    /// Value event: the replacement value, or `None` to keep the computed one.
    ///
    /// A handler returning `false` replaces the value with 0.
    pub fn override_value(&mut self, event: EventName, args: HookArgs) -> GameResult<Option<i32>> {
        Ok(match self.trigger(event, args)? {
            HookOutcome::NotHandled | HookOutcome::Handled(HookValue::Bool(true)) => None,
            HookOutcome::Handled(HookValue::Number(value)) => Some(value),
            HookOutcome::Handled(HookValue::Bool(false)) => Some(0),
            HookOutcome::Handled(HookValue::Monster(_)) => {
                warn!(target: "core::hooks", event = %event, "value hook returned a monster; ignored");
                None
            }
        })
    }

    /// Target event: the replacement target, `None` to cancel, or `default`.
    pub fn override_target(
        &mut self,
        event: EventName,
        args: HookArgs,
        default: Option<MonsterId>,
    ) -> GameResult<Option<MonsterId>> {
        Ok(match self.trigger(event, args)? {
            HookOutcome::Handled(HookValue::Monster(monster)) => Some(monster),
            HookOutcome::Handled(HookValue::Bool(false)) => None,
            _ => default,
        })
    }
}
