//! Moving between rooms, fleeing and looking around.

use tracing::debug;

use super::{ActionTransition, local_artifact, local_monster, room_mentions};
use crate::engine::{FollowMode, Game};
use crate::error::{ExecuteError, GameResult};
use crate::hooks::{EventName, HookArgs};
use crate::state::{
    ArtifactId, ArtifactKind, Exit, ExitTarget, Lock, RoomId, Style, normalize_direction,
};

const COMMON_SCENERY: [&str; 8] = [
    "wall", "door", "floor", "ceiling", "road", "path", "trail", "window",
];

/// Walks through the exit in `direction`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveAction {
    /// Short direction code.
    pub direction: String,
}

impl MoveAction {
    pub fn new(direction: impl AsRef<str>) -> Self {
        Self {
            direction: normalize_direction(direction.as_ref()),
        }
    }

    fn exit(&self, game: &Game) -> GameResult<(RoomId, Exit)> {
        let no_way = || ExecuteError::reject("You can't go that way!");
        let from = game.current_room().ok_or_else(no_way)?;
        let exit = game.room(from)?.exit(&self.direction).cloned().ok_or_else(no_way)?;
        Ok((from, exit))
    }

    /// Checks the door on the exit, unlocking it with a carried key.
    fn pass_door(&self, game: &mut Game, from: RoomId, exit: &Exit) -> GameResult<()> {
        let Some(door_id) = exit.door_id else {
            return Ok(());
        };
        let Some(door) = game.state.artifacts.get(door_id) else {
            return Ok(());
        };
        // doors get moved or blown up
        if door.room_id() != Some(from) {
            return Ok(());
        }
        if door.is_hidden() {
            return Err(ExecuteError::reject("You can't go that way!"));
        }
        if door.is_embedded() {
            game.reveal(door_id)?;
        }

        let door = game.artifact(door_id)?;
        if let (false, Lock::Key(key)) = (door.is_open(), door.lock) {
            let carried = game
                .state
                .artifacts
                .get(key)
                .is_some_and(|key| key.holder().is_some_and(|holder| holder.is_player()));
            if carried {
                let text = format!(
                    "You unlock the {} using the {}.",
                    door.info.name,
                    game.artifact(key)?.info.name
                );
                game.say(text);
                game.open_artifact(door_id)?;
            }
        }

        let door = game.artifact(door_id)?;
        if !door.is_open() {
            return Err(ExecuteError::reject(format!(
                "The {} blocks your way!",
                door.info.name
            )));
        }
        Ok(())
    }
}

impl ActionTransition for MoveAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        let (_, exit) = self.exit(game)?;
        if exit.destination == ExitTarget::Blocked
            && let Some(effect) = exit.effect_id.and_then(|id| game.state.effects.get(id))
        {
            return Err(ExecuteError::reject(effect.text.clone()));
        }
        if game.state.turn.in_battle {
            return Err(ExecuteError::reject(
                "You can't do that with unfriendlies about!",
            ));
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let (from, exit) = self.exit(game)?;
        self.pass_door(game, from, &exit)?;

        // monsters never fight on the turn the player changes rooms
        game.state.turn.skip_battle_actions = true;
        let args = HookArgs::Move {
            arg: self.direction.clone(),
            from,
            to: exit.destination,
        };
        if !game.gate(EventName::BeforeMove, args)? {
            return Ok(());
        }

        match exit.destination {
            ExitTarget::LeaveAdventure { silent } if game.config.exit_prompt => {
                game.confirm("Leave this adventure?", move |game, answer| {
                    if answer == "Yes" {
                        game.exit(silent)?;
                    }
                    Ok(true)
                })
            }
            ExitTarget::LeaveAdventure { silent } => game.exit(silent),
            ExitTarget::Room(to) if game.state.rooms.get(to).is_some() => {
                if let Some(effect) = exit.effect_id {
                    game.print_effect(effect, Style::Normal);
                }
                game.move_player(to, FollowMode::Followers)?;
                game.trigger(
                    EventName::AfterMove,
                    HookArgs::Move {
                        arg: self.direction.clone(),
                        from,
                        to: exit.destination,
                    },
                )?;
                Ok(())
            }
            destination => {
                debug!(target: "core::turn", from = %from, to = ?destination, "exit leads nowhere");
                game.say("You can't go that way!");
                Ok(())
            }
        }
    }
}

/// Runs from a fight, through a named exit or a random one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleeAction {
    pub arg: String,
}

impl ActionTransition for FleeAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        if !game.state.turn.in_battle {
            return Err(ExecuteError::reject("Calm down. There is no danger here."));
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let Some(room) = game.current_room() else {
            return Err(ExecuteError::reject("There is nowhere to flee to!"));
        };
        let exit = if self.arg.is_empty() {
            game.random_exit(room)?
        } else {
            let exit = game
                .room(room)?
                .exit(&self.arg)
                .cloned()
                .ok_or_else(|| ExecuteError::reject("You can't go that way!"))?;
            if !game.exit_is_open(&exit) {
                return Err(ExecuteError::reject("The way is blocked!"));
            }
            Some(exit)
        };

        let args = HookArgs::Flee {
            arg: self.arg.clone(),
        };
        if !game.gate(EventName::Flee, args)? {
            return Ok(());
        }
        let Some(to) = exit.and_then(|exit| exit.destination.room()) else {
            return Err(ExecuteError::reject("There is nowhere to flee to!"));
        };
        game.move_player(to, FollowMode::Followers)?;
        game.state.turn.skip_battle_actions = true;
        Ok(())
    }
}

/// Shows the room, or examines an artifact or monster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookAction {
    pub arg: String,
}

impl LookAction {
    fn describe_room(game: &mut Game) -> GameResult<()> {
        let Some(room) = game.current_room() else {
            return Ok(());
        };
        let description = game.room(room)?.info.description.clone();
        game.say(description);
        Ok(())
    }

    fn examine_artifact(game: &mut Game, id: ArtifactId) -> GameResult<()> {
        let artifact = game.artifact(id)?;
        if artifact.is_embedded() {
            game.reveal(id)?;
        } else {
            let description = artifact.info.description.clone();
            game.say(description);
        }

        // things tucked into something that is not a container, like a ring on a body
        let artifact = game.artifact(id)?;
        let hidden_inside = game.contents(id);
        if artifact.kind != ArtifactKind::Container && !hidden_inside.is_empty() {
            game.say("You found something!");
            if let Some(room) = game.current_room() {
                for item in hidden_inside {
                    game.move_artifact_to_room(item, room)?;
                }
            }
        }

        let artifact = game.artifact(id)?;
        match (artifact.kind, artifact.quantity) {
            (ArtifactKind::Edible | ArtifactKind::Drinkable, Some(quantity)) => {
                let noun = if artifact.kind == ArtifactKind::Edible {
                    "bite"
                } else {
                    "swallow"
                };
                let text = if quantity == 1 {
                    format!("There is 1 {noun} remaining.")
                } else {
                    format!("There are {quantity} {noun}s remaining.")
                };
                game.say(text);
            }
            (ArtifactKind::LightSource, fuel) => {
                let fuel = fuel.unwrap_or(0);
                game.say(match fuel {
                    -1 => "It has a lot of fuel left.",
                    fuel if fuel >= 25 => "It has a lot of fuel left.",
                    fuel if fuel >= 10 => "It has some fuel left.",
                    fuel if fuel > 0 => "It is low on fuel.",
                    _ => "It is out of fuel.",
                });
            }
            _ => {}
        }
        Ok(())
    }
}

impl ActionTransition for LookAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let dark = match game.current_room() {
            Some(room) => game.room(room)?.is_dark,
            None => false,
        };
        if dark && !game.light_is_here() {
            return Ok(());
        }
        if self.arg.is_empty() {
            return Self::describe_room(game);
        }

        let mut found = false;
        if let Some(artifact) = local_artifact(game, &self.arg) {
            found = true;
            Self::examine_artifact(game, artifact)?;
        }
        if let Some(monster) = local_monster(game, &self.arg) {
            found = true;
            let description = game.monster(monster)?.info.description.clone();
            game.say(description);
            game.show_health(monster)?;
        }
        if found {
            return Ok(());
        }

        let arg = self.arg.to_lowercase();
        if COMMON_SCENERY.contains(&arg.as_str()) || room_mentions(game, &arg) {
            game.say("You see nothing special.");
            Ok(())
        } else {
            Err(ExecuteError::reject(format!("I see no {} here!", self.arg)))
        }
    }
}
