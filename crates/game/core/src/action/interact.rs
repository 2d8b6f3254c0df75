use strum::AsRefStr;

use super::{ActionTransition, local_artifact, local_monster, room_mentions};
use crate::engine::Game;
use crate::error::{ExecuteError, GameResult};
use crate::hooks::{EventName, HookArgs};
use crate::state::{ArtifactFlags, ArtifactId, ArtifactKind, Lock, MonsterId, Style};

/// Words that name part of the room rather than an artifact.
const SURFACES: [&str; 4] = ["wall", "door", "floor", "ceiling"];
/// Water the player can always try to drink.
const WATERS: [&str; 5] = ["water", "river", "stream", "lake", "ocean"];

fn artifact_args(arg: &str, artifact: ArtifactId) -> HookArgs {
    HookArgs::Artifact {
        arg: arg.to_owned(),
        artifact,
    }
}

/// Key the player is carrying for a locked artifact.
fn carried_key(game: &Game, lock: Lock) -> Option<(ArtifactId, String)> {
    let Lock::Key(key) = lock else {
        return None;
    };
    let key = game.state.artifacts.get(key)?;
    (key.holder() == Some(MonsterId::PLAYER)).then(|| (key.id, key.info.name.clone()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenAction {
    pub arg: String,
}

impl OpenAction {
    fn not_found(&self, game: &Game) -> ExecuteError {
        if room_mentions(game, &self.arg.to_lowercase()) {
            if self.arg.eq_ignore_ascii_case("door") {
                return ExecuteError::reject("The door will open when you pass through it.");
            }
            return ExecuteError::reject("That's not something you can open.");
        }
        if local_monster(game, &self.arg).is_some() {
            return ExecuteError::reject("That's not something you can open.");
        }
        ExecuteError::reject(format!("I don't see a {} here!", self.arg))
    }

    /// Unlocks and opens. Returns true when the artifact ended up open.
    fn unlock(&self, game: &mut Game, id: ArtifactId) -> GameResult<bool> {
        let artifact = game.artifact(id)?;
        let name = artifact.info.name.clone();
        match (artifact.lock, artifact.hardiness) {
            (Lock::Special, _) => {
                game.say("It won't open.");
                Ok(false)
            }
            (Lock::None, Some(_)) => {
                game.say("You'll have to force it open.");
                Ok(false)
            }
            (Lock::Key(_), _) => match carried_key(game, artifact.lock) {
                Some((_, key)) => {
                    game.say(format!("You unlock it using the {key}."));
                    game.open_artifact(id)?;
                    Ok(true)
                }
                None => {
                    game.say("It's locked and you don't have the key!");
                    Ok(false)
                }
            },
            (Lock::None, None) => {
                game.say(format!("{name} opened."));
                game.open_artifact(id)?;
                Ok(true)
            }
        }
    }
}

impl ActionTransition for OpenAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let Some(id) = local_artifact(game, &self.arg) else {
            return Err(self.not_found(game));
        };
        if !game.gate(EventName::BeforeOpen, artifact_args(&self.arg, id))? {
            return Ok(());
        }

        let artifact = game.artifact(id)?;
        let just_revealed = artifact.is_embedded();
        let kind = artifact.kind;
        match kind {
            ArtifactKind::DisguisedMonster => return game.reveal_disguised_monster(id),
            ArtifactKind::Container
            | ArtifactKind::DoorGate
            | ArtifactKind::Readable
            | ArtifactKind::Edible
            | ArtifactKind::Drinkable => {}
            _ => return Err(ExecuteError::reject("That's not something you can open.")),
        }
        if just_revealed {
            game.reveal(id)?;
        }

        if game.artifact(id)?.is_open() {
            if !just_revealed {
                game.say("It's already open!");
            }
            return Ok(());
        }
        if !self.unlock(game, id)? {
            return Ok(());
        }

        let effect = game
            .artifact(id)?
            .effect_id
            .filter(|effect| game.state.effects.get(*effect).is_some_and(|effect| !effect.seen));
        if let Some(effect) = effect {
            game.print_effect(effect, Style::Normal);
        }
        game.trigger(EventName::AfterOpen, artifact_args(&self.arg, id))?;
        if kind == ArtifactKind::Container {
            game.print_contents(id)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseAction {
    pub arg: String,
}

impl ActionTransition for CloseAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        if self.arg.is_empty() {
            return Err(ExecuteError::reject("Close what?"));
        }
        match local_artifact(game, &self.arg) {
            Some(_) => Ok(()),
            None => Err(ExecuteError::reject("It's not here.")),
        }
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let Some(id) = local_artifact(game, &self.arg) else {
            return Ok(());
        };
        if !game.gate(EventName::BeforeClose, artifact_args(&self.arg, id))? {
            return Ok(());
        }
        let artifact = game.artifact(id)?;
        if artifact.is_hidden() {
            return Err(ExecuteError::reject("I don't follow you."));
        }
        if artifact.is_embedded() {
            game.reveal(id)?;
        }

        let artifact = game.artifact(id)?;
        let name = artifact.info.name.clone();
        let (kind, lock, open) = (artifact.kind, artifact.lock, artifact.is_open());
        let broken = artifact.flags.contains(ArtifactFlags::BROKEN);
        match kind {
            ArtifactKind::Readable | ArtifactKind::Edible | ArtifactKind::Drinkable => {
                game.say("You don't need to.");
            }
            _ if lock == Lock::Special => game.say("You don't need to."),
            ArtifactKind::Container | ArtifactKind::DoorGate => {
                if !open {
                    return Err(ExecuteError::reject("It's not open."));
                }
                if broken {
                    return Err(ExecuteError::reject("You broke it."));
                }
                game.close_artifact(id)?;
                game.say(format!("{name} closed."));
                game.trigger(EventName::AfterClose, artifact_args(&self.arg, id))?;
            }
            _ => return Err(ExecuteError::reject("That's not something you can close.")),
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadAction {
    pub arg: String,
}

impl ActionTransition for ReadAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        let dark = game
            .state
            .rooms
            .current_room()
            .is_some_and(|room| room.is_dark);
        if dark && !game.light_is_here() {
            return Err(ExecuteError::reject("You can't read in the dark!"));
        }
        if self.arg.is_empty() {
            return Err(ExecuteError::reject("Read what?"));
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let found = local_artifact(game, &self.arg);
        let args = match found {
            Some(id) => artifact_args(&self.arg, id),
            None => HookArgs::Command {
                arg: self.arg.clone(),
            },
        };
        if !game.gate(EventName::BeforeRead, args.clone())? {
            return Ok(());
        }

        let Some(id) = found else {
            let word = self.arg.to_lowercase();
            if SURFACES.contains(&word.as_str()) {
                game.say("There are no markings to read!");
            } else {
                game.say(format!("There is no {} here!", self.arg));
            }
            return Ok(());
        };

        let just_revealed = game.artifact(id)?.is_embedded();
        if just_revealed {
            game.reveal(id)?;
        }
        let artifact = game.artifact(id)?;
        let name = artifact.info.name.clone();
        if artifact.effect_id.is_some() && artifact.kind != ArtifactKind::Container {
            game.print_effects(id, Style::Special)?;
        } else if artifact.kind == ArtifactKind::Readable {
            if !just_revealed {
                let description = artifact.info.description.clone();
                game.say(description);
            }
        } else {
            game.say(format!("{name} has no markings to read!"));
        }
        game.trigger(EventName::AfterRead, args)?;
        Ok(())
    }
}

/// Which of the three consuming verbs the player typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum UseVerb {
    Use,
    Eat,
    Drink,
}

impl UseVerb {
    fn kind(self) -> Option<ArtifactKind> {
        match self {
            Self::Use => None,
            Self::Eat => Some(ArtifactKind::Edible),
            Self::Drink => Some(ArtifactKind::Drinkable),
        }
    }
}

/// `use`, `eat` and `drink`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseAction {
    pub verb: UseVerb,
    pub arg: String,
}

impl UseAction {
    fn consume(&self, game: &mut Game, id: ArtifactId, kind: ArtifactKind) -> GameResult<()> {
        let artifact = game.artifact(id)?;
        if artifact.kind != kind {
            return Err(ExecuteError::reject(format!(
                "You can't {} that!",
                self.verb.as_ref()
            )));
        }
        if !artifact.quantity.is_some_and(|left| left > 0) {
            return Err(ExecuteError::reject("There's none left!"));
        }
        let name = artifact.info.name.clone();
        game.say(format!("You {} the {name}.", self.verb.as_ref()));
        game.use_artifact(id)
    }

    fn not_found(&self, game: &mut Game) -> GameResult<()> {
        let in_container = game
            .state
            .artifacts
            .get_by_name(&self.arg)
            .and_then(|artifact| artifact.container_id())
            .filter(|container| game.artifact_is_here(*container))
            .and_then(|container| game.state.artifacts.get(container));
        if let Some(container) = in_container {
            return Err(ExecuteError::reject(format!(
                "Try removing it from the {} first.",
                container.info.name
            )));
        }
        let word = self.arg.to_lowercase();
        if self.verb == UseVerb::Drink && WATERS.contains(&word.as_str()) && room_mentions(game, &word) {
            game.say("Nothing happens.");
            return Ok(());
        }
        Err(ExecuteError::reject("I don't know what you mean."))
    }
}

impl ActionTransition for UseAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let found = local_artifact(game, &self.arg);
        match (self.verb.kind(), found) {
            (Some(kind), Some(id)) => self.consume(game, id, kind),
            (Some(_), None) => self.not_found(game),
            (None, None) => Err(ExecuteError::reject("You aren't carrying it!")),
            (None, Some(id)) => {
                if game.artifact(id)?.quantity.is_some_and(|left| left <= 0) {
                    return Err(ExecuteError::reject("There's none left!"));
                }
                game.use_artifact(id)
            }
        }
    }
}
