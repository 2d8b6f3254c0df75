use tracing::debug;

use super::{ActionTransition, local_artifact, local_monster};
use crate::engine::{ArtifactHit, DamageSource, Game};
use crate::error::{ExecuteError, GameResult};
use crate::hooks::{EventName, HookArgs};
use crate::state::{ArtifactKind, MonsterId};

/// Attacks a monster or forces an artifact. With no argument, attacks a
/// random hostile monster in the room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackAction {
    pub arg: String,
}

impl AttackAction {
    fn attack_monster(&self, game: &mut Game, target: MonsterId) -> GameResult<()> {
        let args = HookArgs::Attack {
            arg: self.arg.clone(),
            target,
        };
        if !game.gate(EventName::AttackMonster, args)? {
            return Ok(());
        }
        game.hurt_feelings(target)?;
        game.attack(MonsterId::PLAYER, target)
    }
}

impl ActionTransition for AttackAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        if game.ready_weapon(MonsterId::PLAYER).is_none() {
            return Err(ExecuteError::reject("You don't have a weapon ready!"));
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        if self.arg.is_empty() {
            let Some(target) = game.choose_target(MonsterId::PLAYER)? else {
                return Err(ExecuteError::reject(
                    "Calm down. There are no hostile monsters here.",
                ));
            };
            return self.attack_monster(game, target);
        }
        if let Some(target) = local_monster(game, &self.arg) {
            return self.attack_monster(game, target);
        }
        let Some(artifact) = local_artifact(game, &self.arg) else {
            return Err(ExecuteError::reject("Attack whom?"));
        };

        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact,
        };
        if !game.gate(EventName::AttackArtifact, args)? {
            return Ok(());
        }
        if game.artifact(artifact)?.kind == ArtifactKind::DisguisedMonster {
            return game.reveal_disguised_monster(artifact);
        }
        let hit = game.injure_artifact(artifact, DamageSource::Attack)?;
        debug!(target: "core::combat", %artifact, ?hit, "artifact attacked");
        match hit {
            ArtifactHit::Unbreakable => {
                game.say("Nothing happens.");
                Ok(())
            }
            ArtifactHit::Pointless => {
                let name = game.artifact(artifact)?.info.name.clone();
                Err(ExecuteError::reject(format!("Why would you attack a {name}?")))
            }
            ArtifactHit::Hacked | ArtifactHit::Damaged(_) => Ok(()),
        }
    }
}
