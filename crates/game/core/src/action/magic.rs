use super::{ActionTransition, local_artifact, local_monster};
use crate::engine::{BlastTarget, Game};
use crate::error::{ExecuteError, GameResult};
use crate::state::{MonsterId, Spell};

/// Casts one of the four standard spells. Only blast and heal take a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellAction {
    pub spell: Spell,
    pub arg: String,
}

impl SpellAction {
    /// Blast needs somewhere to go before any ability is spent on it.
    fn blast_target(&self, game: &mut Game) -> GameResult<BlastTarget> {
        if self.arg.is_empty() {
            return match game.choose_target(MonsterId::PLAYER)? {
                Some(monster) => Ok(BlastTarget::Monster(monster)),
                None => Err(ExecuteError::reject("Blast whom or what?")),
            };
        }
        if let Some(monster) = local_monster(game, &self.arg) {
            return Ok(BlastTarget::Monster(monster));
        }
        match local_artifact(game, &self.arg) {
            Some(artifact) => Ok(BlastTarget::Artifact(artifact)),
            None => Err(ExecuteError::reject("Blast whom or what?")),
        }
    }

    fn heal_target(&self, game: &Game) -> GameResult<MonsterId> {
        if self.arg.is_empty() {
            return Ok(MonsterId::PLAYER);
        }
        local_monster(game, &self.arg)
            .ok_or_else(|| ExecuteError::reject("No one here by that name."))
    }
}

impl ActionTransition for SpellAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        if self.spell == Spell::Heal {
            self.heal_target(game)?;
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        match self.spell {
            Spell::Blast => {
                let target = self.blast_target(game)?;
                if game.spell_cast(Spell::Blast)? {
                    game.blast(&self.arg, target)?;
                }
            }
            Spell::Heal => {
                let target = self.heal_target(game)?;
                if game.spell_cast(Spell::Heal)? {
                    game.heal_spell(target)?;
                }
            }
            Spell::Speed => {
                if game.spell_cast(Spell::Speed)? {
                    game.speed_spell()?;
                }
            }
            Spell::Power => {
                if game.spell_cast(Spell::Power)? {
                    game.power_spell()?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::engine::TurnOutcome;
    use crate::engine::fixtures::{add_monster, sandbox, sandbox_with};
    use crate::hooks::{Adventure, EventName, HookArgs, HookOutcome};
    use crate::state::{Artifact, ArtifactId, ArtifactKind, RoomId};

    fn learn(game: &mut Game, spell: Spell) {
        game.monster_mut(MonsterId::PLAYER)
            .unwrap()
            .profile_mut()
            .unwrap()
            .learn_spell(spell, 50);
    }

    fn rejection(outcome: TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Rejected(err) => err.message,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn heal_mends_the_caster() {
        // cast 30, no ability growth, 2d6 rolls 7
        let mut game = sandbox(&[30, 10, 7]);
        learn(&mut game, Spell::Heal);
        game.monster_mut(MonsterId::PLAYER).unwrap().damage = 10;
        game.run_command("heal", "").unwrap();
        assert_eq!(game.player().unwrap().damage, 3);
        assert!(game.state.history.mentions("Some of your wounds seem to clear up."));
    }

    #[test]
    fn heal_needs_someone_present() {
        let mut game = sandbox(&[]);
        learn(&mut game, Spell::Heal);
        let outcome = game.run_command("heal", "wizard").unwrap();
        assert_eq!(rejection(outcome), "No one here by that name.");
    }

    #[test]
    fn blast_hits_a_monster() {
        // cast 30, no ability growth, 2d5 rolls 6
        let mut game = sandbox(&[30, 10, 6]);
        learn(&mut game, Spell::Blast);
        let orc = add_monster(&mut game, 1, "orc", 1);
        game.monster_mut(orc).unwrap().hardiness = 30;
        game.refresh_visible().unwrap();

        game.run_command("blast", "orc").unwrap();
        assert!(game.state.history.mentions("--a direct hit!"));
        assert_eq!(game.monster(orc).unwrap().damage, 6);
    }

    #[test]
    fn blast_without_a_target_spends_nothing() {
        let mut game = sandbox(&[]);
        learn(&mut game, Spell::Blast);
        let outcome = game.run_command("blast", "").unwrap();
        assert_eq!(rejection(outcome), "Blast whom or what?");
        let profile = game.player().unwrap().profile().unwrap();
        assert_eq!(profile.spell_ability(Spell::Blast), 50);
    }

    #[test]
    fn blasting_treasure_makes_no_sense() {
        let mut game = sandbox(&[30, 10, 6]);
        learn(&mut game, Spell::Blast);
        let mut gem = Artifact::new(ArtifactId(1), "gem", ArtifactKind::Treasure);
        gem.move_to_room(RoomId(1));
        game.state.artifacts.add(gem).unwrap();
        let outcome = game.run_command("blast", "gem").unwrap();
        assert_eq!(rejection(outcome), "Why would you blast a gem?");
    }

    #[test]
    fn speed_doubles_agility() {
        let mut game = sandbox(&[30, 10, 1]);
        learn(&mut game, Spell::Speed);
        game.run_command("speed", "").unwrap();
        assert_eq!(game.player().unwrap().speed_multiplier, 2);
    }

    #[test]
    fn power_is_left_to_the_adventure() {
        let seen = Rc::new(Cell::new(0));
        let recorder = Rc::clone(&seen);
        let adventure = Adventure::new("power").on(EventName::Power, move |_, args| {
            if let HookArgs::Roll { roll } = args {
                recorder.set(*roll);
            }
            Ok(HookOutcome::proceed())
        });
        let mut game = sandbox_with(adventure, &[30, 10, 42]);
        learn(&mut game, Spell::Power);
        game.run_command("power", "").unwrap();
        assert_eq!(seen.get(), 42);
    }
}
