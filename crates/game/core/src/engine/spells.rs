//! The player's spellcasting: the casting check, the four standard spells
//! and per-turn recovery.

use tracing::debug;

use super::{ArtifactHit, DamageSource, Game};
use crate::error::{ExecuteError, GameResult, InvariantError};
use crate::hooks::{EventName, HookArgs};
use crate::state::{ArtifactId, MonsterId, Reaction, Spell, Style};

/// What a blast spell is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlastTarget {
    Monster(MonsterId),
    Artifact(ArtifactId),
}

impl Game {
    fn spell_ability(&self, spell: Spell) -> Result<i32, InvariantError> {
        Ok(self
            .player()?
            .profile()
            .map_or(0, |profile| profile.spell_ability(spell)))
    }

    fn set_spell_ability(&mut self, spell: Spell, ability: i32) -> Result<(), InvariantError> {
        if let Some(profile) = self.monster_mut(MonsterId::PLAYER)?.profile_mut() {
            profile.spell_abilities.insert(spell, ability);
        }
        Ok(())
    }

    /// Tries to cast `spell` and reports whether it took effect.
    ///
    /// A roll of 100 is a backlash that wipes the spell out for good. Any
    /// other roll at or under the current ability works, as does 5 or less.
    /// Success may raise the unexpended ability by 2. Whatever the outcome,
    /// the current ability halves until it recharges.
    pub fn spell_cast(&mut self, spell: Spell) -> GameResult<bool> {
        let ability = self.spell_ability(spell)?;
        if ability == 0 {
            self.say("You don't know that spell!");
            return Ok(false);
        }
        if !self.gate(EventName::BeforeSpell, HookArgs::Spell { spell, target: None })? {
            return Ok(false);
        }

        let roll = self.roll(1, 100);
        if roll == 100 {
            if self.gate(EventName::SpellBacklash, HookArgs::Spell { spell, target: None })? {
                let name = spell.as_ref().to_uppercase();
                self.say(format!(
                    "The strain of attempting to cast {name} overloads your brain and you forget it completely for the rest of this adventure."
                ));
                self.set_spell_ability(spell, 0)?;
            }
            debug!(target: "core::combat", spell = %spell, "spell backlash");
            return Ok(false);
        }

        let success = roll <= ability || roll <= 5;
        if success {
            let original = self
                .player()?
                .profile()
                .map_or(0, |profile| profile.original_spell_ability(spell));
            if self.roll(1, 100) > original {
                if let Some(profile) = self.monster_mut(MonsterId::PLAYER)?.profile_mut() {
                    profile.spell_abilities_original.insert(spell, original + 2);
                }
                self.write("Spell ability increased!", Style::Success);
            }
        } else {
            self.say("Nothing happens.");
        }
        let halved = (f64::from(ability) / 2.0).round() as i32;
        self.set_spell_ability(spell, halved)?;
        debug!(target: "core::combat", spell = %spell, roll, success, "spell cast");
        Ok(success)
    }

    /// Fires a blast at a monster or an artifact. Assumes the cast succeeded.
    pub fn blast(&mut self, arg: &str, target: BlastTarget) -> GameResult<()> {
        let damage = self.roll(2, 5);
        match target {
            BlastTarget::Monster(monster) => {
                let args = HookArgs::Spell {
                    spell: Spell::Blast,
                    target: Some(monster),
                };
                if !self.gate(EventName::Blast, args)? {
                    return Ok(());
                }
                let caster = self.player()?.info.name.clone();
                let name = self.monster(monster)?.info.display_name();
                self.say(format!("{caster} casts a blast spell at {name}"));
                self.write("--a direct hit!", Style::Success);
                let args = HookArgs::Combat {
                    attacker: MonsterId::PLAYER,
                    defender: monster,
                    value: damage,
                };
                let damage = self
                    .override_value(EventName::BlastDamage, args)?
                    .unwrap_or(damage);
                self.injure(monster, damage, true, Some(MonsterId::PLAYER))?;
                if self.monster(monster)?.reaction != Reaction::Hostile {
                    self.hurt_feelings(monster)?;
                }
                Ok(())
            }
            BlastTarget::Artifact(artifact) => {
                let args = HookArgs::Artifact {
                    arg: arg.to_owned(),
                    artifact,
                };
                if !self.gate(EventName::AttackArtifact, args)? {
                    return Ok(());
                }
                match self.injure_artifact(artifact, DamageSource::Blast)? {
                    ArtifactHit::Unbreakable => {
                        self.say("Nothing happens.");
                        Ok(())
                    }
                    ArtifactHit::Pointless => {
                        let name = self.artifact(artifact)?.info.name.clone();
                        Err(ExecuteError::reject(format!("Why would you blast a {name}?")))
                    }
                    ArtifactHit::Hacked | ArtifactHit::Damaged(_) => Ok(()),
                }
            }
        }
    }

    /// Heals the player or another monster by 2d6. Assumes the cast succeeded.
    pub fn heal_spell(&mut self, target: MonsterId) -> GameResult<()> {
        let amount = self.roll(2, 6);
        if target.is_player() {
            self.say("Some of your wounds seem to clear up.");
        } else {
            let name = self.monster(target)?.info.name.clone();
            self.say(format!("Some of {name}'s wounds seem to clear up."));
        }
        self.heal(target, amount)?;
        Ok(())
    }

    /// Doubles the player's agility for 11 to 20 more turns.
    pub fn speed_spell(&mut self) -> Result<(), InvariantError> {
        self.write("You can feel the new agility flowing through you!", Style::Success);
        let extra = 10 + self.roll(1, 10);
        let player = self.monster_mut(MonsterId::PLAYER)?;
        let Some(profile) = player.player.as_deref_mut() else {
            return Ok(());
        };
        let counter = profile.spell_counters.entry(Spell::Speed).or_insert(0);
        if *counter == 0 {
            player.speed_multiplier = 2;
        }
        *counter += extra;
        Ok(())
    }

    /// The power spell does nothing by itself; adventures give it meaning
    /// through the `power` hook.
    pub fn power_spell(&mut self) -> GameResult<()> {
        let roll = self.roll(1, 100);
        self.trigger(EventName::Power, HookArgs::Roll { roll })?;
        Ok(())
    }

    /// Recovers spent spell abilities toward their unexpended values.
    ///
    /// Forgotten spells (ability 0) stay forgotten, and temporary boosts
    /// above the unexpended value are left alone.
    pub fn recharge_spells(&mut self) -> Result<(), InvariantError> {
        let rule = self.config.spell_recharge;
        let Some(profile) = self.monster_mut(MonsterId::PLAYER)?.profile_mut() else {
            return Ok(());
        };
        let originals = profile.spell_abilities_original.clone();
        for (spell, ability) in profile.spell_abilities.iter_mut() {
            let original = originals.get(spell).copied().unwrap_or(0);
            if *ability > 0 && *ability < original {
                *ability = (*ability + rule.amount(*ability)).min(original);
            }
        }
        Ok(())
    }

    /// Counts down timed spells. An expiring speed spell restores normal
    /// speed; every expiry fires `spellExpires`.
    pub fn tick_spell_counters(&mut self) -> GameResult<()> {
        let mut expired = Vec::new();
        if let Some(profile) = self.monster_mut(MonsterId::PLAYER)?.profile_mut() {
            for (spell, counter) in profile.spell_counters.iter_mut() {
                if *counter > 0 {
                    *counter -= 1;
                    if *counter == 0 {
                        expired.push(*spell);
                    }
                }
            }
        }
        for spell in expired {
            if spell == Spell::Speed {
                self.write("Your speed spell just expired!", Style::Success);
                self.monster_mut(MonsterId::PLAYER)?.speed_multiplier = 1;
            }
            debug!(target: "core::turn", spell = %spell, "spell expired");
            self.trigger(EventName::SpellExpires, HookArgs::Spell { spell, target: None })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpellRecharge;
    use crate::engine::fixtures::sandbox;

    fn learn(game: &mut Game, spell: Spell, ability: i32) {
        game.monster_mut(MonsterId::PLAYER)
            .unwrap()
            .profile_mut()
            .unwrap()
            .learn_spell(spell, ability);
    }

    fn ability(game: &Game, spell: Spell) -> (i32, i32) {
        let profile = game.player().unwrap().profile().unwrap();
        (profile.spell_ability(spell), profile.original_spell_ability(spell))
    }

    #[test]
    fn unknown_spell_is_refused() {
        let mut game = sandbox(&[]);
        assert!(!game.spell_cast(Spell::Blast).unwrap());
        assert!(game.state.history.mentions("You don't know that spell!"));
    }

    #[test]
    fn success_halves_ability_and_may_raise_original() {
        // cast roll 30 under 50, then 80 beats the unexpended 50
        let mut game = sandbox(&[30, 80]);
        learn(&mut game, Spell::Heal, 50);
        assert!(game.spell_cast(Spell::Heal).unwrap());
        assert_eq!(ability(&game, Spell::Heal), (25, 52));
        assert!(game.state.history.mentions("Spell ability increased!"));
    }

    #[test]
    fn failure_still_halves_ability() {
        let mut game = sandbox(&[60]);
        learn(&mut game, Spell::Speed, 25);
        assert!(!game.spell_cast(Spell::Speed).unwrap());
        assert_eq!(ability(&game, Spell::Speed), (13, 25));
        assert!(game.state.history.mentions("Nothing happens."));
    }

    #[test]
    fn roll_of_100_forgets_the_spell() {
        let mut game = sandbox(&[100]);
        learn(&mut game, Spell::Power, 90);
        assert!(!game.spell_cast(Spell::Power).unwrap());
        assert_eq!(ability(&game, Spell::Power).0, 0);
        assert!(game.state.history.mentions("cast POWER overloads your brain"));
    }

    #[test]
    fn recharge_stops_at_unexpended_ability() {
        let mut game = sandbox(&[]);
        game.config.spell_recharge = SpellRecharge::Constant(5);
        learn(&mut game, Spell::Blast, 50);
        learn(&mut game, Spell::Heal, 20);
        {
            let profile = game
                .monster_mut(MonsterId::PLAYER)
                .unwrap()
                .profile_mut()
                .unwrap();
            profile.spell_abilities.insert(Spell::Blast, 48);
            profile.spell_abilities.insert(Spell::Heal, 0);
        }
        game.recharge_spells().unwrap();
        assert_eq!(ability(&game, Spell::Blast).0, 50);
        assert_eq!(ability(&game, Spell::Heal).0, 0);
    }

    #[test]
    fn speed_wears_off() {
        // the extra turns roll 1, so the spell lasts 11 turns
        let mut game = sandbox(&[1]);
        game.speed_spell().unwrap();
        assert_eq!(game.player().unwrap().speed_multiplier, 2);
        for _ in 0..11 {
            game.tick_spell_counters().unwrap();
        }
        assert_eq!(game.player().unwrap().speed_multiplier, 1);
        assert!(game.state.history.mentions("Your speed spell just expired!"));
    }
}
