//! One attack, from odds to aftermath.

use tracing::debug;

use super::damage::{CriticalEffect, FumbleEffect};
use super::hit::{HitCheck, HitFactors, check_hit, to_hit_odds};
use super::verbs::{attack_verbs, miss_verbs};
use crate::engine::Game;
use crate::error::{GameResult, InvariantError};
use crate::hooks::{EventName, HookArgs};
use crate::state::{Armament, ArtifactId, CombatCode, MonsterId, Style, WeaponType};

impl Game {
    /// Gathers the to-hit inputs for `attacker` striking `defender`.
    pub fn hit_factors(&self, attacker: MonsterId, defender: MonsterId) -> Result<HitFactors, InvariantError> {
        let weapon = match self.ready_weapon(attacker) {
            Some(id) => self.artifact(id)?.weapon,
            None => None,
        };
        let a = self.monster(attacker)?;
        let d = self.monster(defender)?;
        let weapon_ability = match (a.profile(), weapon) {
            (Some(profile), Some(weapon)) => Some(profile.weapon_abilities.get(weapon.weapon_type)),
            _ => None,
        };
        Ok(HitFactors {
            attacker_agility: a.agility,
            attacker_speed: a.speed_multiplier,
            defender_agility: d.agility,
            defender_speed: d.speed_multiplier,
            attack_odds: a.attack_odds,
            armor_factor: self.armor_factor(attacker),
            defense_bonus: d.defense_bonus,
            weapon_ability,
            weapon_odds: weapon.map_or(0, |weapon| weapon.odds),
        })
    }

    pub fn to_hit_odds(&self, attacker: MonsterId, defender: MonsterId) -> Result<i32, InvariantError> {
        Ok(to_hit_odds(&self.hit_factors(attacker, defender)?))
    }

    /// Resolves one attack: message, hit roll, then damage, a miss or a
    /// fumble.
    ///
    /// `attackOdds` may replace the odds; replacing them with 0 also rules
    /// out critical hits.
    pub fn attack(&mut self, attacker: MonsterId, defender: MonsterId) -> GameResult<()> {
        let computed = self.to_hit_odds(attacker, defender)?;
        let args = HookArgs::Combat {
            attacker,
            defender,
            value: computed,
        };
        let (odds, criticals) = match self.override_value(EventName::AttackOdds, args)? {
            Some(odds) => (odds, odds != 0),
            None => (computed, true),
        };

        self.announce_attack(attacker, defender)?;

        let weapon = self.ready_weapon(attacker);
        let roll = self.roll(1, 100);
        let check = check_hit(roll, odds, criticals, weapon.is_some());
        debug!(
            target: "core::combat",
            attacker = %attacker,
            defender = %defender,
            odds,
            roll,
            outcome = ?check,
            "attack resolved"
        );

        match check {
            HitCheck::Critical => {
                self.write("-- a critical hit!", Style::Success);
                self.land_blow(attacker, defender, odds, true)
            }
            HitCheck::Hit => {
                self.write("-- a hit!", Style::Success);
                self.land_blow(attacker, defender, odds, false)
            }
            HitCheck::Miss => self.miss(attacker, defender),
            HitCheck::Fumble => match weapon {
                Some(weapon) => self.fumble(attacker, defender, weapon),
                None => self.miss(attacker, defender),
            },
        }
    }

    fn weapon_row(&self, attacker: MonsterId) -> Result<usize, InvariantError> {
        Ok(match self.ready_weapon(attacker) {
            Some(weapon) => self
                .artifact(weapon)?
                .weapon
                .map_or(0, |profile| profile.weapon_type.verb_row()),
            None => 0,
        })
    }

    fn announce_attack(&mut self, attacker: MonsterId, defender: MonsterId) -> Result<(), InvariantError> {
        let row = self.weapon_row(attacker)?;
        let a = self.monster(attacker)?;
        let name = a.info.name.clone();
        let target = self.monster(defender)?.info.display_name();
        let custom = a.combat_verbs.clone();
        let line = if a.combat_code == CombatCode::NaturalOnly {
            format!("{name} attacks {target}")
        } else if !custom.is_empty() {
            let verb = &custom[self.flavor_index(custom.len())];
            format!("{name} {verb} {target}")
        } else {
            let verbs = attack_verbs(row);
            let verb = verbs[self.flavor_index(verbs.len())];
            format!("{name} {verb} at {target}")
        };
        self.say(line);
        Ok(())
    }

    fn land_blow(
        &mut self,
        attacker: MonsterId,
        defender: MonsterId,
        odds: i32,
        critical: bool,
    ) -> GameResult<()> {
        // damage is rolled before the critical band
        let rolled = self.roll_attack_damage(attacker)?;
        let critical = critical.then(|| CriticalEffect::from_roll(self.roll(1, 100)));
        if let Some(effect) = critical {
            debug!(target: "core::combat", effect = ?effect, "critical hit");
        }
        let damage = critical.map_or(rolled, |effect| effect.apply(rolled));
        let ignore_armor = critical.is_some_and(CriticalEffect::ignores_armor);
        let args = HookArgs::Combat {
            attacker,
            defender,
            value: damage,
        };
        let damage = self
            .override_value(EventName::AttackDamage, args)?
            .unwrap_or(damage);
        let dealt = self.injure(defender, damage, ignore_armor, Some(attacker))?;
        self.trigger(
            EventName::AttackDamageAfter,
            HookArgs::Combat {
                attacker,
                defender,
                value: dealt,
            },
        )?;
        if attacker.is_player() {
            self.state.statistics.damage_dealt += dealt;
            self.practice(odds)?;
        }
        Ok(())
    }

    /// After a landed blow the player may get better with the weapon and
    /// more used to the armor.
    ///
    /// The ability grows when a 1d100 beats the odds the blow was struck
    /// at: by 2 below 50%, by 1 from there on.
    fn practice(&mut self, odds: i32) -> Result<(), InvariantError> {
        let weapon_type = match self.ready_weapon(MonsterId::PLAYER) {
            Some(weapon) => self.artifact(weapon)?.weapon.map(|w| w.weapon_type),
            None => None,
        };
        if let Some(weapon_type) = weapon_type {
            if self.roll(1, 100) > odds {
                self.raise_ability(weapon_type)?;
            }
        }

        let armor_factor = self.armor_factor(MonsterId::PLAYER);
        if armor_factor > 0 && armor_factor.max(5) < self.roll(1, 70) {
            if let Some(profile) = self.monster_mut(MonsterId::PLAYER)?.profile_mut() {
                profile.armor_expertise += armor_factor.min(2);
            }
            self.write("Your armor expertise increased!", Style::Success);
        }
        Ok(())
    }

    fn raise_ability(&mut self, weapon_type: WeaponType) -> Result<(), InvariantError> {
        if let Some(profile) = self.monster_mut(MonsterId::PLAYER)?.profile_mut() {
            let ability = profile.weapon_abilities.get(weapon_type);
            let step = if ability < 50 { 2 } else { 1 };
            profile.weapon_abilities.set(weapon_type, ability + step);
        }
        self.write(format!("Your {weapon_type} ability increased!"), Style::Success);
        Ok(())
    }

    fn miss(&mut self, attacker: MonsterId, defender: MonsterId) -> GameResult<()> {
        let args = HookArgs::Combat {
            attacker,
            defender,
            value: 0,
        };
        if !self.gate(EventName::Miss, args)? {
            return Ok(());
        }
        let verbs = miss_verbs(self.weapon_row(attacker)?);
        let verb = self.random_index(verbs.len()).map_or("missed", |index| verbs[index]);
        self.write(format!("-- {verb}!"), Style::NoSpace);
        Ok(())
    }

    fn fumble(&mut self, attacker: MonsterId, defender: MonsterId, weapon: ArtifactId) -> GameResult<()> {
        self.write("-- a fumble!", Style::Warning);
        let roll = self.roll(1, 100);
        let args = HookArgs::Combat {
            attacker,
            defender,
            value: roll,
        };
        if !self.gate(EventName::Fumble, args)? {
            return Ok(());
        }

        let w = self.artifact(weapon)?;
        let (name, dice, sides) = (w.info.name.clone(), w.dice, w.sides);
        let effect = FumbleEffect::from_roll(roll, w.is_magic_weapon(), sides);
        debug!(target: "core::combat", attacker = %attacker, roll, effect = ?effect, "fumble");
        match effect {
            FumbleEffect::Recovered => self.write("-- fumble recovered!", Style::NoSpace),
            FumbleEffect::Dropped => {
                self.write("-- weapon dropped!", Style::Warning);
                self.drop_artifact(attacker, weapon)?;
            }
            FumbleEffect::HitsUser => {
                self.write("-- weapon hits user!", Style::Danger);
                let damage = self.roll(dice, sides);
                self.injure(attacker, damage, false, Some(attacker))?;
            }
            FumbleEffect::Sparks => {
                self.write(format!("-- sparks fly from {name}!"), Style::Warning);
            }
            FumbleEffect::Damaged => {
                self.write("-- weapon damaged!", Style::Warning);
                self.artifact_mut(weapon)?.sides -= 2;
            }
            FumbleEffect::Broken { worst } => {
                self.write("-- weapon broken!", Style::Danger);
                let monster = self.monster_mut(attacker)?;
                monster.weapon = Armament::Unarmed;
                monster.courage /= 2;
                self.destroy_artifact(weapon)?;
                if self.roll(1, 10) > 5 {
                    self.write("-- broken weapon hurts user!", Style::Danger);
                    let dice = if worst { dice + 1 } else { dice };
                    let damage = self.roll(dice, sides);
                    self.injure(attacker, damage, false, Some(attacker))?;
                }
            }
        }
        Ok(())
    }
}
