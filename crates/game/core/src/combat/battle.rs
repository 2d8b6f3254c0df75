//! Monster battle actions.
//!
//! Once per tick, while the player is in battle, every monster in the room
//! that has not acted yet gets one action: flee, pick up a weapon, cast a
//! spell or attack. A group first loses its cowards, then lets a few of the
//! members still present act on their own.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::config::GameConfig;
use crate::engine::Game;
use crate::error::{GameResult, InvariantError};
use crate::hooks::{EventName, HookArgs};
use crate::state::{Armament, ArtifactId, CombatCode, MonsterId, Reaction, RoomId, Spell, Style};

impl Game {
    /// Lets every visible monster take its battle action.
    pub fn battle_round(&mut self) -> GameResult<()> {
        for id in self.state.monsters.visible().to_vec() {
            if self.state.is_over() || self.state.turn.skip_battle_actions {
                break;
            }
            let ready = self
                .state
                .monsters
                .get(id)
                .is_some_and(|monster| !monster.turn_taken && monster.is_alive());
            if !ready || !self.is_here(id) {
                continue;
            }
            self.do_battle_actions(id)?;
            self.monster_mut(id)?.turn_taken = true;
            self.refresh_visible()?;
        }
        Ok(())
    }

    /// Runs one monster's (or group's) action for this round.
    pub fn do_battle_actions(&mut self, id: MonsterId) -> GameResult<()> {
        if self.state.monsters.is_group(id) {
            self.group_battle_actions(id)
        } else {
            self.monster_battle_actions(id)
        }
    }

    fn monster_battle_actions(&mut self, id: MonsterId) -> GameResult<()> {
        let monster = self.monster(id)?;
        if self.state.turn.skip_battle_actions || monster.reaction == Reaction::Neutral {
            return Ok(());
        }
        if !self.gate(EventName::MonsterAction, HookArgs::Monster { monster: id })? {
            return Ok(());
        }

        let monster = self.monster(id)?;
        let (room, parent) = (monster.room_id, monster.parent);
        if let Some(room) = room
            && parent.is_none()
            && !self.good_exits(room)?.is_empty()
            && !self.check_courage(id, false)?
        {
            return self.flee(id, true);
        }

        let monster = self.monster(id)?;
        if monster.combat_code == CombatCode::NeverFight {
            return Ok(());
        }

        if monster.wants_weapon() {
            let wanted = match monster.weapon {
                Armament::Seeking(Some(weapon)) => Some(weapon),
                _ => None,
            };
            if let Some(weapon) = self.weapon_within_reach(wanted, room) {
                return self.pick_up_weapon(id, weapon);
            }
        }

        if self.cast_monster_spell(id)? {
            return Ok(());
        }

        if self.monster(id)?.can_attack()
            && let Some(target) = self.choose_target(id)?
        {
            self.attack(id, target)?;
        }
        self.refresh_visible()?;
        Ok(())
    }

    /// The weapon a monster wants if it lies here, else the first weapon in
    /// sight.
    fn weapon_within_reach(
        &self,
        wanted: Option<ArtifactId>,
        room: Option<RoomId>,
    ) -> Option<ArtifactId> {
        let room = room?;
        let lying_here = |id: &ArtifactId| {
            self.state
                .artifacts
                .get(*id)
                .is_some_and(|artifact| artifact.room_id() == Some(room) && artifact.kind.is_weapon())
        };
        let visible = self.state.artifacts.visible();
        wanted
            .filter(|id| visible.contains(id) && lying_here(id))
            .or_else(|| visible.iter().copied().find(|id| lying_here(id)))
    }

    /// Casts a spell instead of attacking when the spellbook allows it.
    /// Returns whether the action was spent.
    fn cast_monster_spell(&mut self, id: MonsterId) -> GameResult<bool> {
        let monster = self.monster(id)?;
        let Some(book) = monster.spellbook.clone() else {
            return Ok(false);
        };
        if book.spells.is_empty() || book.points <= 0 {
            return Ok(false);
        }
        let (name, damage, hardiness) = (monster.info.name.clone(), monster.damage, monster.hardiness);
        if self.roll(1, 100) > book.frequency {
            return Ok(false);
        }

        if book.knows(Spell::Heal) && f64::from(damage) > f64::from(hardiness) * 0.4 {
            self.say(format!("{name} casts a heal spell!"));
            let amount = self.roll(2, 6);
            self.heal(id, amount)?;
            self.spend_spell_point(id)?;
            debug!(target: "core::combat", monster = %id, amount, "monster healed itself");
            return Ok(true);
        }

        if book.knows(Spell::Blast)
            && let Some(target) = self.choose_target(id)?
        {
            let target_name = self.monster(target)?.info.name.clone();
            self.say(format!("{name} casts a Blast spell at {target_name}!"));
            self.write("--a direct hit!", Style::Success);
            let damage = self.roll(2, 5);
            self.injure(target, damage, true, Some(id))?;
            self.spend_spell_point(id)?;
            debug!(target: "core::combat", monster = %id, target = %target, damage, "monster blasted");
            return Ok(true);
        }
        Ok(false)
    }

    fn spend_spell_point(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        if let Some(book) = self.monster_mut(id)?.spellbook.as_mut() {
            book.points -= 1;
        }
        Ok(())
    }

    fn group_battle_actions(&mut self, id: MonsterId) -> GameResult<()> {
        let group = self.monster(id)?;
        if self.state.turn.skip_battle_actions
            || group.reaction == Reaction::Neutral
            || group.combat_code == CombatCode::NeverFight
        {
            return Ok(());
        }
        if !self.gate(EventName::MonsterAction, HookArgs::Monster { monster: id })? {
            return Ok(());
        }

        let group = self.monster(id)?;
        let (name, room) = (group.info.name.clone(), group.room_id);
        let Some(room) = room else {
            return Ok(());
        };

        if !self.good_exits(room)?.is_empty() {
            let mut chickens = Vec::new();
            for member in self.state.monsters.present_members(id, Some(room)) {
                if !self.check_courage(member, false)? {
                    chickens.push(member);
                }
            }
            if !chickens.is_empty() {
                let text = if chickens.len() == 1 {
                    format!("{name} {}!", self.config.flee_verbs.singular)
                } else {
                    let plural = self
                        .state
                        .monsters
                        .group(id)
                        .map_or_else(|| name.clone(), |group| group.name_plural.clone());
                    format!("{} {plural} {}!", chickens.len(), self.config.flee_verbs.plural)
                };
                self.write(text, Style::Warning);
                debug!(target: "core::combat", group = %id, fled = chickens.len(), "group members fled");
                for member in chickens {
                    self.flee(member, false)?;
                }
            }
        }

        let actors: ArrayVec<MonsterId, { GameConfig::MAX_GROUP_ACTORS_PER_TICK }> = self
            .state
            .monsters
            .present_members(id, Some(room))
            .into_iter()
            .take(self.config.group_actor_cap())
            .collect();
        for member in actors {
            if self.state.is_over() {
                break;
            }
            let ready = self
                .state
                .monsters
                .get(member)
                .is_some_and(|monster| monster.is_alive() && !monster.turn_taken);
            if ready {
                self.monster_battle_actions(member)?;
                self.monster_mut(member)?.turn_taken = true;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{add_monster, sandbox, sandbox_with};
    use crate::hooks::{Adventure, HookOutcome};
    use crate::state::{Artifact, ArtifactKind, Friendliness, GroupMonster, Monster, Spellbook};

    fn hostile(game: &mut Game, id: u32) -> MonsterId {
        let orc = add_monster(game, id, "orc", 1);
        game.monster_mut(orc).unwrap().attack_odds = 50;
        game.refresh_visible().unwrap();
        orc
    }

    fn kobolds(game: &mut Game, count: usize, courage: i32) -> MonsterId {
        // unarmed, so members that stay spend their action looking for a weapon
        let mut base = Monster::new(MonsterId(5), "kobold");
        base.courage = courage;
        let mut group = GroupMonster::new(base, "kobolds");
        for _ in 0..count {
            group.spawn_member(Some(RoomId(1)));
        }
        let id = game.state.monsters.add_group(group).unwrap();
        game.refresh_visible().unwrap();
        id
    }

    #[test]
    fn brave_monster_attacks_the_player() {
        // courage 50, target pick 1, hit roll 30, damage 3
        let mut game = sandbox(&[50, 1, 30, 3]);
        hostile(&mut game, 1);
        game.battle_round().unwrap();
        assert_eq!(game.player().unwrap().damage, 3);
        assert!(game.state.history.mentions("-- a hit!"));
    }

    #[test]
    fn coward_runs_instead_of_fighting() {
        let mut game = sandbox(&[90, 1]);
        let orc = hostile(&mut game, 1);
        game.monster_mut(orc).unwrap().courage = 10;
        game.battle_round().unwrap();
        assert_eq!(game.monster(orc).unwrap().room_id, Some(RoomId(2)));
        assert!(game.state.history.mentions("orc flees to the north."));
        assert_eq!(game.player().unwrap().damage, 0);
    }

    #[test]
    fn neutral_monsters_stand_by() {
        let mut game = sandbox(&[]);
        let guard = add_monster(&mut game, 1, "guard", 1);
        game.monster_mut(guard).unwrap().friendliness = Friendliness::Neutral;
        game.refresh_visible().unwrap();
        game.battle_round().unwrap();
        assert_eq!(game.player().unwrap().damage, 0);
        assert!(game.state.history.entries().is_empty());
    }

    #[test]
    fn vetoed_monster_action_does_nothing() {
        let adventure = Adventure::new("calm")
            .on(EventName::MonsterAction, |_, _| Ok(HookOutcome::veto()));
        let mut game = sandbox_with(adventure, &[]);
        hostile(&mut game, 1);
        game.battle_round().unwrap();
        assert_eq!(game.player().unwrap().damage, 0);
    }

    #[test]
    fn unarmed_monster_grabs_a_weapon() {
        let mut game = sandbox(&[50]);
        let orc = add_monster(&mut game, 1, "orc", 1);
        game.monster_mut(orc).unwrap().weapon = Armament::Unarmed;
        let mut axe = Artifact::new(ArtifactId(3), "axe", ArtifactKind::Weapon);
        axe.move_to_room(RoomId(1));
        game.state.artifacts.add(axe).unwrap();
        game.refresh_visible().unwrap();

        game.battle_round().unwrap();
        assert_eq!(game.monster(orc).unwrap().weapon, Armament::Weapon(ArtifactId(3)));
        assert!(game.state.history.mentions("orc picks up axe."));
    }

    #[test]
    fn wounded_caster_heals_itself() {
        // courage 1, spell frequency roll 10, heal 2d6 = 7
        let mut game = sandbox(&[1, 10, 7]);
        let shaman = hostile(&mut game, 1);
        let monster = game.monster_mut(shaman).unwrap();
        monster.damage = 6;
        monster.spellbook = Some(Spellbook {
            spells: vec![Spell::Heal],
            points: 2,
            frequency: 50,
        });
        game.battle_round().unwrap();
        let monster = game.monster(shaman).unwrap();
        assert_eq!(monster.damage, 0);
        assert_eq!(monster.spellbook.as_ref().unwrap().points, 1);
        assert!(game.state.history.mentions("orc casts a heal spell!"));
    }

    #[test]
    fn cowardly_group_members_scatter() {
        // fear rolls: flee, stay, flee; then an exit roll for each runner
        let mut game = sandbox(&[90, 10, 95, 1, 1]);
        let group = kobolds(&mut game, 3, 40);

        game.battle_round().unwrap();
        assert!(game.state.history.mentions("2 kobolds flee!"));
        let present = game.state.monsters.present_members(group, Some(RoomId(1)));
        assert_eq!(present.len(), 1);
    }

    #[test]
    fn only_a_few_group_members_act_each_round() {
        let mut game = sandbox(&[]);
        game.config.group_actors_per_tick = 2;
        let group = kobolds(&mut game, 4, 100);
        game.state.rooms.require_mut(RoomId(1)).unwrap().exits.clear();
        game.refresh_visible().unwrap();

        game.battle_round().unwrap();
        let acted = game
            .state
            .monsters
            .group(group)
            .unwrap()
            .members()
            .iter()
            .filter(|member| member.turn_taken)
            .count();
        assert_eq!(acted, 2);
    }
}
