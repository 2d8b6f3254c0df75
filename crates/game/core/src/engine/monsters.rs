//! Monster behavior: movement, courage, wounds and death, equipment.
//!
//! Operations on a group id delegate to its members: damage and healing go to
//! one random member standing with the player, movement takes along the
//! members that were with the group, destruction removes every member.

use strum::{AsRefStr, Display};
use tracing::debug;

use super::Game;
use crate::error::{GameResult, InvariantError};
use crate::hooks::{EventName, HookArgs};
use crate::state::{
    Armament, ArmorSlot, ArtifactFlags, ArtifactId, ArtifactKind, Exit, ExitTarget, HealthBand, MonsterId,
    MonsterStatus, Reaction, RoomId, Style, direction_name,
};

/// Whether visible monsters go along when the player changes rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowMode {
    /// Friends always follow; hostile pursuers follow when brave enough.
    Followers,
    Alone,
}

/// Stat a saving throw is made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Stat {
    Hardiness,
    Agility,
    Charisma,
}

impl Game {
    // ===== movement =====

    /// Moves the player, updating the current room.
    pub fn move_player(&mut self, room: RoomId, follow: FollowMode) -> GameResult<()> {
        self.room(room)?;
        let followers = match follow {
            FollowMode::Followers => self.state.monsters.visible().to_vec(),
            FollowMode::Alone => Vec::new(),
        };

        let player = self.state.monsters.player_mut()?;
        player.room_id = Some(room);
        player.container_id = None;
        self.state.rooms.set_current(Some(room));
        debug!(target: "core::turn", room = %room, "player moved");

        for id in followers {
            if self.monster(id)?.reaction == Reaction::Unknown {
                self.check_reaction(id)?;
            }
            let follows = match self.monster(id)?.reaction {
                Reaction::Friend => true,
                Reaction::Hostile => self.check_courage(id, true)?,
                _ => false,
            };
            if follows {
                self.move_monster(id, Some(room))?;
            }
        }
        self.refresh_visible()?;
        Ok(())
    }

    /// Moves a monster, or the members of a group that were with it.
    ///
    /// `None` means the player's room. A monster never acts on the turn it
    /// arrives.
    pub fn move_monster(&mut self, id: MonsterId, room: Option<RoomId>) -> Result<(), InvariantError> {
        let destination = room.or(self.current_room());
        if let Some(group) = self.state.monsters.group_mut(id) {
            let from = group.base.room_id;
            for member in group.members_mut() {
                if member.is_alive() && member.room_id == from {
                    member.room_id = destination;
                    member.container_id = None;
                    member.turn_taken = true;
                }
            }
        }
        let monster = self.monster_mut(id)?;
        monster.room_id = destination;
        monster.container_id = None;
        monster.turn_taken = true;
        Ok(())
    }

    // ===== courage and fleeing =====

    /// Rolls 1d100 fear against effective courage. `following` is the check
    /// a hostile monster makes to chase the player out of the room.
    pub fn check_courage(&mut self, id: MonsterId, following: bool) -> Result<bool, InvariantError> {
        let fear = self.roll(1, 100);
        let courage = self.monster(id)?.effective_courage(following);
        Ok(courage >= f64::from(fear))
    }

    /// Exits a monster can run through: open, leading to a real room.
    pub fn good_exits(&self, room: RoomId) -> Result<Vec<Exit>, InvariantError> {
        let room = self.room(room)?;
        Ok(room
            .exits
            .iter()
            .filter(|exit| matches!(exit.destination, ExitTarget::Room(_)))
            .filter(|exit| self.exit_is_open(exit))
            .cloned()
            .collect())
    }

    /// An exit without a door, or whose door is open and found.
    pub fn exit_is_open(&self, exit: &Exit) -> bool {
        exit.door_id
            .and_then(|door| self.state.artifacts.get(door))
            .is_none_or(|door| door.is_open() && !door.is_hidden())
    }

    /// Random good exit out of `room`.
    pub fn random_exit(&mut self, room: RoomId) -> Result<Option<Exit>, InvariantError> {
        let mut exits = self.good_exits(room)?;
        Ok(self.random_index(exits.len()).map(|index| exits.swap_remove(index)))
    }

    /// Sends a monster out a random good exit.
    ///
    /// A group sends every member standing with the player, each through its
    /// own random exit.
    pub fn flee(&mut self, id: MonsterId, show_message: bool) -> GameResult<()> {
        let monster = self.monster(id)?;
        let name = monster.info.name.clone();
        let Some(room) = monster.room_id else {
            return Ok(());
        };

        if self.good_exits(room)?.is_empty() {
            if show_message {
                let present = self.state.monsters.present_members(id, Some(room));
                let text = match self.state.monsters.group(id) {
                    Some(group) if present.len() > 1 => format!(
                        "{} {} look frantically for an exit but find nowhere to go!",
                        present.len(),
                        group.name_plural
                    ),
                    _ => format!("{name} looks frantically for an exit but finds nowhere to go!"),
                };
                self.write(text, Style::Warning);
            }
            return Ok(());
        }

        if let Some(group) = self.state.monsters.group(id) {
            let plural = group.name_plural.clone();
            let present = self.state.monsters.present_members(id, self.current_room());
            if show_message {
                let verb = self.config.flee_verbs.plural.clone();
                self.write(format!("{} {plural} {verb}.", present.len()), Style::Warning);
            }
            for member in present {
                self.flee(member, false)?;
            }
            self.refresh_visible()?;
            return Ok(());
        }

        let Some(exit) = self.random_exit(room)? else {
            return Ok(());
        };
        if show_message {
            let verb = &self.config.flee_verbs.singular;
            let direction = direction_name(&exit.direction);
            let text = if matches!(exit.direction.as_str(), "u" | "d") {
                format!("{name} {verb} {direction}ward.")
            } else {
                format!("{name} {verb} to the {direction}.")
            };
            self.write(text, Style::Warning);
        }
        debug!(target: "core::combat", monster = %id, direction = %exit.direction, "monster fled");
        self.move_monster(id, exit.destination.room())?;
        self.refresh_visible()?;
        Ok(())
    }

    // ===== wounds and death =====

    /// Deals damage and returns how much was actually taken.
    ///
    /// Armor absorbs its class unless ignored; damage is clamped to the hit
    /// points left. Reaching zero runs the death pipeline, which the `death`
    /// hook may veto.
    pub fn injure(
        &mut self,
        id: MonsterId,
        damage: i32,
        ignore_armor: bool,
        attacker: Option<MonsterId>,
    ) -> GameResult<i32> {
        if self.state.monsters.is_group(id) {
            let present = self.state.monsters.present_members(id, self.current_room());
            return match self.random_index(present.len()) {
                Some(index) => self.injure(present[index], damage, ignore_armor, attacker),
                None => Ok(0),
            };
        }

        let monster = self.monster(id)?;
        let mut damage = damage;
        if monster.armor_class > 0 && !ignore_armor {
            damage -= monster.armor_class;
            if damage <= 0 {
                self.write("-- blow bounces off armor!", Style::NoSpace);
                return Ok(0);
            }
        }
        damage = damage.min(monster.remaining()).max(0);

        let monster = self.monster_mut(id)?;
        monster.damage += damage;
        let dead = monster.damage >= monster.hardiness;
        self.show_health(id)?;
        if id.is_player() {
            self.state.statistics.damage_taken += damage;
        }
        if dead {
            self.kill(id, attacker)?;
        }
        Ok(damage)
    }

    fn kill(&mut self, id: MonsterId, attacker: Option<MonsterId>) -> GameResult<()> {
        if !self.gate(EventName::Death, HookArgs::Death { monster: id, attacker })? {
            debug!(target: "core::combat", monster = %id, "death vetoed");
            return Ok(());
        }
        debug!(target: "core::combat", monster = %id, attacker = ?attacker, "monster died");

        self.monster_mut(id)?.status = MonsterStatus::Dead;
        let carried: Vec<ArtifactId> = self.state.artifacts.carried_by(id).map(|a| a.id).collect();
        for artifact in carried {
            self.drop_artifact(id, artifact)?;
        }

        let parent = self.monster(id)?.parent;
        let room = self.fallen_in(id)?;
        self.place_dead_body(parent.unwrap_or(id), room)?;
        if attacker.is_some_and(MonsterId::is_player) && !id.is_player() {
            self.state.statistics.enemies_killed += 1;
        }

        // after-death handlers still see where the monster fell
        self.trigger(EventName::AfterDeath, HookArgs::Monster { monster: id })?;
        if let Some(parent) = parent {
            let wiped_out = self
                .state
                .monsters
                .group(parent)
                .is_some_and(|group| group.living().next().is_none());
            if wiped_out {
                self.trigger(EventName::AfterDeath, HookArgs::Monster { monster: parent })?;
            }
        }
        self.monster_mut(id)?.room_id = None;
        self.refresh_visible()?;
        if id.is_player() {
            self.die();
        }
        Ok(())
    }

    /// Puts a monster's dead body artifact where it fell, unless that artifact
    /// is gear the player brought along.
    fn place_dead_body(&mut self, id: MonsterId, room: Option<RoomId>) -> Result<(), InvariantError> {
        let (Some(body), Some(room)) = (self.monster(id)?.dead_body_id, room) else {
            return Ok(());
        };
        if let Some(body) = self.state.artifacts.get_mut(body)
            && !body.flags.contains(ArtifactFlags::PLAYER_BROUGHT)
        {
            body.move_to_room(room);
        }
        Ok(())
    }

    fn fallen_in(&self, id: MonsterId) -> Result<Option<RoomId>, InvariantError> {
        let monster = self.monster(id)?;
        Ok(monster.room_id.or(self.current_room()))
    }

    /// Writes the monster's health line.
    pub fn show_health(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        let monster = self.monster(id)?;
        let style = match monster.health_band() {
            HealthBand::BadlyInjured | HealthBand::DeathsDoor => Style::Warning,
            HealthBand::Dead => Style::Danger,
            _ => Style::Normal,
        };
        let text = monster.health_message();
        self.write(text, style);
        Ok(())
    }

    /// Heals damage, never below zero. A group heals one random present member.
    pub fn heal(&mut self, id: MonsterId, amount: i32) -> Result<(), InvariantError> {
        if self.state.monsters.is_group(id) {
            let present = self.state.monsters.present_members(id, self.current_room());
            if let Some(index) = self.random_index(present.len()) {
                self.heal(present[index], amount)?;
            }
            return Ok(());
        }
        let monster = self.monster_mut(id)?;
        monster.damage = (monster.damage - amount).max(0);
        self.show_health(id)
    }

    /// Takes a monster, or every member of a group, out of the game.
    pub fn destroy_monster(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        if let Some(group) = self.state.monsters.group_mut(id) {
            for member in group.members_mut() {
                member.room_id = None;
            }
        }
        self.monster_mut(id)?.room_id = None;
        self.refresh_visible()
    }

    /// Brings a dead monster back to life in the player's room.
    pub fn resurrect(&mut self, id: MonsterId) -> GameResult<()> {
        self.move_monster(id, None)?;
        let monster = self.monster_mut(id)?;
        monster.damage = 0;
        monster.status = MonsterStatus::Alive;
        if let Some(body) = monster.dead_body_id {
            self.destroy_artifact(body)?;
        }
        self.refresh_visible()?;
        Ok(())
    }

    /// d20 plus half the stat's distance from 10 must reach `difficulty`.
    pub fn saving_throw(&mut self, id: MonsterId, stat: Stat, difficulty: i32) -> Result<bool, InvariantError> {
        let roll = self.roll(1, 20);
        let monster = self.monster(id)?;
        let value = match stat {
            Stat::Hardiness => monster.hardiness,
            Stat::Agility => monster.agility,
            Stat::Charisma => monster.charisma,
        };
        Ok(roll + (value - 10).div_euclid(2) >= difficulty)
    }

    // ===== groups =====

    /// Adds a member to a group in the group's room. New members fight with
    /// natural weapons.
    pub fn spawn_member(&mut self, group: MonsterId) -> Result<MonsterId, InvariantError> {
        let room = self.monster(group)?.room_id.or(self.current_room());
        let entry = self
            .state
            .monsters
            .group_mut(group)
            .ok_or(InvariantError::NotAGroup(group))?;
        let member = entry.spawn_member(room);
        if let Some(member) = entry.member_mut(member) {
            member.weapon = Armament::Natural;
        }
        self.refresh_visible()?;
        Ok(member)
    }

    /// Removes up to `count` living members; an emptied group leaves the game.
    pub fn remove_members(&mut self, group: MonsterId, count: usize) -> Result<(), InvariantError> {
        let entry = self
            .state
            .monsters
            .group_mut(group)
            .ok_or(InvariantError::NotAGroup(group))?;
        entry.remove_members(count);
        if entry.living().next().is_none() {
            return self.destroy_monster(group);
        }
        self.refresh_visible()
    }

    // ===== equipment =====

    /// Heaviest load a monster can carry.
    pub fn max_weight(&self, id: MonsterId) -> Result<i32, InvariantError> {
        Ok(self.monster(id)?.hardiness * 10)
    }

    pub fn pick_up(&mut self, id: MonsterId, artifact: ArtifactId) -> GameResult<()> {
        let previous = self.artifact_mut(artifact)?.move_to_inventory(id);
        if let Some(previous) = previous.filter(|holder| *holder != id) {
            self.update_inventory(previous)?;
        }
        self.update_inventory(id)?;
        self.refresh_visible()?;
        Ok(())
    }

    /// Drops an artifact where the monster stands; a dropped weapon is no
    /// longer ready.
    pub fn drop_artifact(&mut self, id: MonsterId, artifact: ArtifactId) -> GameResult<()> {
        let room = self.fallen_in(id)?;
        let entry = self.artifact_mut(artifact)?;
        match room {
            Some(room) => entry.move_to_room(room),
            None => entry.destroy(),
        };
        let monster = self.monster_mut(id)?;
        if monster.weapon == Armament::Weapon(artifact) {
            monster.weapon = Armament::Unarmed;
        }
        self.update_inventory(id)?;
        self.refresh_visible()?;
        Ok(())
    }

    pub fn ready(&mut self, id: MonsterId, weapon: ArtifactId) -> Result<(), InvariantError> {
        self.artifact(weapon)?;
        self.monster_mut(id)?.weapon = Armament::Weapon(weapon);
        Ok(())
    }

    /// Readies the carried weapon with the highest maximum damage.
    pub fn ready_best_weapon(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        let best = self
            .state
            .artifacts
            .carried_by(id)
            .filter(|artifact| artifact.kind.is_weapon())
            .max_by_key(|artifact| artifact.max_damage())
            .map(|artifact| artifact.id);
        if let Some(best) = best {
            self.ready(id, best)?;
        }
        Ok(())
    }

    /// Puts on the best body armor carried, and the best shield when the
    /// ready weapon leaves a hand free.
    pub fn wear_best_armor(&mut self, id: MonsterId) -> GameResult<()> {
        let best = |slot: ArmorSlot| {
            self.state
                .artifacts
                .carried_by(id)
                .filter(|artifact| artifact.kind == ArtifactKind::Wearable)
                .filter(|artifact| artifact.armor.is_some_and(|armor| armor.slot == slot))
                .max_by_key(|artifact| artifact.armor_class())
                .map(|artifact| artifact.id)
        };
        let armor = best(ArmorSlot::Armor);
        let shield = best(ArmorSlot::Shield);
        let one_handed = match self.monster(id)?.weapon {
            Armament::Weapon(weapon) => self.artifact(weapon)?.weapon.is_some_and(|w| w.hands == 1),
            _ => false,
        };
        if let Some(armor) = armor {
            self.wear(id, armor)?;
        }
        if let (Some(shield), true) = (shield, one_handed) {
            self.wear(id, shield)?;
        }
        Ok(())
    }

    pub fn wear(&mut self, id: MonsterId, artifact: ArtifactId) -> GameResult<()> {
        self.artifact_mut(artifact)?.set_worn(true);
        self.update_inventory(id)
    }

    pub fn remove(&mut self, id: MonsterId, artifact: ArtifactId) -> GameResult<()> {
        self.artifact_mut(artifact)?.set_worn(false);
        self.update_inventory(id)
    }

    /// Worn artifact of the given slot, if any.
    pub fn worn_in_slot(&self, id: MonsterId, slot: ArmorSlot) -> Option<ArtifactId> {
        self.state
            .artifacts
            .carried_by(id)
            .find(|artifact| artifact.is_worn() && artifact.armor.is_some_and(|armor| armor.slot == slot))
            .map(|artifact| artifact.id)
    }

    /// Picks up a weapon mid-battle and readies it.
    pub fn pick_up_weapon(&mut self, id: MonsterId, weapon: ArtifactId) -> GameResult<()> {
        let text = format!("{} picks up {}.", self.monster(id)?.name(), self.artifact(weapon)?.name());
        self.say(text);
        self.pick_up(id, weapon)?;
        self.ready(id, weapon)?;
        Ok(())
    }

    /// Weapon artifact the monster has ready.
    pub fn ready_weapon(&self, id: MonsterId) -> Option<ArtifactId> {
        self.state.monsters.get(id)?.weapon.weapon_id()
    }

    /// Rolls damage with the ready weapon, or natural weapons without one.
    pub fn roll_attack_damage(&mut self, id: MonsterId) -> Result<i32, InvariantError> {
        let (dice, sides) = match self.ready_weapon(id) {
            Some(weapon) => {
                let weapon = self.artifact(weapon)?;
                (weapon.dice, weapon.sides)
            }
            None => {
                let monster = self.monster(id)?;
                (monster.natural_dice, monster.natural_sides)
            }
        };
        Ok(self.roll(dice, sides))
    }

    // ===== targeting =====

    /// Random opponent in the player's room: friends go after hostiles and
    /// hostiles after the player and friends. The `chooseTarget` hook may
    /// replace the pick or cancel it.
    pub fn choose_target(&mut self, id: MonsterId) -> GameResult<Option<MonsterId>> {
        let attitude = if id.is_player() {
            Reaction::Friend
        } else {
            self.monster(id)?.reaction
        };
        let wanted = match attitude {
            Reaction::Friend => Reaction::Hostile,
            Reaction::Hostile => Reaction::Friend,
            _ => return Ok(None),
        };
        let candidates: Vec<MonsterId> = std::iter::once(MonsterId::PLAYER)
            .chain(self.state.monsters.visible().iter().copied())
            .filter(|candidate| *candidate != id)
            .filter(|candidate| {
                self.state.monsters.get(*candidate).is_some_and(|monster| {
                    let reaction = if monster.is_player() {
                        Reaction::Friend
                    } else {
                        monster.reaction
                    };
                    monster.is_alive() && reaction == wanted
                })
            })
            .collect();
        let Some(index) = self.random_index(candidates.len()) else {
            return Ok(None);
        };
        let target = candidates[index];
        self.override_target(
            EventName::ChooseTarget,
            HookArgs::Combat {
                attacker: id,
                defender: target,
                value: 0,
            },
            Some(target),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{add_monster, give_weapon, sandbox, sandbox_with};
    use crate::hooks::{Adventure, HookOutcome};
    use crate::state::{ArmorProfile, Artifact, GroupMonster, Monster, WeaponProfile, WeaponType};
    use std::cell::Cell;
    use std::rc::Rc;

    fn add_group(game: &mut Game, present: usize, elsewhere: usize) -> MonsterId {
        let mut base = Monster::new(MonsterId(5), "kobold");
        base.hardiness = 8;
        base.reaction = Reaction::Hostile;
        let mut group = GroupMonster::new(base, "kobolds");
        for _ in 0..present {
            group.spawn_member(Some(RoomId(1)));
        }
        for _ in 0..elsewhere {
            group.spawn_member(Some(RoomId(2)));
        }
        game.state.monsters.add_group(group).unwrap()
    }

    #[test]
    fn courage_compares_fear_roll() {
        let mut game = sandbox(&[80, 81]);
        let orc = add_monster(&mut game, 1, "orc", 1);
        game.monster_mut(orc).unwrap().courage = 80;
        assert!(game.check_courage(orc, false).unwrap());
        assert!(!game.check_courage(orc, false).unwrap());
    }

    #[test]
    fn armor_absorbs_blow() {
        let mut game = sandbox(&[]);
        let knight = add_monster(&mut game, 1, "knight", 1);
        game.monster_mut(knight).unwrap().armor_class = 5;
        assert_eq!(game.injure(knight, 4, false, None).unwrap(), 0);
        assert!(game.state.history.mentions("-- blow bounces off armor!"));
        assert_eq!(game.injure(knight, 4, true, None).unwrap(), 4);
        assert_eq!(game.monster(knight).unwrap().damage, 4);
    }

    #[test]
    fn lethal_damage_is_clamped_and_kills() {
        let mut game = sandbox(&[]);
        let orc = add_monster(&mut game, 1, "orc", 1);
        let mut club = crate::state::Artifact::new(ArtifactId(1), "club", ArtifactKind::Weapon);
        club.move_to_inventory(orc);
        game.state.artifacts.add(club).unwrap();

        assert_eq!(game.injure(orc, 50, true, Some(MonsterId::PLAYER)).unwrap(), 10);
        let orc_state = game.monster(orc).unwrap();
        assert!(!orc_state.is_alive());
        assert_eq!(orc_state.room_id, None);
        assert_eq!(game.artifact(ArtifactId(1)).unwrap().room_id(), Some(RoomId(1)));
        assert_eq!(game.state.statistics.enemies_killed, 1);
        assert!(game.state.history.mentions("orc is dead!"));
    }

    #[test]
    fn after_death_handlers_see_where_the_monster_fell() {
        let seen = Rc::new(Cell::new(None));
        let record = Rc::clone(&seen);
        let adventure = Adventure::new("wake").on(EventName::AfterDeath, move |game, args| {
            if let HookArgs::Monster { monster } = args {
                record.set(game.monster(*monster)?.room_id);
            }
            Ok(HookOutcome::proceed())
        });
        let mut game = sandbox_with(adventure, &[]);
        let orc = add_monster(&mut game, 1, "orc", 1);
        game.refresh_visible().unwrap();

        game.injure(orc, 50, true, Some(MonsterId::PLAYER)).unwrap();
        assert_eq!(seen.get(), Some(RoomId(1)));
        assert_eq!(game.monster(orc).unwrap().room_id, None);
        assert!(!game.state.monsters.is_visible(orc));
    }

    #[test]
    fn resurrected_monster_returns_to_the_player() {
        let mut game = sandbox(&[]);
        let orc = add_monster(&mut game, 1, "orc", 2);
        let body = game
            .state
            .artifacts
            .add(Artifact::new(ArtifactId(1), "dead orc", ArtifactKind::DeadBody))
            .unwrap();
        game.monster_mut(orc).unwrap().dead_body_id = Some(body);
        game.injure(orc, 50, true, None).unwrap();
        assert_eq!(game.artifact(body).unwrap().room_id(), Some(RoomId(2)));

        game.resurrect(orc).unwrap();
        let orc = game.monster(orc).unwrap();
        assert!(orc.is_alive());
        assert_eq!(orc.damage, 0);
        assert_eq!(orc.room_id, Some(RoomId(1)));
        assert!(game.artifact(body).unwrap().is_destroyed());
    }

    fn carry(game: &mut Game, mut artifact: Artifact) -> ArtifactId {
        artifact.move_to_inventory(MonsterId::PLAYER);
        let id = game.state.artifacts.add(artifact).unwrap();
        game.refresh_inventory(MonsterId::PLAYER).unwrap();
        id
    }

    fn armor(id: u32, name: &str, slot: ArmorSlot, class: i32) -> Artifact {
        let mut artifact = Artifact::new(ArtifactId(id), name, ArtifactKind::Wearable);
        artifact.armor = Some(ArmorProfile {
            slot,
            class,
            penalty: 0,
        });
        artifact
    }

    #[test]
    fn best_gear_is_readied_and_worn() {
        let mut game = sandbox(&[]);
        give_weapon(&mut game, 1, MonsterId::PLAYER, ArtifactKind::Weapon);
        let mut claymore = Artifact::new(ArtifactId(2), "claymore", ArtifactKind::Weapon);
        claymore.dice = 2;
        claymore.sides = 8;
        claymore.weapon = Some(WeaponProfile {
            weapon_type: WeaponType::Sword,
            odds: 0,
            hands: 1,
        });
        let claymore = carry(&mut game, claymore);
        game.ready_best_weapon(MonsterId::PLAYER).unwrap();
        assert_eq!(game.player().unwrap().weapon, Armament::Weapon(claymore));

        let leather = carry(&mut game, armor(3, "leather armor", ArmorSlot::Armor, 1));
        let chain = carry(&mut game, armor(4, "chain mail", ArmorSlot::Armor, 3));
        let shield = carry(&mut game, armor(5, "shield", ArmorSlot::Shield, 1));
        game.wear_best_armor(MonsterId::PLAYER).unwrap();
        assert!(game.artifact(chain).unwrap().is_worn());
        assert!(game.artifact(shield).unwrap().is_worn());
        assert!(!game.artifact(leather).unwrap().is_worn());
        assert_eq!(game.player().unwrap().armor_class, 4);
    }

    #[test]
    fn group_damage_lands_on_one_present_member() {
        // index roll 2 picks the second present member
        let mut game = sandbox(&[2]);
        let group = add_group(&mut game, 2, 2);
        game.refresh_visible().unwrap();

        assert_eq!(game.injure(group, 3, false, None).unwrap(), 3);
        let damage: Vec<i32> = game
            .state
            .monsters
            .group(group)
            .unwrap()
            .members()
            .iter()
            .map(|member| member.damage)
            .collect();
        assert_eq!(damage, vec![0, 3, 0, 0]);
    }

    #[test]
    fn hostile_pursuer_follows_fleeing_player() {
        // fear roll 10 against courage 85
        let mut game = sandbox(&[10]);
        let orc = add_monster(&mut game, 1, "orc", 1);
        game.monster_mut(orc).unwrap().pursues = true;
        game.monster_mut(orc).unwrap().reaction = Reaction::Hostile;
        game.refresh_visible().unwrap();

        game.move_player(RoomId(2), FollowMode::Followers).unwrap();
        assert_eq!(game.current_room(), Some(RoomId(2)));
        assert_eq!(game.monster(orc).unwrap().room_id, Some(RoomId(2)));
        assert!(game.monster(orc).unwrap().turn_taken);
    }

    #[test]
    fn monster_flees_through_random_exit() {
        let mut game = sandbox(&[1]);
        let orc = add_monster(&mut game, 1, "orc", 1);
        game.flee(orc, true).unwrap();
        assert_eq!(game.monster(orc).unwrap().room_id, Some(RoomId(2)));
        assert!(game.state.history.mentions("orc flees to the north."));
    }

    #[test]
    fn emptied_group_leaves_the_game() {
        let mut game = sandbox(&[]);
        let group = add_group(&mut game, 1, 0);
        game.remove_members(group, 1).unwrap();
        assert_eq!(game.monster(group).unwrap().room_id, None);
        assert!(game.spawn_member(MonsterId(99)).is_err());
    }

    #[test]
    fn saving_throw_adds_half_stat_bonus() {
        let mut game = sandbox(&[10]);
        game.state.monsters.player_mut().unwrap().agility = 16;
        assert!(game.saving_throw(MonsterId::PLAYER, Stat::Agility, 13).unwrap());
    }
}
