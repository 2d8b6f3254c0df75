//! Derived views: inventories, armor and the "visible in this room" lists.
//!
//! None of these update on their own. Anything that moves a monster or an
//! artifact between rooms must call [`Game::refresh_visible`] before the next
//! read of a visible list.

use tracing::trace;

use super::Game;
use crate::error::{GameResult, InvariantError};
use crate::hooks::{EventName, HookArgs};
use crate::state::{Armament, ArtifactKind, Friendliness, MonsterId, Reaction};

impl Game {
    /// Rebuilds a monster's inventory, carried weight and (for the player)
    /// armor class from artifact locations. Fires no hooks.
    pub(crate) fn refresh_inventory(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        let carried: Vec<_> = self
            .state
            .artifacts
            .carried_by(id)
            .filter(|artifact| artifact.kind != ArtifactKind::BoundMonster)
            .map(|artifact| {
                (
                    artifact.id,
                    artifact.weight,
                    artifact.is_worn(),
                    artifact.armor_class(),
                )
            })
            .collect();
        let weapon_lost = match self.monster(id)?.weapon {
            Armament::Weapon(weapon) => self.artifact(weapon)?.holder() != Some(id),
            _ => false,
        };

        let monster = self.monster_mut(id)?;
        monster.inventory = carried.iter().map(|(artifact, ..)| *artifact).collect();
        monster.weight_carried = carried.iter().map(|(_, weight, ..)| *weight).sum();
        if weapon_lost {
            monster.weapon = Armament::Unarmed;
        }
        if monster.is_player() {
            let armor_class = carried
                .iter()
                .filter(|(_, _, worn, _)| *worn)
                .map(|(.., class)| *class)
                .sum();
            monster.armor_class = armor_class;
            if let Some(profile) = monster.profile_mut() {
                profile.armor_class = armor_class;
            }
        }
        Ok(())
    }

    /// Refreshes a monster's inventory; for the player, lets the adventure
    /// adjust the recomputed armor class through `armorClass`.
    pub fn update_inventory(&mut self, id: MonsterId) -> GameResult<()> {
        self.refresh_inventory(id)?;
        if id.is_player() {
            self.trigger(EventName::ArmorClass, HookArgs::Monster { monster: id })?;
        }
        Ok(())
    }

    /// To-hit penalty from worn armor, reduced by armor expertise. Never negative.
    pub fn armor_factor(&self, id: MonsterId) -> i32 {
        let penalty: i32 = self
            .state
            .artifacts
            .carried_by(id)
            .filter(|artifact| artifact.is_worn())
            .filter_map(|artifact| artifact.armor.map(|armor| armor.penalty))
            .sum();
        let expertise = self
            .state
            .monsters
            .get(id)
            .and_then(|monster| monster.profile())
            .map_or(0, |profile| profile.armor_expertise);
        (penalty - expertise).max(0)
    }

    /// Recomputes both visible lists for the player's room.
    ///
    /// Monsters meeting the player for the first time settle their reaction
    /// here; any hostile one puts the player in battle.
    pub fn refresh_visible(&mut self) -> Result<(), InvariantError> {
        let room = self.current_room();
        self.state.monsters.update_virtual_rooms(room);

        let candidates: Vec<MonsterId> = self
            .state
            .monsters
            .in_room(room)
            .into_iter()
            .filter(|id| {
                self.state
                    .monsters
                    .get(*id)
                    .is_some_and(|monster| monster.container_id.is_none())
            })
            .collect();

        let mut in_battle = false;
        for id in &candidates {
            if self.monster(*id)?.reaction == Reaction::Unknown {
                self.check_reaction(*id)?;
            }
            in_battle |= self.monster(*id)?.is_hostile();
        }
        self.state.turn.in_battle = in_battle;
        trace!(
            target: "core::repo",
            monsters = candidates.len(),
            in_battle,
            "monster visibility recomputed"
        );
        self.state.monsters.set_visible(candidates);
        self.state.artifacts.update_visible(room);
        Ok(())
    }

    /// Settles a monster's reaction from its friendliness policy.
    ///
    /// Random friendliness rolls twice against the odds adjusted by the
    /// player's charisma: the first roll decides friend against not, the
    /// second neutral against hostile. Groups share the result with members.
    pub fn check_reaction(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        let friendliness = self.monster(id)?.friendliness;
        let reaction = match friendliness {
            Friendliness::Friend => Reaction::Friend,
            Friendliness::Neutral => Reaction::Neutral,
            Friendliness::Hostile => Reaction::Hostile,
            Friendliness::Random(odds) => {
                let charisma = self.player()?.charisma;
                let friend_odds = odds + (charisma - 10) * 2;
                if self.roll(1, 100) <= friend_odds {
                    Reaction::Friend
                } else if self.roll(1, 100) <= friend_odds {
                    Reaction::Neutral
                } else {
                    Reaction::Hostile
                }
            }
        };
        self.set_reaction(id, reaction)
    }

    pub(crate) fn set_reaction(&mut self, id: MonsterId, reaction: Reaction) -> Result<(), InvariantError> {
        match self.state.monsters.group_mut(id) {
            Some(group) => group.set_reaction(reaction),
            None => self.monster_mut(id)?.reaction = reaction,
        }
        trace!(target: "core::repo", monster = %id, reaction = %reaction, "reaction settled");
        Ok(())
    }

    /// Rechecks a non-hostile monster's reaction after the player wronged it.
    ///
    /// The policy becomes random at half its previous friend odds. A neutral
    /// monster never turns friendly this way.
    pub fn hurt_feelings(&mut self, id: MonsterId) -> Result<(), InvariantError> {
        let monster = self.monster(id)?;
        if monster.is_hostile() {
            return Ok(());
        }
        let old_reaction = monster.reaction;
        let odds = match monster.friendliness {
            Friendliness::Friend => 100,
            Friendliness::Neutral | Friendliness::Hostile => 50,
            Friendliness::Random(odds) => odds,
        };
        let halved = Friendliness::Random(odds / 2);
        match self.state.monsters.group_mut(id) {
            Some(group) => {
                group.base.friendliness = halved;
                for member in group.members_mut() {
                    member.friendliness = halved;
                }
            }
            None => self.monster_mut(id)?.friendliness = halved,
        }

        self.check_reaction(id)?;
        if old_reaction == Reaction::Neutral && self.monster(id)?.reaction == Reaction::Friend {
            self.set_reaction(id, Reaction::Neutral)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::sandbox;
    use crate::state::{ArmorProfile, ArmorSlot, Artifact, ArtifactId, Monster, RoomId};

    fn game(rolls: &[i32]) -> Game {
        sandbox(rolls)
    }

    fn add_monster(game: &mut Game, id: u32, friendliness: Friendliness) {
        let mut monster = Monster::new(MonsterId(id), "guard");
        monster.room_id = Some(RoomId(1));
        monster.friendliness = friendliness;
        game.state.monsters.add(monster).unwrap();
    }

    #[test]
    fn worn_armor_sets_player_armor_class() {
        let mut game = game(&[]);
        let mut mail = Artifact::new(ArtifactId(1), "chain mail", ArtifactKind::Wearable);
        mail.armor = Some(ArmorProfile {
            slot: ArmorSlot::Armor,
            class: 3,
            penalty: 10,
        });
        mail.weight = 20;
        mail.move_to_inventory(MonsterId::PLAYER);
        mail.set_worn(true);
        game.state.artifacts.add(mail).unwrap();

        game.update_inventory(MonsterId::PLAYER).unwrap();
        let player = game.player().unwrap();
        assert_eq!(player.armor_class, 3);
        assert_eq!(player.weight_carried, 20);
        assert_eq!(player.inventory, vec![ArtifactId(1)]);
        assert_eq!(game.armor_factor(MonsterId::PLAYER), 10);

        game.state.monsters.player_mut().unwrap().profile_mut().unwrap().armor_expertise = 15;
        assert_eq!(game.armor_factor(MonsterId::PLAYER), 0);
    }

    #[test]
    fn dropped_weapon_is_no_longer_ready() {
        let mut game = game(&[]);
        let mut sword = Artifact::new(ArtifactId(1), "sword", ArtifactKind::Weapon);
        sword.move_to_room(RoomId(1));
        game.state.artifacts.add(sword).unwrap();
        game.state.monsters.player_mut().unwrap().weapon = Armament::Weapon(ArtifactId(1));

        game.refresh_inventory(MonsterId::PLAYER).unwrap();
        assert_eq!(game.player().unwrap().weapon, Armament::Unarmed);
    }

    #[test]
    fn random_reaction_uses_two_rolls() {
        // odds 50: 60 fails friendship, 40 passes neutrality
        let mut game = game(&[60, 40]);
        add_monster(&mut game, 1, Friendliness::Random(50));
        game.check_reaction(MonsterId(1)).unwrap();
        assert_eq!(game.monster(MonsterId(1)).unwrap().reaction, Reaction::Neutral);
    }

    #[test]
    fn hostile_monster_starts_battle() {
        let mut game = game(&[]);
        add_monster(&mut game, 1, Friendliness::Hostile);
        game.refresh_visible().unwrap();
        assert!(game.state.turn.in_battle);
        assert_eq!(game.state.monsters.visible(), &[MonsterId(1)]);
    }

    #[test]
    fn hurt_neutral_monster_never_becomes_friend() {
        // odds 25 after halving: 10 would make it a friend
        let mut game = game(&[10]);
        add_monster(&mut game, 1, Friendliness::Neutral);
        game.check_reaction(MonsterId(1)).unwrap();
        game.hurt_feelings(MonsterId(1)).unwrap();
        let guard = game.monster(MonsterId(1)).unwrap();
        assert_eq!(guard.reaction, Reaction::Neutral);
        assert_eq!(guard.friendliness, Friendliness::Random(25));
    }
}
