//! Artifact behavior: moving between places, doors and containers, secrets,
//! consumables and smashing things.

use tracing::debug;

use super::Game;
use crate::error::{GameResult, InvariantError};
use crate::hooks::{EventName, HookArgs};
use crate::state::{
    ArtifactFlags, ArtifactId, ArtifactKind, EffectId, MonsterId, RoomId, Style,
};

/// How an attack or blast was delivered to an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Attack,
    Blast,
}

/// What hitting an artifact did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactHit {
    /// A dead body was hacked to bits.
    Hacked,
    /// A door or container took this much damage.
    Damaged(i32),
    /// A door or container that cannot be forced.
    Unbreakable,
    /// Attacking it makes no sense.
    Pointless,
}

impl Game {
    // ===== placement =====

    /// Removes an artifact from the game. Destroying it twice changes nothing.
    pub fn destroy_artifact(&mut self, id: ArtifactId) -> GameResult<()> {
        let artifact = self.artifact_mut(id)?;
        if artifact.is_destroyed() {
            return Ok(());
        }
        let holder = artifact.destroy();
        if let Some(holder) = holder {
            self.update_inventory(holder)?;
        }
        self.refresh_visible()?;
        Ok(())
    }

    /// Puts an artifact in a room, updating whoever was carrying it.
    pub fn move_artifact_to_room(&mut self, id: ArtifactId, room: RoomId) -> GameResult<()> {
        self.room(room)?;
        if let Some(holder) = self.artifact_mut(id)?.move_to_room(room) {
            self.update_inventory(holder)?;
        }
        self.refresh_visible()?;
        Ok(())
    }

    /// Puts an artifact inside a container.
    pub fn put_into_container(&mut self, id: ArtifactId, container: ArtifactId) -> GameResult<()> {
        self.artifact(container)?;
        if let Some(holder) = self.artifact_mut(id)?.put_into(container) {
            self.update_inventory(holder)?;
        }
        self.refresh_visible()?;
        Ok(())
    }

    /// Takes an artifact out of its container.
    ///
    /// From a container lying in a room it goes to the player, unless it is
    /// too unwieldy to carry; from a carried container it stays with the
    /// carrier.
    pub fn remove_from_container(&mut self, id: ArtifactId) -> GameResult<()> {
        let Some(container) = self.artifact(id)?.container_id() else {
            return Ok(());
        };
        let container = self.artifact(container)?;
        let (room, holder) = (container.room_id(), container.holder());
        let unwieldy = matches!(self.artifact(id)?.weight, 999 | -999);
        match (room, holder) {
            (Some(room), _) if unwieldy => self.move_artifact_to_room(id, room),
            (_, Some(holder)) => self.pick_up(holder, id),
            _ => self.pick_up(MonsterId::PLAYER, id),
        }
    }

    /// Artifacts inside a container.
    pub fn contents(&self, container: ArtifactId) -> Vec<ArtifactId> {
        self.state
            .artifacts
            .contents(container)
            .map(|artifact| artifact.id)
            .collect()
    }

    /// In the player's room or carried by the player.
    pub fn artifact_is_here(&self, id: ArtifactId) -> bool {
        self.state.artifacts.is_here(id, self.current_room())
    }

    /// A lit light source is in the room or in the player's hands.
    pub fn light_is_here(&self) -> bool {
        self.state.artifacts.iter().any(|artifact| {
            artifact.kind == ArtifactKind::LightSource
                && artifact.is_lit()
                && self.artifact_is_here(artifact.id)
        })
    }

    // ===== doors and containers =====

    /// Opens a door or container; a door's other side opens (and is found) too.
    pub fn open_artifact(&mut self, id: ArtifactId) -> GameResult<()> {
        let artifact = self.artifact_mut(id)?;
        artifact.flags.insert(ArtifactFlags::OPEN);
        let linked = artifact
            .linked_door_id
            .filter(|_| artifact.kind == ArtifactKind::DoorGate);
        if let Some(linked) = linked {
            if self.state.artifacts.get(linked).is_some() {
                self.reveal(linked)?;
                self.artifact_mut(linked)?.flags.insert(ArtifactFlags::OPEN);
            }
        }
        Ok(())
    }

    pub fn close_artifact(&mut self, id: ArtifactId) -> Result<(), InvariantError> {
        let artifact = self.artifact_mut(id)?;
        artifact.flags.remove(ArtifactFlags::OPEN);
        let linked = artifact
            .linked_door_id
            .filter(|_| artifact.kind == ArtifactKind::DoorGate);
        if let Some(linked) = linked.and_then(|linked| self.state.artifacts.get_mut(linked)) {
            linked.flags.remove(ArtifactFlags::OPEN);
        }
        Ok(())
    }

    /// Lists a container's contents. Monsters hiding inside jump out into
    /// the room.
    pub fn print_contents(&mut self, container: ArtifactId) -> GameResult<()> {
        self.say("It contains:");
        let hiding: Vec<MonsterId> = self
            .state
            .monsters
            .all()
            .filter(|monster| monster.container_id == Some(container))
            .map(|monster| monster.id)
            .collect();
        let contents = self.contents(container);
        if hiding.is_empty() && contents.is_empty() {
            self.write(" - (nothing)", Style::NoSpace);
        }
        for id in hiding {
            let name = self.monster(id)?.info.display_name();
            self.write(format!(" - {name}"), Style::NoSpace);
            self.move_monster(id, None)?;
            self.state.turn.skip_battle_actions = true;
        }
        for id in contents {
            let name = self.artifact(id)?.info.display_name();
            self.write(format!(" - {name}"), Style::NoSpace);
        }
        self.refresh_visible()?;
        Ok(())
    }

    // ===== secrets =====

    /// Uncovers an embedded artifact or a secret door.
    ///
    /// Shows the description when the artifact was never seen, uncovers the
    /// other side of a door, lists an open container and fires
    /// `revealArtifact`.
    pub fn reveal(&mut self, id: ArtifactId) -> GameResult<()> {
        let here = self.artifact_is_here(id);
        let artifact = self.artifact_mut(id)?;
        let was_hidden = artifact.is_hidden();
        artifact
            .flags
            .remove(ArtifactFlags::EMBEDDED | ArtifactFlags::HIDDEN);
        let description = (!artifact.info.seen && here).then(|| {
            artifact.info.seen = true;
            artifact.info.description.clone()
        });
        let linked = artifact
            .linked_door_id
            .filter(|_| artifact.kind == ArtifactKind::DoorGate);
        let open_container = artifact.kind == ArtifactKind::Container && artifact.is_open();

        if was_hidden {
            self.state.statistics.secret_doors_found += 1;
        }
        if let Some(description) = description {
            self.say(description);
        }
        if let Some(linked) = linked.and_then(|linked| self.state.artifacts.get_mut(linked)) {
            linked
                .flags
                .remove(ArtifactFlags::EMBEDDED | ArtifactFlags::HIDDEN);
        }
        debug!(target: "core::repo", artifact = %id, secret = was_hidden, "artifact revealed");
        self.refresh_visible()?;
        if open_container {
            self.print_contents(id)?;
        }
        self.trigger(EventName::RevealArtifact, HookArgs::Reveal { artifact: id })?;
        Ok(())
    }

    /// Turns a disguised-monster artifact into its monster, standing in the
    /// player's room.
    pub fn reveal_disguised_monster(&mut self, id: ArtifactId) -> GameResult<()> {
        self.print_effects(id, Style::Special)?;
        let artifact = self.artifact(id)?;
        let Some(monster) = artifact.monster_id else {
            return Ok(());
        };
        let room = self.current_room();
        self.monster_mut(monster)?.room_id = room;
        self.check_reaction(monster)?;
        self.destroy_artifact(id)?;
        self.update_inventory(monster)?;
        Ok(())
    }

    /// Releases the monster held by a bound-monster artifact into the
    /// artifact's room. Other artifacts are left alone.
    pub fn free_bound_monster(&mut self, id: ArtifactId) -> GameResult<()> {
        let artifact = self.artifact(id)?;
        if artifact.kind != ArtifactKind::BoundMonster {
            return Ok(());
        }
        let (monster, room) = (artifact.monster_id, artifact.room_id());
        if let Some(monster) = monster {
            self.move_monster(monster, room)?;
        }
        self.destroy_artifact(id)
    }

    // ===== effects =====

    /// Writes an effect's text and marks it seen. Unknown ids print nothing.
    pub fn print_effect(&mut self, id: EffectId, style: Style) {
        let Some(effect) = self.state.effects.get_mut(id) else {
            return;
        };
        effect.seen = true;
        let text = effect.text.clone();
        self.write(text, style);
    }

    /// Prints the run of effects attached to an artifact.
    pub fn print_effects(&mut self, id: ArtifactId, style: Style) -> Result<(), InvariantError> {
        let artifact = self.artifact(id)?;
        if let Some(first) = artifact.effect_id {
            for offset in 0..artifact.num_effects.max(1) {
                self.print_effect(EffectId(first.0 + offset), style);
            }
        }
        Ok(())
    }

    // ===== consumables =====

    /// Eats, drinks or otherwise uses an artifact.
    ///
    /// Food and drink with dice heal whoever holds them (the player when they
    /// lie in the room); negative dice are poison. Other behavior comes from
    /// the `use` hook. Each use spends one charge; the last one destroys it.
    pub fn use_artifact(&mut self, id: ArtifactId) -> GameResult<()> {
        let artifact = self.artifact(id)?;
        let (dice, sides, name) = (artifact.dice, artifact.sides, artifact.info.name.clone());
        let consumable = matches!(artifact.kind, ArtifactKind::Edible | ArtifactKind::Drinkable);
        let owner = artifact.holder().or_else(|| {
            (artifact.room_id().is_some() && artifact.room_id() == self.current_room())
                .then_some(MonsterId::PLAYER)
        });

        if let (true, Some(owner)) = (consumable && dice != 0, owner) {
            if dice > 0 {
                let amount = self.roll(dice, sides);
                let owner_name = self.monster(owner)?.info.name.clone();
                self.say(format!("It heals {owner_name} {amount} hit points."));
                self.heal(owner, amount)?;
            } else {
                self.write("Yuck! It was poison!", Style::Warning);
                let damage = self.roll(dice.abs(), sides);
                self.injure(owner, damage, true, None)?;
            }
        }

        self.trigger(
            EventName::Use,
            HookArgs::Artifact {
                arg: name.clone(),
                artifact: id,
            },
        )?;

        let artifact = self.artifact_mut(id)?;
        let Some(quantity) = artifact.quantity.as_mut() else {
            return Ok(());
        };
        if *quantity > 0 {
            *quantity -= 1;
        }
        if *quantity <= 0 {
            self.say(format!("The {name} is all gone!"));
            self.destroy_artifact(id)?;
        }
        Ok(())
    }

    // ===== force =====

    /// Hits an artifact with a weapon or a blast.
    ///
    /// Dead bodies are hacked apart. Doors and containers with hardiness
    /// absorb the player's damage roll and smash at zero: containers spill
    /// their contents and vanish, doors (both sides) stay broken open.
    pub fn injure_artifact(&mut self, id: ArtifactId, source: DamageSource) -> GameResult<ArtifactHit> {
        let artifact = self.artifact(id)?;
        let (name, kind) = (artifact.info.name.clone(), artifact.kind);
        match kind {
            ArtifactKind::DeadBody => {
                let verb = match source {
                    DamageSource::Attack => "hack",
                    DamageSource::Blast => "blast",
                };
                self.say(format!("You {verb} it to bits."));
                self.destroy_artifact(id)?;
                Ok(ArtifactHit::Hacked)
            }
            ArtifactKind::Container | ArtifactKind::DoorGate => {
                if artifact.hardiness.is_none() {
                    return Ok(ArtifactHit::Unbreakable);
                }
                let is_container = kind == ArtifactKind::Container;
                let linked = artifact.linked_door_id;
                let damage = self.roll_attack_damage(MonsterId::PLAYER)?;
                self.say(match source {
                    DamageSource::Attack => format!("Wham! You hit the {name}!"),
                    DamageSource::Blast => format!("Zap! You blast the {name}!"),
                });

                let artifact = self.artifact_mut(id)?;
                let hardiness = artifact.hardiness.unwrap_or(0) - damage;
                artifact.hardiness = Some(hardiness);
                if hardiness <= 0 {
                    artifact.flags.insert(ArtifactFlags::BROKEN);
                    self.say(format!("The {name} smashes to pieces!"));
                    if is_container {
                        let room = self.current_room();
                        for item in self.contents(id) {
                            match room {
                                Some(room) => self.move_artifact_to_room(item, room)?,
                                None => self.destroy_artifact(item)?,
                            }
                        }
                        self.destroy_artifact(id)?;
                    } else {
                        self.artifact_mut(id)?.flags.insert(ArtifactFlags::OPEN);
                        if let Some(linked) = linked.filter(|l| self.state.artifacts.get(*l).is_some()) {
                            self.reveal(linked)?;
                            self.artifact_mut(linked)?
                                .flags
                                .insert(ArtifactFlags::OPEN | ArtifactFlags::BROKEN);
                        }
                    }
                }
                Ok(ArtifactHit::Damaged(damage))
            }
            _ => Ok(ArtifactHit::Pointless),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{add_monster, sandbox};
    use crate::state::{Artifact, Effect};

    fn place(game: &mut Game, id: u32, name: &str, kind: ArtifactKind) -> ArtifactId {
        let mut artifact = Artifact::new(ArtifactId(id), name, kind);
        artifact.move_to_room(RoomId(1));
        game.state.artifacts.add(artifact).unwrap()
    }

    #[test]
    fn destroying_twice_is_a_no_op() {
        let mut game = sandbox(&[]);
        let gem = place(&mut game, 1, "gem", ArtifactKind::Treasure);
        game.pick_up(MonsterId::PLAYER, gem).unwrap();
        game.destroy_artifact(gem).unwrap();
        let inventory = game.player().unwrap().inventory.clone();
        game.destroy_artifact(gem).unwrap();
        assert!(game.artifact(gem).unwrap().is_destroyed());
        assert_eq!(game.player().unwrap().inventory, inventory);
        assert!(inventory.is_empty());
    }

    #[test]
    fn opening_a_door_opens_and_reveals_its_other_side() {
        let mut game = sandbox(&[]);
        let front = place(&mut game, 1, "door", ArtifactKind::DoorGate);
        let mut back = Artifact::new(ArtifactId(2), "door", ArtifactKind::DoorGate);
        back.move_to_room(RoomId(2));
        back.flags.insert(ArtifactFlags::HIDDEN);
        game.state.artifacts.add(back).unwrap();
        game.artifact_mut(front).unwrap().linked_door_id = Some(ArtifactId(2));

        game.open_artifact(front).unwrap();
        let back = game.artifact(ArtifactId(2)).unwrap();
        assert!(back.is_open());
        assert!(!back.is_hidden());
        assert_eq!(game.state.statistics.secret_doors_found, 1);

        game.close_artifact(front).unwrap();
        assert!(!game.artifact(ArtifactId(2)).unwrap().is_open());
    }

    #[test]
    fn reveal_shows_description_once() {
        let mut game = sandbox(&[]);
        let statue = place(&mut game, 1, "statue", ArtifactKind::Treasure);
        let artifact = game.artifact_mut(statue).unwrap();
        artifact.info.description = "A marble statue.".to_owned();
        artifact.flags.insert(ArtifactFlags::EMBEDDED);

        game.reveal(statue).unwrap();
        game.reveal(statue).unwrap();
        let count = game
            .state
            .history
            .lines()
            .filter(|line| line.text == "A marble statue.")
            .count();
        assert_eq!(count, 1);
        assert!(game.state.artifacts.is_visible(statue));
    }

    #[test]
    fn last_dose_of_potion_is_consumed() {
        let mut game = sandbox(&[4]);
        let potion = place(&mut game, 1, "potion", ArtifactKind::Drinkable);
        let artifact = game.artifact_mut(potion).unwrap();
        artifact.dice = 1;
        artifact.sides = 6;
        artifact.quantity = Some(1);
        game.pick_up(MonsterId::PLAYER, potion).unwrap();
        game.monster_mut(MonsterId::PLAYER).unwrap().damage = 6;

        game.use_artifact(potion).unwrap();
        assert_eq!(game.player().unwrap().damage, 2);
        assert!(game.state.history.mentions("It heals Hero 4 hit points."));
        assert!(game.state.history.mentions("The potion is all gone!"));
        assert!(game.artifact(potion).unwrap().is_destroyed());
    }

    #[test]
    fn smashed_chest_spills_its_contents() {
        // the queued roll stands in for the player's damage roll
        let mut game = sandbox(&[5]);
        let chest = place(&mut game, 1, "chest", ArtifactKind::Container);
        game.artifact_mut(chest).unwrap().hardiness = Some(5);
        let coin = place(&mut game, 2, "coin", ArtifactKind::Gold);
        game.put_into_container(coin, chest).unwrap();

        let hit = game.injure_artifact(chest, DamageSource::Attack).unwrap();
        assert_eq!(hit, ArtifactHit::Damaged(5));
        assert!(game.artifact(chest).unwrap().is_destroyed());
        assert_eq!(game.artifact(coin).unwrap().room_id(), Some(RoomId(1)));
        assert!(game.state.history.mentions("The chest smashes to pieces!"));
    }

    #[test]
    fn disguised_monster_steps_out() {
        let mut game = sandbox(&[]);
        let mimic = add_monster(&mut game, 3, "mimic", 2);
        game.monster_mut(mimic).unwrap().room_id = None;
        game.state.effects.add(Effect::new(EffectId(1), "The chest grows teeth!")).unwrap();
        let chest = place(&mut game, 1, "chest", ArtifactKind::DisguisedMonster);
        let artifact = game.artifact_mut(chest).unwrap();
        artifact.monster_id = Some(mimic);
        artifact.effect_id = Some(EffectId(1));
        artifact.num_effects = 1;

        game.reveal_disguised_monster(chest).unwrap();
        assert_eq!(game.monster(mimic).unwrap().room_id, Some(RoomId(1)));
        assert!(game.artifact(chest).unwrap().is_destroyed());
        assert!(game.state.history.mentions("The chest grows teeth!"));
        assert!(game.state.effects.get(EffectId(1)).unwrap().seen);
    }

    #[test]
    fn freed_prisoner_stands_where_the_chains_were() {
        let mut game = sandbox(&[]);
        let prisoner = add_monster(&mut game, 4, "prisoner", 1);
        game.monster_mut(prisoner).unwrap().room_id = None;
        let chains = place(&mut game, 1, "chained prisoner", ArtifactKind::BoundMonster);
        let artifact = game.artifact_mut(chains).unwrap();
        artifact.monster_id = Some(prisoner);
        artifact.move_to_room(RoomId(2));
        let gem = place(&mut game, 2, "gem", ArtifactKind::Treasure);

        game.free_bound_monster(gem).unwrap();
        assert!(!game.artifact(gem).unwrap().is_destroyed());

        game.free_bound_monster(chains).unwrap();
        assert_eq!(game.monster(prisoner).unwrap().room_id, Some(RoomId(2)));
        assert!(game.artifact(chains).unwrap().is_destroyed());
    }
}
