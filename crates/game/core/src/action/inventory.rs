//! Getting, dropping, wearing and handing over artifacts.

use super::{ActionTransition, local_artifact, local_monster};
use crate::engine::Game;
use crate::error::{ExecuteError, GameResult};
use crate::hooks::{EventName, HookArgs};
use crate::state::{
    Armament, ArmorSlot, ArtifactId, ArtifactKind, MonsterId, Reaction, Style, pluralize,
};

/// Weight marking artifacts that are part of the scenery.
const IMMOVABLE: i32 = -999;
/// Weights above this are too heavy to even try.
const ABSURD: i32 = 900;
/// Gold that wins over a neutral monster.
const BRIBE: i32 = 5000;

fn carried_by_player(game: &Game, name: &str) -> Option<ArtifactId> {
    game.state.artifacts.find_carried(name, MonsterId::PLAYER)
}

/// Picks up one artifact, or everything with `all`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetAction {
    pub arg: String,
}

impl GetAction {
    fn candidates(&self, game: &Game, all: bool) -> Vec<ArtifactId> {
        let Some(room) = game.current_room() else {
            return Vec::new();
        };
        let lying: Vec<_> = game
            .state
            .artifacts
            .in_room(room)
            .filter(|artifact| !artifact.is_hidden())
            .collect();
        if all {
            return lying.iter().map(|artifact| artifact.id).collect();
        }
        let exact: Vec<ArtifactId> = lying
            .iter()
            .filter(|artifact| artifact.info.matches(&self.arg))
            .map(|artifact| artifact.id)
            .collect();
        if !exact.is_empty() {
            return exact;
        }
        lying
            .iter()
            .find(|artifact| artifact.info.matches_partially(&self.arg))
            .map(|artifact| vec![artifact.id])
            .unwrap_or_default()
    }

    /// Pickup rules for one artifact. Under `get all` the things that can't
    /// be carried are passed over quietly.
    fn take(&self, game: &mut Game, id: ArtifactId, all: bool) -> GameResult<()> {
        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact: id,
        };
        if !game.gate(EventName::BeforeGet, args)? {
            return Ok(());
        }
        let artifact = game.artifact(id)?;
        if artifact.kind == ArtifactKind::DisguisedMonster {
            return game.reveal_disguised_monster(id);
        }
        if artifact.is_embedded() {
            game.reveal(id)?;
        }

        let artifact = game.artifact(id)?;
        if let Some(guard) = artifact.guard_id.filter(|guard| game.is_here(*guard)) {
            if all {
                return Ok(());
            }
            let guard = game.monster(guard)?.info.display_name();
            return Err(ExecuteError::reject(format!("{guard} won't let you!")));
        }
        let (weight, kind, name) = (artifact.weight, artifact.kind, artifact.info.name.clone());
        if all && (weight > ABSURD || weight == IMMOVABLE) {
            return Ok(());
        }
        if weight > ABSURD {
            return Err(ExecuteError::reject("Don't be absurd."));
        }
        if weight == IMMOVABLE {
            return Err(ExecuteError::reject("You can't get that."));
        }
        if kind == ArtifactKind::BoundMonster {
            if all {
                game.say(format!("{name} can't be picked up."));
                return Ok(());
            }
            return Err(ExecuteError::reject("You can't get that."));
        }

        let player = game.player()?;
        if player.weight_carried + weight > game.max_weight(MonsterId::PLAYER)? {
            game.say(format!("{name} is too heavy."));
            return Ok(());
        }
        game.pick_up(MonsterId::PLAYER, id)?;
        let style = if all { Style::NoSpace } else { Style::Normal };
        if kind == ArtifactKind::Gold {
            game.write(format!("{name} is added to your coin pouch."), style);
            let value = game.artifact(id)?.value;
            game.monster_mut(MonsterId::PLAYER)?.gold += value;
            game.destroy_artifact(id)?;
        } else {
            game.write(format!("{name} taken."), style);
        }
        game.trigger(
            EventName::AfterGet,
            HookArgs::Artifact {
                arg: self.arg.clone(),
                artifact: id,
            },
        )?;

        // grab the weapon if the player is fighting bare-handed
        let artifact = game.artifact(id)?;
        let unarmed = !matches!(game.player()?.weapon, Armament::Weapon(_));
        if game.state.turn.in_battle && artifact.kind.is_weapon() && unarmed {
            let hands = artifact.weapon.map_or(1, |weapon| weapon.hands);
            if hands == 1 || game.worn_in_slot(MonsterId::PLAYER, ArmorSlot::Shield).is_none() {
                game.ready(MonsterId::PLAYER, id)?;
                game.say("Readied.");
            }
        }
        Ok(())
    }

    /// The artifact sits in a container rather than on the floor.
    fn take_from_container(&self, game: &mut Game) -> GameResult<bool> {
        let Some(item) = game.state.artifacts.get_by_name(&self.arg) else {
            return Ok(false);
        };
        let item_id = item.id;
        let Some(container) = item.container_id().and_then(|id| game.state.artifacts.get(id)) else {
            return Ok(false);
        };
        let container_name = container.info.name.clone();
        if container.holder() == Some(MonsterId::PLAYER) {
            return Err(ExecuteError::reject(format!(
                "You're already carrying it. But you could REMOVE it from the {container_name}."
            )));
        }
        if container.room_id().is_none()
            || container.room_id() != game.current_room()
            || container.is_embedded()
        {
            return Ok(false);
        }

        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact: item_id,
        };
        if game.gate(EventName::BeforeGet, args)? {
            RemoveAction {
                arg: format!("{} from {container_name}", self.arg),
            }
            .run(game)?;
            game.trigger(
                EventName::AfterGet,
                HookArgs::Artifact {
                    arg: self.arg.clone(),
                    artifact: item_id,
                },
            )?;
        }
        Ok(true)
    }
}

impl ActionTransition for GetAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let all = self.arg.eq_ignore_ascii_case("all");
        let candidates = self.candidates(game, all);
        let matched = !candidates.is_empty();
        for id in candidates {
            if all && game.artifact(id)?.is_embedded() {
                continue;
            }
            // an earlier pickup may have moved it
            if game.artifact(id)?.room_id() != game.current_room() {
                continue;
            }
            self.take(game, id, all)?;
        }
        if matched || all {
            return Ok(());
        }

        if self.take_from_container(game)? {
            return Ok(());
        }
        if local_monster(game, &self.arg).is_some() {
            return Err(ExecuteError::reject("I can't get that."));
        }
        Err(ExecuteError::reject(format!("I see no {} here!", self.arg)))
    }
}

/// Drops one carried artifact, or everything not worn with `all`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropAction {
    pub arg: String,
}

impl ActionTransition for DropAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let all = self.arg.eq_ignore_ascii_case("all");
        let targets: Vec<(ArtifactId, String)> = if all {
            game.state
                .artifacts
                .carried_by(MonsterId::PLAYER)
                .filter(|artifact| !artifact.is_worn())
                .map(|artifact| (artifact.id, artifact.info.name.clone()))
                .collect()
        } else {
            carried_by_player(game, &self.arg)
                .and_then(|id| game.state.artifacts.get(id))
                .map(|artifact| vec![(artifact.id, artifact.info.name.clone())])
                .unwrap_or_default()
        };
        if targets.is_empty() && !all {
            return Err(ExecuteError::reject(format!(
                "You aren't carrying a {}!",
                self.arg
            )));
        }

        for (id, name) in targets {
            let args = HookArgs::Artifact {
                arg: self.arg.clone(),
                artifact: id,
            };
            if game.gate(EventName::Drop, args)? {
                game.drop_artifact(MonsterId::PLAYER, id)?;
                game.write(format!("{name} dropped."), Style::NoSpace);
            }
        }
        Ok(())
    }
}

/// Readies a carried weapon. Readying armor wears it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadyAction {
    pub arg: String,
}

impl ActionTransition for ReadyAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        match carried_by_player(game, &self.arg) {
            Some(_) => Ok(()),
            None => Err(ExecuteError::reject(format!(
                "You aren't carrying a {}!",
                self.arg
            ))),
        }
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let Some(id) = carried_by_player(game, &self.arg) else {
            return Ok(());
        };
        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact: id,
        };
        if !game.gate(EventName::Ready, args)? {
            return Ok(());
        }

        let weapon = game.artifact(id)?;
        if weapon.kind == ArtifactKind::Wearable {
            let arg = weapon.info.name.clone();
            return WearAction { arg }.run(game);
        }
        if !weapon.kind.is_weapon() {
            return Err(ExecuteError::reject("That is not a weapon!"));
        }
        let two_handed = weapon.weapon.is_some_and(|profile| profile.hands == 2);
        if two_handed && game.worn_in_slot(MonsterId::PLAYER, ArmorSlot::Shield).is_some() {
            return Err(ExecuteError::reject(
                "That is a two-handed weapon. Try removing your shield first.",
            ));
        }
        let name = weapon.info.name.clone();
        game.ready(MonsterId::PLAYER, id)?;
        game.say(format!("{name} readied."));
        Ok(())
    }
}

/// Puts on clothing, armor or a shield.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WearAction {
    pub arg: String,
}

impl ActionTransition for WearAction {
    fn pre_validate(&self, game: &Game) -> GameResult<()> {
        let Some(id) = carried_by_player(game, &self.arg) else {
            return Err(ExecuteError::reject(format!(
                "You aren't carrying a {}!",
                self.arg
            )));
        };
        let artifact = game.artifact(id)?;
        if artifact.kind != ArtifactKind::Wearable {
            return Err(ExecuteError::reject("You can't wear that!"));
        }
        if artifact.is_worn() {
            return Err(ExecuteError::reject("You're already wearing it!"));
        }
        let slot = artifact.armor.map(|armor| armor.slot);
        let player = MonsterId::PLAYER;
        if slot == Some(ArmorSlot::Armor) && game.worn_in_slot(player, ArmorSlot::Armor).is_some() {
            return Err(ExecuteError::reject("Try removing your other armor first."));
        }
        if slot == Some(ArmorSlot::Shield) {
            if game.worn_in_slot(player, ArmorSlot::Shield).is_some() {
                return Err(ExecuteError::reject("Try removing your other shield first."));
            }
            let two_handed = game
                .ready_weapon(player)
                .and_then(|weapon| game.state.artifacts.get(weapon))
                .and_then(|weapon| weapon.weapon)
                .is_some_and(|profile| profile.hands == 2);
            if two_handed {
                return Err(ExecuteError::reject(
                    "You are using a two-handed weapon. You can only use a shield with a one-handed weapon.",
                ));
            }
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let Some(id) = carried_by_player(game, &self.arg) else {
            return Ok(());
        };
        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact: id,
        };
        if !game.gate(EventName::Wear, args)? {
            return Ok(());
        }
        game.wear(MonsterId::PLAYER, id)?;
        let name = game.artifact(id)?.info.name.clone();
        game.say(format!("You put on the {name}."));
        Ok(())
    }
}

/// Takes something out of a container (`remove gem from chest`) or takes off
/// a worn artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveAction {
    pub arg: String,
}

impl RemoveAction {
    fn from_container(&self, game: &mut Game, item_name: &str, container_name: &str) -> GameResult<()> {
        let Some(container) = local_artifact(game, container_name) else {
            if let Some(monster) = local_monster(game, container_name) {
                let name = game.monster(monster)?.info.name.clone();
                return Err(ExecuteError::reject(format!(
                    "I can't remove something from {name}!"
                )));
            }
            return Err(ExecuteError::reject(format!(
                "I see no {container_name} here!"
            )));
        };
        let artifact = game.artifact(container)?;
        if artifact.kind != ArtifactKind::Container {
            return Err(ExecuteError::reject(format!(
                "I can't remove things from the {container_name}!"
            )));
        }
        if !artifact.is_open() {
            return Err(ExecuteError::reject(format!(
                "Try opening the {container_name} first."
            )));
        }
        let inside: Vec<_> = game.state.artifacts.contents(container).collect();
        let item = inside
            .iter()
            .find(|artifact| artifact.info.matches(item_name))
            .or_else(|| inside.iter().find(|artifact| artifact.info.matches_partially(item_name)))
            .map(|artifact| artifact.id)
            .ok_or_else(|| {
                ExecuteError::reject(format!(
                    "There is no {item_name} inside the {container_name}!"
                ))
            })?;

        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact: item,
        };
        if !game.gate(EventName::Remove, args)? {
            return Ok(());
        }
        let artifact = game.artifact_mut(item)?;
        if !artifact.info.seen {
            artifact.info.seen = true;
            let description = artifact.info.description.clone();
            game.say(description);
        }
        let artifact = game.artifact(item)?;
        if let Some(guard) = artifact.guard_id.filter(|guard| game.is_here(*guard)) {
            let guard = game.monster(guard)?.info.display_name();
            return Err(ExecuteError::reject(format!("{guard} won't let you!")));
        }

        let (name, kind, value) = (artifact.info.name.clone(), artifact.kind, artifact.value);
        let container_name = game.artifact(container)?.info.name.clone();
        if kind == ArtifactKind::Gold {
            game.say(format!("You add the {name} to your coin pouch."));
            game.monster_mut(MonsterId::PLAYER)?.gold += value;
            game.destroy_artifact(item)?;
        } else {
            game.say(format!("{name} removed from {container_name}."));
            game.remove_from_container(item)?;
        }
        Ok(())
    }

    fn take_off(&self, game: &mut Game) -> GameResult<()> {
        let worn = game
            .state
            .artifacts
            .carried_by(MonsterId::PLAYER)
            .find(|artifact| artifact.is_worn() && artifact.info.matches(&self.arg))
            .map(|artifact| artifact.id);
        let Some(id) = worn.or_else(|| carried_by_player(game, &self.arg)) else {
            return Err(ExecuteError::reject(format!(
                "You aren't carrying a {}!",
                self.arg
            )));
        };
        let artifact = game.artifact(id)?;
        if !artifact.is_worn() {
            return Err(ExecuteError::reject("You aren't wearing it!"));
        }
        let name = artifact.info.name.clone();
        let args = HookArgs::Artifact {
            arg: self.arg.clone(),
            artifact: id,
        };
        if game.gate(EventName::Remove, args)? {
            game.remove(MonsterId::PLAYER, id)?;
            game.say(format!("You take off the {name}."));
        }
        Ok(())
    }
}

impl ActionTransition for RemoveAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        match self.arg.rsplit_once(" from ") {
            Some((item, container)) => self.from_container(game, item.trim(), container.trim()),
            None => self.take_off(game),
        }
    }
}

/// Hands an artifact or gold to a monster: `give sword to eddie`,
/// `give 100 to eddie`, `give 100 gold pieces to eddie`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiveAction {
    pub arg: String,
}

impl GiveAction {
    /// Amount when the item names money, whether or not it is a whole number.
    fn money(item: &str, money_name: &str) -> Option<f64> {
        let parse = |text: &str| text.replace(',', "").parse::<f64>().ok();
        if let Some(amount) = parse(item) {
            return Some(amount);
        }
        let (amount, unit) = item.split_once(' ')?;
        let unit = unit.trim().to_lowercase();
        let money = money_name.to_lowercase();
        if unit == "gold" || unit == money || unit == pluralize(&money) {
            parse(amount)
        } else {
            None
        }
    }

    fn give_gold(&self, game: &mut Game, amount: f64, recipient: MonsterId) -> GameResult<()> {
        let gold = game.player()?.gold;
        if amount > f64::from(gold) {
            let money = game.config.money_name.clone();
            return Err(ExecuteError::reject(format!("You only have {gold} {money}!")));
        }
        if amount <= 0.0 || amount.fract() != 0.0 {
            return Err(ExecuteError::reject("You're not making any sense."));
        }
        let amount = amount as i32;
        let args = HookArgs::Gold {
            arg: self.arg.clone(),
            amount,
            recipient,
        };
        if !game.gate(EventName::GiveGold, args)? {
            return Ok(());
        }
        game.monster_mut(MonsterId::PLAYER)?.gold -= amount;
        let monster = game.monster(recipient)?;
        let (name, reaction) = (monster.info.name.clone(), monster.reaction);
        game.say(format!("{name} takes the money..."));
        if reaction == Reaction::Neutral && amount >= BRIBE {
            game.say(format!("{name} agrees to join your cause."));
            game.set_reaction(recipient, Reaction::Friend)?;
        }
        Ok(())
    }

    fn give_item(&self, game: &mut Game, item_name: &str, recipient: MonsterId) -> GameResult<()> {
        let item = carried_by_player(game, item_name)
            .ok_or_else(|| ExecuteError::reject("You're not carrying it!"))?;
        let args = HookArgs::Give {
            arg: self.arg.clone(),
            artifact: item,
            recipient,
        };
        if !game.gate(EventName::Give, args)? {
            return Ok(());
        }

        let artifact = game.artifact(item)?;
        let (name, kind, worn) = (artifact.info.name.clone(), artifact.kind, artifact.is_worn());
        let healing = matches!(kind, ArtifactKind::Edible | ArtifactKind::Drinkable) && artifact.dice > 0;
        let taker = game.monster(recipient)?.info.name.clone();
        if worn {
            game.remove(MonsterId::PLAYER, item)?;
        }
        if healing {
            let verb = if kind == ArtifactKind::Edible { "eats" } else { "drinks" };
            game.say(format!("{taker} {verb} the {name} and hands it back."));
            game.artifact_mut(item)?.move_to_inventory(recipient);
            game.use_artifact(item)?;
            if !game.artifact(item)?.is_destroyed() {
                game.artifact_mut(item)?.move_to_inventory(MonsterId::PLAYER);
            }
            game.update_inventory(MonsterId::PLAYER)?;
        } else {
            game.pick_up(recipient, item)?;
            game.say(format!("{taker} takes the {name}."));
        }

        let empty_handed = matches!(
            game.monster(recipient)?.weapon,
            Armament::Unarmed | Armament::Seeking(_)
        );
        if kind.is_weapon() && empty_handed {
            game.say(format!("{taker} readies the {name}."));
            game.ready(recipient, item)?;
        }
        game.trigger(
            EventName::AfterGive,
            HookArgs::Give {
                arg: self.arg.clone(),
                artifact: item,
                recipient,
            },
        )?;
        Ok(())
    }
}

impl ActionTransition for GiveAction {
    fn apply(&self, game: &mut Game) -> GameResult<()> {
        let Some((item, monster)) = self.arg.rsplit_once(" to ") else {
            return Err(ExecuteError::reject("Try giving (something) to (someone)."));
        };
        let (item, monster) = (item.trim(), monster.trim());
        let Some(recipient) = local_monster(game, monster) else {
            return Err(ExecuteError::reject(format!("{monster} is not here!")));
        };
        match Self::money(item, &game.config.money_name) {
            Some(amount) => self.give_gold(game, amount, recipient),
            None => self.give_item(game, item, recipient),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TurnOutcome;
    use crate::engine::fixtures::{add_monster, give_weapon, sandbox};
    use crate::state::{ArmorProfile, Artifact, RoomId, WeaponProfile, WeaponType};

    fn place(game: &mut Game, id: u32, name: &str, kind: ArtifactKind, weight: i32) -> ArtifactId {
        let mut artifact = Artifact::new(ArtifactId(id), name, kind);
        artifact.weight = weight;
        artifact.move_to_room(RoomId(1));
        game.state.artifacts.add(artifact).unwrap()
    }

    fn rejection(outcome: TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Rejected(err) => err.message,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn gold_goes_into_the_purse() {
        let mut game = sandbox(&[]);
        let coins = place(&mut game, 1, "gold coins", ArtifactKind::Gold, 1);
        game.artifact_mut(coins).unwrap().value = 40;
        game.run_command("get", "gold coins").unwrap();
        assert_eq!(game.player().unwrap().gold, 40);
        assert!(game.artifact(coins).unwrap().is_destroyed());
        assert!(game.state.history.mentions("gold coins is added to your coin pouch."));
    }

    #[test]
    fn get_all_skips_scenery_and_takes_the_rest() {
        let mut game = sandbox(&[]);
        let gem = place(&mut game, 1, "gem", ArtifactKind::Treasure, 1);
        let statue = place(&mut game, 2, "statue", ArtifactKind::Treasure, 950);
        let rope = place(&mut game, 3, "rope", ArtifactKind::Treasure, 5);
        game.run_command("get", "all").unwrap();
        assert_eq!(game.artifact(gem).unwrap().holder(), Some(MonsterId::PLAYER));
        assert_eq!(game.artifact(rope).unwrap().holder(), Some(MonsterId::PLAYER));
        assert_eq!(game.artifact(statue).unwrap().room_id(), Some(RoomId(1)));
    }

    #[test]
    fn ungettable_things_are_refused() {
        let mut game = sandbox(&[]);
        place(&mut game, 1, "statue", ArtifactKind::Treasure, 950);
        place(&mut game, 2, "fountain", ArtifactKind::Treasure, IMMOVABLE);
        let absurd = game.run_command("get", "statue").unwrap();
        assert_eq!(rejection(absurd), "Don't be absurd.");
        let fixed = game.run_command("get", "fountain").unwrap();
        assert_eq!(rejection(fixed), "You can't get that.");
        let missing = game.run_command("get", "grail").unwrap();
        assert_eq!(rejection(missing), "I see no grail here!");
    }

    #[test]
    fn weight_limit_leaves_heavy_things_behind() {
        let mut game = sandbox(&[]);
        // hardiness 20 carries up to 200
        let anvil = place(&mut game, 1, "anvil", ArtifactKind::Treasure, 201);
        game.run_command("get", "anvil").unwrap();
        assert!(game.state.history.mentions("anvil is too heavy."));
        assert_eq!(game.artifact(anvil).unwrap().room_id(), Some(RoomId(1)));
    }

    #[test]
    fn guard_keeps_the_treasure() {
        let mut game = sandbox(&[]);
        let dragon = add_monster(&mut game, 1, "dragon", 1);
        game.monster_mut(dragon).unwrap().reaction = Reaction::Neutral;
        let hoard = place(&mut game, 1, "hoard", ArtifactKind::Treasure, 10);
        game.artifact_mut(hoard).unwrap().guard_id = Some(dragon);
        game.refresh_visible().unwrap();
        let outcome = game.run_command("get", "hoard").unwrap();
        assert_eq!(rejection(outcome), "dragon won't let you!");
    }

    #[test]
    fn drop_all_keeps_worn_armor() {
        let mut game = sandbox(&[]);
        let gem = place(&mut game, 1, "gem", ArtifactKind::Treasure, 1);
        let mail = place(&mut game, 2, "chain mail", ArtifactKind::Wearable, 10);
        game.pick_up(MonsterId::PLAYER, gem).unwrap();
        game.pick_up(MonsterId::PLAYER, mail).unwrap();
        game.wear(MonsterId::PLAYER, mail).unwrap();

        game.run_command("drop", "all").unwrap();
        assert_eq!(game.artifact(gem).unwrap().room_id(), Some(RoomId(1)));
        assert!(game.artifact(mail).unwrap().is_worn());
        assert!(game.state.history.mentions("gem dropped."));
    }

    #[test]
    fn second_suit_of_armor_is_refused() {
        let mut game = sandbox(&[]);
        for (id, name) in [(1, "chain mail"), (2, "plate mail")] {
            let suit = place(&mut game, id, name, ArtifactKind::Wearable, 10);
            game.artifact_mut(suit).unwrap().armor = Some(ArmorProfile {
                slot: ArmorSlot::Armor,
                class: 2,
                penalty: 10,
            });
            game.pick_up(MonsterId::PLAYER, suit).unwrap();
        }
        game.run_command("wear", "chain mail").unwrap();
        assert!(game.state.history.mentions("You put on the chain mail."));
        assert_eq!(game.player().unwrap().armor_class, 2);
        let outcome = game.run_command("wear", "plate mail").unwrap();
        assert_eq!(rejection(outcome), "Try removing your other armor first.");

        game.run_command("remove", "chain mail").unwrap();
        assert!(game.state.history.mentions("You take off the chain mail."));
        assert_eq!(game.player().unwrap().armor_class, 0);
    }

    #[test]
    fn two_handed_weapon_and_shield_do_not_mix() {
        let mut game = sandbox(&[]);
        let shield = place(&mut game, 1, "shield", ArtifactKind::Wearable, 5);
        game.artifact_mut(shield).unwrap().armor = Some(ArmorProfile {
            slot: ArmorSlot::Shield,
            class: 1,
            penalty: 5,
        });
        game.pick_up(MonsterId::PLAYER, shield).unwrap();
        game.wear(MonsterId::PLAYER, shield).unwrap();
        let axe = place(&mut game, 2, "great axe", ArtifactKind::Weapon, 10);
        game.artifact_mut(axe).unwrap().weapon = Some(WeaponProfile {
            weapon_type: WeaponType::Axe,
            odds: 0,
            hands: 2,
        });
        game.pick_up(MonsterId::PLAYER, axe).unwrap();

        let outcome = game.run_command("ready", "great axe").unwrap();
        assert_eq!(
            rejection(outcome),
            "That is a two-handed weapon. Try removing your shield first."
        );
        let outcome = game.run_command("ready", "shield").unwrap();
        assert_eq!(rejection(outcome), "You're already wearing it!");
    }

    #[test]
    fn items_come_out_of_open_containers() {
        let mut game = sandbox(&[]);
        let chest = place(&mut game, 1, "chest", ArtifactKind::Container, 50);
        let ring = place(&mut game, 2, "ring", ArtifactKind::Treasure, 1);
        game.put_into_container(ring, chest).unwrap();

        let closed = game.run_command("remove", "ring from chest").unwrap();
        assert_eq!(rejection(closed), "Try opening the chest first.");

        game.open_artifact(chest).unwrap();
        game.run_command("get", "ring").unwrap();
        assert!(game.state.history.mentions("ring removed from chest."));
        assert_eq!(game.artifact(ring).unwrap().holder(), Some(MonsterId::PLAYER));
    }

    #[test]
    fn a_weapon_gift_is_readied() {
        let mut game = sandbox(&[]);
        let eddie = add_monster(&mut game, 1, "eddie", 1);
        game.monster_mut(eddie).unwrap().weapon = Armament::Unarmed;
        game.monster_mut(eddie).unwrap().reaction = Reaction::Friend;
        let sword = give_weapon(&mut game, 1, MonsterId::PLAYER, ArtifactKind::Weapon);

        game.run_command("give", "sword to eddie").unwrap();
        assert_eq!(game.artifact(sword).unwrap().holder(), Some(eddie));
        assert_eq!(game.monster(eddie).unwrap().weapon, Armament::Weapon(sword));
        assert_eq!(game.player().unwrap().weapon, Armament::Unarmed);
        assert!(game.state.history.mentions("eddie readies the sword."));
    }

    #[test]
    fn a_big_bribe_wins_over_a_neutral() {
        let mut game = sandbox(&[]);
        let merchant = add_monster(&mut game, 1, "merchant", 1);
        game.monster_mut(merchant).unwrap().reaction = Reaction::Neutral;
        game.monster_mut(MonsterId::PLAYER).unwrap().gold = 6000;

        let broke = game.run_command("give", "7000 to merchant").unwrap();
        assert_eq!(rejection(broke), "You only have 6000 gold pieces!");
        let nonsense = game.run_command("give", "2.5 gold to merchant").unwrap();
        assert_eq!(rejection(nonsense), "You're not making any sense.");

        game.run_command("give", "5,000 gold pieces to merchant").unwrap();
        assert_eq!(game.player().unwrap().gold, 1000);
        assert_eq!(game.monster(merchant).unwrap().reaction, Reaction::Friend);
        assert!(game.state.history.mentions("merchant agrees to join your cause."));
    }
}
