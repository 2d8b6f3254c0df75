//! Small hand-built games for unit tests.

use super::Game;
use crate::config::GameConfig;
use crate::env::FixedRng;
use crate::hooks::Adventure;
use crate::state::{
    Armament, Artifact, ArtifactId, ArtifactKind, Exit, GameState, Monster, MonsterId,
    PlayerProfile, Room, RoomId, WeaponAbilities, WeaponProfile, WeaponType,
};

/// Two rooms joined north/south, with the player standing in room 1.
pub(crate) fn sandbox(rolls: &[i32]) -> Game {
    sandbox_with(Adventure::new("sandbox"), rolls)
}

pub(crate) fn sandbox_with(adventure: Adventure, rolls: &[i32]) -> Game {
    let mut state = GameState::new();
    let mut hall = Room::new(RoomId(1), "Hall");
    hall.add_exit(Exit::to_room("n", RoomId(2)));
    let mut yard = Room::new(RoomId(2), "Yard");
    yard.add_exit(Exit::to_room("s", RoomId(1)));
    state.rooms.add(hall).unwrap();
    state.rooms.add(yard).unwrap();

    let mut player = Monster::new(MonsterId::PLAYER, "Hero");
    player.room_id = Some(RoomId(1));
    player.hardiness = 20;
    player.weapon = Armament::Unarmed;
    player.player = Some(Box::new(PlayerProfile {
        weapon_abilities: WeaponAbilities::new(5, -10, 20, 10, 0),
        ..PlayerProfile::default()
    }));
    state.monsters.add(player).unwrap();
    state.rooms.set_current(Some(RoomId(1)));

    Game::from_state(
        state,
        adventure,
        GameConfig::default(),
        Box::new(FixedRng::new(rolls.iter().copied())),
    )
}

pub(crate) fn add_monster(game: &mut Game, id: u32, name: &str, room: u32) -> MonsterId {
    let mut monster = Monster::new(MonsterId(id), name);
    monster.room_id = Some(RoomId(room));
    monster.weapon = Armament::Natural;
    monster.natural_dice = 1;
    monster.natural_sides = 4;
    game.state.monsters.add(monster).unwrap()
}

pub(crate) fn give_weapon(game: &mut Game, id: u32, holder: MonsterId, kind: ArtifactKind) -> ArtifactId {
    let mut weapon = Artifact::new(ArtifactId(id), "sword", kind);
    weapon.dice = 1;
    weapon.sides = 8;
    weapon.weapon = Some(WeaponProfile {
        weapon_type: WeaponType::Sword,
        odds: 10,
        hands: 1,
    });
    weapon.move_to_inventory(holder);
    let id = game.state.artifacts.add(weapon).unwrap();
    game.monster_mut(holder).unwrap().weapon = Armament::Weapon(id);
    game.refresh_inventory(holder).unwrap();
    id
}
