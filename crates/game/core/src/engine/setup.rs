//! Building a game from adventure records.

use tracing::debug;

use super::{FollowMode, Game};
use crate::config::GameConfig;
use crate::env::{AdventureData, MonsterRecord, RandomSource};
use crate::error::{GameResult, InvariantError};
use crate::hooks::{Adventure, EventName, HookArgs};
use crate::state::{
    Armament, ArtifactId, EffectId, GameState, GroupMonster, MonsterId, RoomId, pluralize,
};

impl Game {
    /// Loads every record, unpacks group monsters and derives inventories.
    ///
    /// Records without an id get one past the highest id loaded so far; a
    /// duplicate id is fatal.
    pub fn new(
        data: AdventureData,
        adventure: Adventure,
        config: GameConfig,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, InvariantError> {
        let mut state = GameState::new();

        for record in data.rooms {
            let id = record.id.map(RoomId).unwrap_or_else(|| state.rooms.next_id());
            state.rooms.add(record.into_room(id))?;
        }
        for record in data.effects {
            let id = record
                .id
                .map(EffectId)
                .unwrap_or_else(|| state.effects.next_id());
            state.effects.add(record.into_effect(id))?;
        }
        for record in data.artifacts {
            let id = record
                .id
                .map(ArtifactId)
                .unwrap_or_else(|| state.artifacts.next_id());
            state.artifacts.add(record.into_artifact(id)?)?;
        }

        state.monsters.add(data.player.to_monster())?;
        for record in &data.monsters {
            let id = record
                .id
                .map(MonsterId)
                .unwrap_or_else(|| state.monsters.next_id());
            if record.count > 1 {
                let group = unpack_group(&mut state, record, id);
                state.monsters.add_group(group)?;
            } else {
                state.monsters.add(record.to_monster(id))?;
            }
        }

        debug!(
            target: "core::repo",
            rooms = state.rooms.len(),
            artifacts = state.artifacts.len(),
            monsters = state.monsters.ids().len(),
            effects = state.effects.len(),
            "adventure data loaded"
        );

        let mut game = Self::from_state(state, adventure, config, rng);
        let holders: Vec<MonsterId> = game.state.monsters.all().map(|m| m.id).collect();
        for id in holders {
            game.refresh_inventory(id)?;
        }
        Ok(game)
    }

    /// Places the player in the starting room, fires `start` and runs the
    /// first turn.
    pub fn start(&mut self) -> GameResult<()> {
        self.state.history.push("");
        let start = RoomId(self.config.starting_room);
        self.room(start)?;
        self.move_player(start, FollowMode::Alone)?;
        self.trigger(EventName::Start, HookArgs::None)?;
        self.tick()
    }
}

/// Builds a group from a record with `count > 1`.
///
/// Members with a positive weapon id use consecutive weapon artifacts
/// (`weapon_id`, `weapon_id + 1`, ...); weapons the group carries are handed to
/// the member that readies them, or to the first member.
fn unpack_group(state: &mut GameState, record: &MonsterRecord, id: MonsterId) -> GroupMonster {
    let base = record.to_monster(id);
    let plural = record
        .name_plural
        .clone()
        .unwrap_or_else(|| pluralize(&record.name));
    let mut group = GroupMonster::new(base, plural);
    for index in 0..record.count {
        let member = group.spawn_member(record.room_id.map(RoomId));
        if let Some(Armament::Weapon(first)) = group.member(member).map(|m| m.weapon) {
            let wanted = ArtifactId(first.0 + index);
            let usable = state
                .artifacts
                .get(wanted)
                .is_some_and(|artifact| artifact.kind.is_weapon());
            if let Some(member) = group.member_mut(member) {
                member.weapon = if usable {
                    Armament::Weapon(wanted)
                } else {
                    Armament::Natural
                };
            }
        }
    }

    let carried: Vec<ArtifactId> = state.artifacts.carried_by(id).map(|a| a.id).collect();
    for artifact in carried {
        let owner = group
            .members()
            .iter()
            .find(|member| member.weapon.weapon_id() == Some(artifact))
            .or_else(|| group.members().first())
            .map(|member| member.id);
        if let (Some(owner), Some(artifact)) = (owner, state.artifacts.get_mut(artifact)) {
            artifact.move_to_inventory(owner);
        }
    }
    group.base.weapon = Armament::Natural;
    group.update_virtual_room(None);
    group
}
