use tracing::trace;

use crate::error::InvariantError;
use crate::state::{GroupMonster, Monster, MonsterEntry, MonsterId, RoomId};

/// The player, single monsters and group monsters, in insertion order.
///
/// Group members are reachable by id through [`MonsterRepository::get`] but
/// are never listed at the top level.
#[derive(Clone, Debug, Default)]
pub struct MonsterRepository {
    entries: Vec<MonsterEntry>,
    visible: Vec<MonsterId>,
}

impl MonsterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id an unnumbered record gets when appended next (the player is 0).
    pub fn next_id(&self) -> MonsterId {
        MonsterId(self.entries.iter().map(|entry| entry.id().0).max().unwrap_or(0) + 1)
    }

    fn check_new_id(&self, id: MonsterId) -> Result<(), InvariantError> {
        if id.0 > MonsterId::MAX_TOP_LEVEL {
            return Err(InvariantError::MonsterIdOutOfRange(id));
        }
        if self.entry(id).is_some() {
            return Err(InvariantError::DuplicateMonster(id));
        }
        Ok(())
    }

    pub fn add(&mut self, monster: Monster) -> Result<MonsterId, InvariantError> {
        self.check_new_id(monster.id)?;
        let id = monster.id;
        trace!(target: "core::repo", monster = %id, name = %monster.info.name, "monster added");
        self.entries.push(MonsterEntry::Single(monster));
        Ok(id)
    }

    pub fn add_group(&mut self, group: GroupMonster) -> Result<MonsterId, InvariantError> {
        self.check_new_id(group.id())?;
        let id = group.id();
        trace!(
            target: "core::repo",
            monster = %id,
            members = group.members().len(),
            "group monster added"
        );
        self.entries.push(MonsterEntry::Group(group));
        Ok(id)
    }

    /// Top-level slot with this id.
    pub fn entry(&self, id: MonsterId) -> Option<&MonsterEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn entry_mut(&mut self, id: MonsterId) -> Option<&mut MonsterEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    pub fn entries(&self) -> &[MonsterEntry] {
        &self.entries
    }

    pub fn group(&self, id: MonsterId) -> Option<&GroupMonster> {
        self.entry(id).and_then(MonsterEntry::as_group)
    }

    pub fn group_mut(&mut self, id: MonsterId) -> Option<&mut GroupMonster> {
        self.entry_mut(id).and_then(MonsterEntry::as_group_mut)
    }

    pub fn is_group(&self, id: MonsterId) -> bool {
        self.group(id).is_some()
    }

    /// Top-level monster, group template or group member with this id.
    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        match id.group() {
            Some(group) => self.group(group).and_then(|group| group.member(id)),
            None => self.entry(id).map(MonsterEntry::base),
        }
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        match id.group() {
            Some(group) => self.group_mut(group).and_then(|group| group.member_mut(id)),
            None => self.entry_mut(id).map(MonsterEntry::base_mut),
        }
    }

    pub fn require(&self, id: MonsterId) -> Result<&Monster, InvariantError> {
        self.get(id).ok_or(InvariantError::UnknownMonster(id))
    }

    pub fn require_mut(&mut self, id: MonsterId) -> Result<&mut Monster, InvariantError> {
        self.get_mut(id).ok_or(InvariantError::UnknownMonster(id))
    }

    pub fn player(&self) -> Result<&Monster, InvariantError> {
        self.get(MonsterId::PLAYER).ok_or(InvariantError::MissingPlayer)
    }

    pub fn player_mut(&mut self) -> Result<&mut Monster, InvariantError> {
        self.get_mut(MonsterId::PLAYER)
            .ok_or(InvariantError::MissingPlayer)
    }

    /// Ids of top-level monsters, player included.
    pub fn ids(&self) -> Vec<MonsterId> {
        self.entries.iter().map(MonsterEntry::id).collect()
    }

    /// Every monster that can hold artifacts: top-level ones and group members.
    pub fn all(&self) -> impl Iterator<Item = &Monster> {
        self.entries.iter().flat_map(|entry| {
            let members = entry.as_group().map(GroupMonster::members).unwrap_or(&[]);
            std::iter::once(entry.base()).chain(members.iter())
        })
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut Monster> {
        self.entries.iter_mut().flat_map(|entry| {
            let (base, members): (&mut Monster, &mut [Monster]) = match entry {
                MonsterEntry::Single(monster) => (monster, &mut []),
                MonsterEntry::Group(group) => group.parts_mut(),
            };
            std::iter::once(base).chain(members.iter_mut())
        })
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Monster> {
        self.entries
            .iter()
            .map(MonsterEntry::base)
            .find(|monster| monster.info.matches(name))
    }

    /// Top-level living non-player monster called `name` standing in `room`.
    pub fn find_local(&self, name: &str, room: Option<RoomId>) -> Option<MonsterId> {
        let room = room?;
        let local: Vec<&Monster> = self
            .entries
            .iter()
            .map(MonsterEntry::base)
            .filter(|monster| {
                !monster.is_player() && monster.is_alive() && monster.room_id == Some(room)
            })
            .collect();
        let plural_match = |monster: &&&Monster| {
            self.group(monster.id)
                .is_some_and(|group| group.name_plural.eq_ignore_ascii_case(name.trim()))
        };
        local
            .iter()
            .find(|monster| monster.info.matches(name))
            .or_else(|| local.iter().find(plural_match))
            .or_else(|| local.iter().find(|monster| monster.info.matches_partially(name)))
            .map(|monster| monster.id)
    }

    /// Living members of group `id` standing in `room`.
    pub fn present_members(&self, id: MonsterId, room: Option<RoomId>) -> Vec<MonsterId> {
        match (self.group(id), room) {
            (Some(group), Some(room)) => group.present_in(room).map(|member| member.id).collect(),
            _ => Vec::new(),
        }
    }

    /// Points every group template at the room its members occupy.
    pub fn update_virtual_rooms(&mut self, current: Option<RoomId>) {
        for entry in &mut self.entries {
            if let MonsterEntry::Group(group) = entry {
                group.update_virtual_room(current);
            }
        }
    }

    /// Top-level living non-player monsters standing in `room`.
    pub fn in_room(&self, room: Option<RoomId>) -> Vec<MonsterId> {
        let Some(room) = room else {
            return Vec::new();
        };
        self.entries
            .iter()
            .map(MonsterEntry::base)
            .filter(|monster| {
                !monster.is_player() && monster.is_alive() && monster.room_id == Some(room)
            })
            .map(|monster| monster.id)
            .collect()
    }

    pub(crate) fn set_visible(&mut self, visible: Vec<MonsterId>) {
        self.visible = visible;
    }

    pub fn visible(&self) -> &[MonsterId] {
        &self.visible
    }

    pub fn is_visible(&self, id: MonsterId) -> bool {
        self.visible.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> MonsterRepository {
        let mut monsters = MonsterRepository::new();
        let mut player = Monster::new(MonsterId::PLAYER, "Hero");
        player.room_id = Some(RoomId(1));
        monsters.add(player).unwrap();
        let mut orc = Monster::new(MonsterId(1), "orc");
        orc.room_id = Some(RoomId(1));
        monsters.add(orc).unwrap();
        let mut group = GroupMonster::new(Monster::new(MonsterId(2), "kobold"), "kobolds");
        group.spawn_member(Some(RoomId(1)));
        group.spawn_member(Some(RoomId(3)));
        group.update_virtual_room(Some(RoomId(1)));
        monsters.add_group(group).unwrap();
        monsters
    }

    #[test]
    fn members_resolve_through_their_group() {
        let monsters = repo();
        let member = monsters.get(MonsterId(2).member(2)).unwrap();
        assert_eq!(member.room_id, Some(RoomId(3)));
        assert_eq!(member.parent, Some(MonsterId(2)));
        assert!(monsters.get(MonsterId(2).member(9)).is_none());
        assert_eq!(monsters.all().count(), 5);
        assert_eq!(monsters.ids().len(), 3);
    }

    #[test]
    fn local_lookup_matches_group_plural() {
        let monsters = repo();
        let here = Some(RoomId(1));
        assert_eq!(monsters.find_local("kobolds", here), Some(MonsterId(2)));
        assert_eq!(monsters.find_local("ORC", here), Some(MonsterId(1)));
        assert_eq!(monsters.find_local("hero", here), None);
        assert_eq!(monsters.present_members(MonsterId(2), here).len(), 1);
    }

    #[test]
    fn rejects_duplicate_and_oversized_ids() {
        let mut monsters = repo();
        assert_eq!(
            monsters.add(Monster::new(MonsterId(1), "copy")),
            Err(InvariantError::DuplicateMonster(MonsterId(1)))
        );
        assert_eq!(
            monsters.add(Monster::new(MonsterId(20_001), "member")),
            Err(InvariantError::MonsterIdOutOfRange(MonsterId(20_001)))
        );
    }
}
