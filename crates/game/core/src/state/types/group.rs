//! Group monsters: one logical monster standing for several identical members.
//!
//! The group keeps a template monster (its own id, stats and name) and owns
//! the member monsters. Members carry an integer back-reference to the group
//! through [`Monster::parent`]; the group never hands out references to itself
//! from a member.

use super::{Monster, MonsterId, MonsterStatus, Reaction, RoomId};

/// Top-level monster slot: a single monster or a group.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterEntry {
    Single(Monster),
    Group(GroupMonster),
}

impl MonsterEntry {
    pub fn id(&self) -> MonsterId {
        self.base().id
    }

    /// The single monster, or the group's template.
    pub fn base(&self) -> &Monster {
        match self {
            Self::Single(monster) => monster,
            Self::Group(group) => &group.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut Monster {
        match self {
            Self::Single(monster) => monster,
            Self::Group(group) => &mut group.base,
        }
    }

    pub fn as_group(&self) -> Option<&GroupMonster> {
        match self {
            Self::Group(group) => Some(group),
            Self::Single(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupMonster> {
        match self {
            Self::Group(group) => Some(group),
            Self::Single(_) => None,
        }
    }
}

/// Aggregate of identical members sharing a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupMonster {
    pub base: Monster,
    /// Plural display name ("kobolds").
    pub name_plural: String,
    pub original_size: u32,
    members: Vec<Monster>,
    next_index: u32,
}

impl GroupMonster {
    pub fn new(base: Monster, name_plural: impl Into<String>) -> Self {
        Self {
            base,
            name_plural: name_plural.into(),
            original_size: 0,
            members: Vec::new(),
            next_index: 1,
        }
    }

    pub fn id(&self) -> MonsterId {
        self.base.id
    }

    pub fn members(&self) -> &[Monster] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Monster] {
        &mut self.members
    }

    /// Template and members, borrowed together.
    pub fn parts_mut(&mut self) -> (&mut Monster, &mut [Monster]) {
        (&mut self.base, &mut self.members)
    }

    pub fn member(&self, id: MonsterId) -> Option<&Monster> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn member_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.members.iter_mut().find(|member| member.id == id)
    }

    /// Living members.
    pub fn living(&self) -> impl Iterator<Item = &Monster> {
        self.members.iter().filter(|member| member.is_alive())
    }

    /// Living members standing in `room`.
    pub fn present_in(&self, room: RoomId) -> impl Iterator<Item = &Monster> {
        self.living()
            .filter(move |member| member.room_id == Some(room))
    }

    /// Adds a member cloned from the template. Returns the new member id.
    pub fn spawn_member(&mut self, room: Option<RoomId>) -> MonsterId {
        let id = self.base.id.member(self.next_index);
        self.next_index += 1;
        let mut member = self.base.clone();
        member.id = id;
        member.parent = Some(self.base.id);
        member.room_id = room;
        member.status = MonsterStatus::Alive;
        member.damage = 0;
        member.inventory.clear();
        member.dead_body_id = None;
        self.members.push(member);
        self.original_size = self.original_size.max(self.members.len() as u32);
        id
    }

    /// Removes `count` living members, newest first. Returns the removed ids.
    pub fn remove_members(&mut self, count: usize) -> Vec<MonsterId> {
        let mut removed = Vec::new();
        while removed.len() < count {
            let Some(position) = self.members.iter().rposition(|member| member.is_alive()) else {
                break;
            };
            removed.push(self.members.remove(position).id);
        }
        removed
    }

    /// Points the template's room at where the members are.
    ///
    /// With members in `current`, the group is there; otherwise it follows
    /// the first living member, or nowhere when none survive.
    pub fn update_virtual_room(&mut self, current: Option<RoomId>) {
        let here = current.filter(|room| self.present_in(*room).next().is_some());
        let room = here.or_else(|| self.living().find_map(|member| member.room_id));
        self.base.room_id = room;
        self.base.status = if self.living().next().is_some() {
            MonsterStatus::Alive
        } else {
            MonsterStatus::Dead
        };
    }

    /// Shares a settled reaction with every member.
    pub fn set_reaction(&mut self, reaction: Reaction) {
        self.base.reaction = reaction;
        for member in &mut self.members {
            member.reaction = reaction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kobolds(count: usize) -> GroupMonster {
        let mut group = GroupMonster::new(Monster::new(MonsterId(7), "kobold"), "kobolds");
        for _ in 0..count {
            group.spawn_member(Some(RoomId(1)));
        }
        group
    }

    #[test]
    fn spawned_members_point_back_to_group() {
        let group = kobolds(3);
        let ids: Vec<_> = group.members().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MonsterId(70_001), MonsterId(70_002), MonsterId(70_003)]);
        assert!(group.members().iter().all(|m| m.parent == Some(MonsterId(7))));
        assert_eq!(group.original_size, 3);
    }

    #[test]
    fn virtual_room_follows_surviving_members() {
        let mut group = kobolds(2);
        group.members_mut()[0].room_id = Some(RoomId(4));
        group.members_mut()[1].status = MonsterStatus::Dead;
        group.update_virtual_room(Some(RoomId(1)));
        assert_eq!(group.base.room_id, Some(RoomId(4)));

        group.members_mut()[0].status = MonsterStatus::Dead;
        group.update_virtual_room(Some(RoomId(1)));
        assert_eq!(group.base.room_id, None);
        assert!(!group.base.is_alive());
    }

    #[test]
    fn removing_members_skips_the_dead() {
        let mut group = kobolds(3);
        group.members_mut()[2].status = MonsterStatus::Dead;
        let removed = group.remove_members(1);
        assert_eq!(removed, vec![MonsterId(70_002)]);
        assert_eq!(group.members().len(), 2);
    }

    #[test]
    fn reaction_is_shared() {
        let mut group = kobolds(2);
        group.set_reaction(Reaction::Hostile);
        assert!(group.members().iter().all(|m| m.reaction == Reaction::Hostile));
    }
}
