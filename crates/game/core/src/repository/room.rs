use tracing::trace;

use crate::error::InvariantError;
use crate::state::{Room, RoomId};

/// Rooms in insertion order plus the room the player stands in.
#[derive(Clone, Debug, Default)]
pub struct RoomRepository {
    rooms: Vec<Room>,
    current: Option<RoomId>,
}

impl RoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id an unnumbered record gets when appended next: one past the
    /// highest id so far.
    pub fn next_id(&self) -> RoomId {
        RoomId(self.rooms.iter().map(|room| room.id.0).max().unwrap_or(0) + 1)
    }

    pub fn add(&mut self, room: Room) -> Result<RoomId, InvariantError> {
        if self.get(room.id).is_some() {
            return Err(InvariantError::DuplicateRoom(room.id));
        }
        let id = room.id;
        trace!(target: "core::repo", room = %id, name = %room.info.name, "room added");
        self.rooms.push(room);
        Ok(id)
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == id)
    }

    pub fn require(&self, id: RoomId) -> Result<&Room, InvariantError> {
        self.get(id).ok_or(InvariantError::UnknownRoom(id))
    }

    pub fn require_mut(&mut self, id: RoomId) -> Result<&mut Room, InvariantError> {
        self.get_mut(id).ok_or(InvariantError::UnknownRoom(id))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.info.matches(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn current(&self) -> Option<RoomId> {
        self.current
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current.and_then(|id| self.get(id))
    }

    pub(crate) fn set_current(&mut self, room: Option<RoomId>) {
        self.current = room;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let mut rooms = RoomRepository::new();
        rooms.add(Room::new(RoomId(1), "Hall")).unwrap();
        let err = rooms.add(Room::new(RoomId(1), "Cellar")).unwrap_err();
        assert_eq!(err, InvariantError::DuplicateRoom(RoomId(1)));
        assert_eq!(rooms.next_id(), RoomId(2));
    }

    #[test]
    fn finds_rooms_by_name() {
        let mut rooms = RoomRepository::new();
        rooms.add(Room::new(RoomId(1), "Hall")).unwrap();
        rooms.add(Room::new(RoomId(2), "Cellar")).unwrap();
        assert_eq!(rooms.get_by_name("cellar").map(|r| r.id), Some(RoomId(2)));
        assert!(rooms.require(RoomId(9)).is_err());
    }

    #[test]
    fn next_id_follows_the_highest_id() {
        let mut rooms = RoomRepository::new();
        rooms.add(Room::new(RoomId(2), "Hall")).unwrap();
        rooms.add(Room::new(RoomId(7), "Cellar")).unwrap();
        assert_eq!(rooms.next_id(), RoomId(8));
    }
}
