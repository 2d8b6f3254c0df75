use super::{ArtifactId, EffectId, ObjectInfo, RoomId};

/// Sentinel destination that leaves the adventure after a confirmation.
pub const EXIT: i32 = -999;
/// Sentinel destination that leaves the adventure without a confirmation.
pub const EXIT_SILENT: i32 = -998;

/// A location in the adventure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub id: RoomId,
    pub info: ObjectInfo,
    pub exits: Vec<Exit>,
    pub is_dark: bool,
    /// Name and description shown while the room is dark and unlit.
    pub dark_name: String,
    pub dark_description: String,
    pub effect_id: Option<EffectId>,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            info: ObjectInfo::named(name),
            dark_name: "In the dark".to_owned(),
            dark_description: "It's too dark to see.".to_owned(),
            ..Self::default()
        }
    }

    /// Exit leading in `direction` (long or short form).
    pub fn exit(&self, direction: &str) -> Option<&Exit> {
        let direction = normalize_direction(direction);
        self.exits.iter().find(|exit| exit.direction == direction)
    }

    pub fn exit_mut(&mut self, direction: &str) -> Option<&mut Exit> {
        let direction = normalize_direction(direction);
        self.exits.iter_mut().find(|exit| exit.direction == direction)
    }

    /// Adds an exit, replacing any existing exit in the same direction.
    pub fn add_exit(&mut self, exit: Exit) {
        self.exits.retain(|existing| existing.direction != exit.direction);
        self.exits.push(exit);
    }

    pub fn remove_exit(&mut self, direction: &str) {
        let direction = normalize_direction(direction);
        self.exits.retain(|exit| exit.direction != direction);
    }
}

/// One directed connection out of a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    /// Short direction code: "n", "s", "e", "w", "ne", "nw", "se", "sw", "u", "d".
    pub direction: String,
    pub destination: ExitTarget,
    /// Door artifact that must be open for the exit to be usable.
    pub door_id: Option<ArtifactId>,
    /// Effect printed when the player passes through.
    pub effect_id: Option<EffectId>,
}

impl Exit {
    pub fn new(direction: &str, destination: ExitTarget) -> Self {
        Self {
            direction: normalize_direction(direction),
            destination,
            door_id: None,
            effect_id: None,
        }
    }

    pub fn to_room(direction: &str, room: RoomId) -> Self {
        Self::new(direction, ExitTarget::Room(room))
    }
}

/// Where an exit leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitTarget {
    /// Destination 0: the way is blocked.
    Blocked,
    Room(RoomId),
    /// Leaves the adventure; `silent` leaves without the exit message.
    LeaveAdventure { silent: bool },
    /// Any other negative destination, left to adventure hooks.
    Scripted(i32),
}

impl ExitTarget {
    /// Decodes the numeric destination used by adventure data.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Blocked,
            EXIT => Self::LeaveAdventure { silent: false },
            EXIT_SILENT => Self::LeaveAdventure { silent: true },
            n if n > 0 => Self::Room(RoomId(n as u32)),
            n => Self::Scripted(n),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Blocked => 0,
            Self::Room(room) => room.0 as i32,
            Self::LeaveAdventure { silent: false } => EXIT,
            Self::LeaveAdventure { silent: true } => EXIT_SILENT,
            Self::Scripted(n) => n,
        }
    }

    pub fn room(self) -> Option<RoomId> {
        match self {
            Self::Room(room) => Some(room),
            _ => None,
        }
    }
}

/// Maps long direction names to the short codes used by exits.
pub fn normalize_direction(direction: &str) -> String {
    let lower = direction.trim().to_lowercase();
    let short = match lower.as_str() {
        "north" => "n",
        "south" => "s",
        "east" => "e",
        "west" => "w",
        "northeast" => "ne",
        "northwest" => "nw",
        "southeast" => "se",
        "southwest" => "sw",
        "up" => "u",
        "down" => "d",
        other => other,
    };
    short.to_owned()
}

/// Long name of a short direction code, for messages.
pub fn direction_name(direction: &str) -> &str {
    match direction {
        "n" => "north",
        "s" => "south",
        "e" => "east",
        "w" => "west",
        "ne" => "northeast",
        "nw" => "northwest",
        "se" => "southeast",
        "sw" => "southwest",
        "u" => "up",
        "d" => "down",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exit_sentinels() {
        assert_eq!(ExitTarget::from_code(0), ExitTarget::Blocked);
        assert_eq!(ExitTarget::from_code(7), ExitTarget::Room(RoomId(7)));
        assert_eq!(
            ExitTarget::from_code(EXIT),
            ExitTarget::LeaveAdventure { silent: false }
        );
        assert_eq!(
            ExitTarget::from_code(EXIT_SILENT),
            ExitTarget::LeaveAdventure { silent: true }
        );
        assert_eq!(ExitTarget::from_code(-3), ExitTarget::Scripted(-3));
    }

    #[test]
    fn exits_accept_long_direction_names() {
        let mut room = Room::new(RoomId(1), "Hall");
        room.add_exit(Exit::to_room("north", RoomId(2)));
        assert_eq!(room.exit("n").map(|e| e.destination), Some(ExitTarget::Room(RoomId(2))));
        assert!(room.exit("NORTH").is_some());
        room.add_exit(Exit::to_room("n", RoomId(3)));
        assert_eq!(room.exits.len(), 1);
        room.remove_exit("north");
        assert!(room.exits.is_empty());
    }
}
