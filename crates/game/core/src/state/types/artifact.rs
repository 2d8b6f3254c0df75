//! Artifacts: everything the player can see, carry, open, wear or wield.

use bitflags::bitflags;
use strum::{AsRefStr, Display, FromRepr};

use super::{ArtifactId, EffectId, MonsterId, ObjectInfo, RoomId};

/// Artifact type code as stored in adventure data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, AsRefStr, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ArtifactKind {
    Gold = 0,
    #[default]
    Treasure = 1,
    Weapon = 2,
    MagicWeapon = 3,
    Container = 4,
    LightSource = 5,
    Drinkable = 6,
    Readable = 7,
    DoorGate = 8,
    Edible = 9,
    BoundMonster = 10,
    Wearable = 11,
    DisguisedMonster = 12,
    DeadBody = 13,
    UserDefined1 = 14,
    UserDefined2 = 15,
    UserDefined3 = 16,
}

impl ArtifactKind {
    pub const fn is_weapon(self) -> bool {
        matches!(self, Self::Weapon | Self::MagicWeapon)
    }

    pub const fn is_openable(self) -> bool {
        matches!(self, Self::Container | Self::DoorGate)
    }
}

/// Weapon class; selects the player's ability and the combat verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, AsRefStr, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum WeaponType {
    Axe = 1,
    Bow = 2,
    Club = 3,
    Spear = 4,
    #[default]
    Sword = 5,
}

impl WeaponType {
    pub const ALL: [Self; 5] = [Self::Axe, Self::Bow, Self::Club, Self::Spear, Self::Sword];

    /// Row in the verb tables; row 0 belongs to natural weapons.
    pub const fn verb_row(self) -> usize {
        self as usize
    }
}

/// Combat profile of a wieldable artifact. Damage dice live on the artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub weapon_type: WeaponType,
    /// Odds bonus (may be negative).
    pub odds: i32,
    pub hands: u8,
}

/// Armor slot occupied by a wearable artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ArmorSlot {
    Armor,
    Shield,
    /// Clothing, rings and other worn items without a slot.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorProfile {
    pub slot: ArmorSlot,
    /// Armor class granted while worn.
    pub class: i32,
    /// To-hit penalty the armor inflicts on its wearer.
    pub penalty: i32,
}

/// How a container or door is locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lock {
    #[default]
    None,
    /// Opens only while the player carries this key.
    Key(ArtifactId),
    /// Cannot be opened by the standard command; adventure hooks decide.
    Special,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ArtifactFlags: u8 {
        const OPEN = 1 << 0;
        /// Part of the room description; not listed until revealed.
        const EMBEDDED = 1 << 1;
        /// Secret door or passage, not yet found.
        const HIDDEN = 1 << 2;
        /// Light source currently burning.
        const LIT = 1 << 3;
        /// Door smashed open; it can no longer be closed.
        const BROKEN = 1 << 4;
        const PLAYER_BROUGHT = 1 << 5;
    }
}

/// Where an artifact currently is. An artifact is in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArtifactLocation {
    /// Destroyed or not yet placed.
    #[default]
    Nowhere,
    Room(RoomId),
    Carried { monster: MonsterId, worn: bool },
    Container(ArtifactId),
}

/// An item in the adventure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artifact {
    pub id: ArtifactId,
    pub info: ObjectInfo,
    pub kind: ArtifactKind,
    location: ArtifactLocation,
    pub weight: i32,
    pub value: i32,
    /// Damage dice for weapons; healing (or poison, when negative) for food and drink.
    pub dice: i32,
    pub sides: i32,
    pub weapon: Option<WeaponProfile>,
    pub armor: Option<ArmorProfile>,
    pub flags: ArtifactFlags,
    pub lock: Lock,
    /// The other side of a door.
    pub linked_door_id: Option<ArtifactId>,
    /// Monster that must be gone before the artifact can be taken.
    pub guard_id: Option<MonsterId>,
    /// Monster released by a bound-monster or disguised-monster artifact.
    pub monster_id: Option<MonsterId>,
    /// Strength of a door or container against force.
    pub hardiness: Option<i32>,
    /// Doses for food and drink; turns of fuel for lights (-1 burns forever).
    pub quantity: Option<i32>,
    /// First effect shown when a readable artifact is read.
    pub effect_id: Option<EffectId>,
    pub num_effects: u32,
    /// Set on the turn the artifact was revealed; consumed by the next description pass.
    pub revealed: bool,
}

impl Artifact {
    pub fn new(id: ArtifactId, name: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            id,
            info: ObjectInfo::named(name),
            kind,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn location(&self) -> ArtifactLocation {
        self.location
    }

    pub fn room_id(&self) -> Option<RoomId> {
        match self.location {
            ArtifactLocation::Room(room) => Some(room),
            _ => None,
        }
    }

    /// Monster carrying the artifact, worn or not.
    pub fn holder(&self) -> Option<MonsterId> {
        match self.location {
            ArtifactLocation::Carried { monster, .. } => Some(monster),
            _ => None,
        }
    }

    pub fn container_id(&self) -> Option<ArtifactId> {
        match self.location {
            ArtifactLocation::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn is_worn(&self) -> bool {
        matches!(self.location, ArtifactLocation::Carried { worn: true, .. })
    }

    pub fn is_destroyed(&self) -> bool {
        self.location == ArtifactLocation::Nowhere
    }

    pub fn is_open(&self) -> bool {
        self.flags.contains(ArtifactFlags::OPEN)
    }

    pub fn is_embedded(&self) -> bool {
        self.flags.contains(ArtifactFlags::EMBEDDED)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ArtifactFlags::HIDDEN)
    }

    pub fn is_lit(&self) -> bool {
        self.flags.contains(ArtifactFlags::LIT)
    }

    /// Magic weapons survive fumbles that would break an ordinary blade.
    pub fn is_magic_weapon(&self) -> bool {
        self.kind == ArtifactKind::MagicWeapon
    }

    /// Places the artifact in a room. Returns the monster that was carrying it.
    pub fn move_to_room(&mut self, room: RoomId) -> Option<MonsterId> {
        let holder = self.holder();
        self.location = ArtifactLocation::Room(room);
        holder
    }

    /// Gives the artifact to a monster, unworn. Returns the previous holder.
    pub fn move_to_inventory(&mut self, monster: MonsterId) -> Option<MonsterId> {
        let holder = self.holder();
        self.location = ArtifactLocation::Carried {
            monster,
            worn: false,
        };
        holder
    }

    /// Puts the artifact inside a container. Returns the previous holder.
    pub fn put_into(&mut self, container: ArtifactId) -> Option<MonsterId> {
        let holder = self.holder();
        self.location = ArtifactLocation::Container(container);
        holder
    }

    /// Removes the artifact from the game. Returns the previous holder.
    pub fn destroy(&mut self) -> Option<MonsterId> {
        let holder = self.holder();
        self.location = ArtifactLocation::Nowhere;
        holder
    }

    /// Marks a carried artifact as worn or unworn. No effect when not carried.
    pub fn set_worn(&mut self, worn: bool) {
        if let ArtifactLocation::Carried { monster, .. } = self.location {
            self.location = ArtifactLocation::Carried { monster, worn };
        }
    }

    /// Highest damage a weapon can roll; 0 for anything else.
    pub fn max_damage(&self) -> i32 {
        if self.kind.is_weapon() {
            self.dice * self.sides
        } else {
            0
        }
    }

    /// Wearable with an armor profile.
    pub fn is_armor(&self) -> bool {
        self.kind == ArtifactKind::Wearable && self.armor.is_some()
    }

    /// Weapon class or armor slot name, "treasure" for anything else.
    pub fn type_name(&self) -> String {
        match (self.weapon, self.armor) {
            (Some(weapon), _) if self.kind.is_weapon() => weapon.weapon_type.to_string(),
            (_, Some(armor)) if self.is_armor() => armor.slot.to_string(),
            _ => "treasure".to_owned(),
        }
    }

    /// Armor class contributed while worn.
    pub fn armor_class(&self) -> i32 {
        self.armor.map_or(0, |armor| armor.class)
    }
}
