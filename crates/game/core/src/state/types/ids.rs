use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a room.
    RoomId
);
entity_id!(
    /// Identifier of an artifact.
    ArtifactId
);
entity_id!(
    /// Identifier of a scripted text effect.
    EffectId
);

/// Identifier of a monster, the player, or a member of a group monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterId(pub u32);

impl MonsterId {
    /// Reserved identifier for the player character.
    pub const PLAYER: Self = Self(0);

    /// Spacing between a group id and its member ids.
    pub const GROUP_STRIDE: u32 = 10_000;

    /// Largest id a top-level monster may use; larger ids address group members.
    pub const MAX_TOP_LEVEL: u32 = Self::GROUP_STRIDE - 1;

    /// Returns true if this id represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }

    /// Id of the `index`-th member (1-based) of the group `self`.
    #[inline]
    pub const fn member(self, index: u32) -> Self {
        Self(self.0 * Self::GROUP_STRIDE + index)
    }

    /// Group that owns this member id, if it is one.
    #[inline]
    pub const fn group(self) -> Option<Self> {
        if self.0 >= Self::GROUP_STRIDE {
            Some(Self(self.0 / Self::GROUP_STRIDE))
        } else {
            None
        }
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Turn counter value.
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_ids_map_back_to_group() {
        let group = MonsterId(12);
        let member = group.member(3);
        assert_eq!(member, MonsterId(120_003));
        assert_eq!(member.group(), Some(group));
        assert_eq!(group.group(), None);
        assert!(MonsterId::PLAYER.is_player());
    }
}
