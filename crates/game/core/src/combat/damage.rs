//! Critical hit and fumble effect bands.

/// What a critical hit does to the blow, from a second 1d100 roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CriticalEffect {
    /// Damage bypasses armor.
    IgnoreArmor,
    /// Damage is multiplied, in tenths (15 = ×1.5).
    Multiply(i32),
    /// Damage so high nothing survives it.
    Kill,
}

impl CriticalEffect {
    pub const fn from_roll(roll: i32) -> Self {
        match roll {
            ..=50 => Self::IgnoreArmor,
            51..=85 => Self::Multiply(15),
            86..=95 => Self::Multiply(20),
            96..=99 => Self::Multiply(30),
            _ => Self::Kill,
        }
    }

    /// Applies the effect to rolled damage, rounding down.
    pub const fn apply(self, damage: i32) -> i32 {
        match self {
            Self::IgnoreArmor => damage,
            Self::Multiply(tenths) => damage * tenths / 10,
            Self::Kill => damage * 1000,
        }
    }

    pub const fn ignores_armor(self) -> bool {
        matches!(self, Self::IgnoreArmor)
    }
}

/// What a fumble does, from a 1d100 roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FumbleEffect {
    Recovered,
    Dropped,
    /// The weapon hits its wielder.
    HitsUser,
    /// Magic weapons shrug off anything worse than hitting their wielder.
    Sparks,
    /// The weapon loses two sides from its damage die.
    Damaged,
    /// The weapon breaks; the roll of 100 makes the shards hurt more.
    Broken { worst: bool },
}

impl FumbleEffect {
    pub const fn from_roll(roll: i32, magic: bool, sides: i32) -> Self {
        match roll {
            ..=40 => Self::Recovered,
            41..=80 => Self::Dropped,
            81..=85 => Self::HitsUser,
            _ if magic => Self::Sparks,
            86..=95 if sides > 2 => Self::Damaged,
            _ => Self::Broken { worst: roll >= 100 },
        }
    }
}
