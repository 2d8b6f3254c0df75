//! Monsters and the player character.

use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::{ArtifactId, ObjectInfo, RoomId, WeaponType};
use super::MonsterId;

/// How a monster feels about the player before it has met them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Friendliness {
    Friend,
    #[default]
    Hostile,
    Neutral,
    /// Friendly with these base odds, adjusted by the player's charisma.
    Random(i32),
}

/// Runtime attitude toward the player, settled on first sight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Reaction {
    #[default]
    Unknown,
    Friend,
    Neutral,
    Hostile,
}

/// How a monster fights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatCode {
    /// Uses a readied weapon, or natural weapons when it has them.
    #[default]
    Normal,
    /// Natural weapons only, described with a generic "attacks".
    NaturalOnly,
    /// Picks up a weapon when one is lying around; otherwise natural weapons.
    WeaponIfAvailable,
    NeverFight,
}

impl CombatCode {
    /// Decodes the numeric combat code used by adventure data.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::NaturalOnly,
            -1 => Self::WeaponIfAvailable,
            -2 => Self::NeverFight,
            _ => Self::Normal,
        }
    }
}

/// What a monster fights with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Armament {
    /// No weapon and no natural weapons.
    #[default]
    Unarmed,
    /// Claws, teeth and fists, rolled with the monster's own dice.
    Natural,
    /// A readied weapon artifact in the monster's inventory.
    Weapon(ArtifactId),
    /// Unarmed but wants to pick up a weapon; optionally a specific one.
    Seeking(Option<ArtifactId>),
}

impl Armament {
    /// Decodes the data weapon id: absent is unarmed, 0 is natural, -1 wants
    /// any weapon and `-(n + 1)` wants artifact `n`.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            None => Self::Unarmed,
            Some(0) => Self::Natural,
            Some(n) if n > 0 => Self::Weapon(ArtifactId(n as u32)),
            Some(-1) => Self::Seeking(None),
            Some(n) => Self::Seeking(Some(ArtifactId(n.unsigned_abs() - 1))),
        }
    }

    pub fn weapon_id(self) -> Option<ArtifactId> {
        match self {
            Self::Weapon(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterStatus {
    #[default]
    Alive,
    Dead,
}

/// Spells known by the player or a spellcasting monster.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumString, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Spell {
    Blast,
    Heal,
    Speed,
    Power,
}

/// Monster spellcasting capacity.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spellbook {
    pub spells: Vec<Spell>,
    /// Casts remaining.
    pub points: i32,
    /// Percent chance per battle round to cast instead of attacking.
    pub frequency: i32,
}

impl Spellbook {
    pub fn knows(&self, spell: Spell) -> bool {
        self.points > 0 && self.spells.contains(&spell)
    }
}

/// Coarse health description derived from damage taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HealthBand {
    Perfect,
    Good,
    Hurting,
    InPain,
    BadlyInjured,
    DeathsDoor,
    Dead,
}

impl HealthBand {
    /// Band for `remaining / hardiness`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.99 {
            Self::Perfect
        } else if ratio > 0.8 {
            Self::Good
        } else if ratio > 0.6 {
            Self::Hurting
        } else if ratio > 0.4 {
            Self::InPain
        } else if ratio > 0.2 {
            Self::BadlyInjured
        } else if ratio > 0.0 {
            Self::DeathsDoor
        } else {
            Self::Dead
        }
    }

    /// Default message suffix, e.g. "is in pain.".
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Perfect => "is in perfect health.",
            Self::Good => "is in good shape.",
            Self::Hurting => "is hurting.",
            Self::InPain => "is in pain.",
            Self::BadlyInjured => "is badly injured.",
            Self::DeathsDoor => "is at death's door.",
            Self::Dead => "is dead!",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Per-weapon-type ability percentages of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponAbilities([i32; 5]);

impl WeaponAbilities {
    pub fn new(axe: i32, bow: i32, club: i32, spear: i32, sword: i32) -> Self {
        Self([axe, bow, club, spear, sword])
    }

    pub fn get(&self, weapon_type: WeaponType) -> i32 {
        self.0[weapon_type as usize - 1]
    }

    pub fn set(&mut self, weapon_type: WeaponType, value: i32) {
        self.0[weapon_type as usize - 1] = value;
    }
}

/// Unmodified stat baselines, restored when temporary effects end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hardiness: i32,
    pub agility: i32,
    pub charisma: i32,
}

/// Fields only the player character carries.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub weapon_abilities: WeaponAbilities,
    pub armor_expertise: i32,
    /// Current casting ability; halves on each cast and recharges per turn.
    pub spell_abilities: BTreeMap<Spell, i32>,
    /// Unexpended ability, which grows with successful casts.
    pub spell_abilities_original: BTreeMap<Spell, i32>,
    /// Turns left on timed spells.
    pub spell_counters: BTreeMap<Spell, i32>,
    pub base_stats: BaseStats,
    /// Armor class from worn armor, recomputed with the inventory.
    pub armor_class: i32,
}

impl PlayerProfile {
    pub fn spell_ability(&self, spell: Spell) -> i32 {
        self.spell_abilities.get(&spell).copied().unwrap_or(0)
    }

    pub fn original_spell_ability(&self, spell: Spell) -> i32 {
        self.spell_abilities_original
            .get(&spell)
            .copied()
            .unwrap_or(0)
    }

    /// Sets both current and original ability.
    pub fn learn_spell(&mut self, spell: Spell, ability: i32) {
        self.spell_abilities.insert(spell, ability);
        self.spell_abilities_original.insert(spell, ability);
    }
}

/// A monster, a group member, or the player (id 0).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: MonsterId,
    pub info: ObjectInfo,
    pub room_id: Option<RoomId>,
    /// Container the monster is hiding in.
    pub container_id: Option<ArtifactId>,
    pub hardiness: i32,
    pub agility: i32,
    pub charisma: i32,
    pub friendliness: Friendliness,
    pub reaction: Reaction,
    pub combat_code: CombatCode,
    pub courage: i32,
    /// Follows the player out of the room when hostile.
    pub pursues: bool,
    pub weapon: Armament,
    pub natural_dice: i32,
    pub natural_sides: i32,
    pub attack_odds: i32,
    pub defense_bonus: i32,
    pub armor_class: i32,
    pub gold: i32,
    pub spellbook: Option<Spellbook>,
    pub status: MonsterStatus,
    pub damage: i32,
    pub weight_carried: i32,
    /// Derived view over artifacts carried by this monster.
    pub inventory: Vec<ArtifactId>,
    pub speed_multiplier: i32,
    pub dead_body_id: Option<ArtifactId>,
    /// Group this monster belongs to, if any.
    pub parent: Option<MonsterId>,
    /// Already acted this tick.
    pub turn_taken: bool,
    /// Custom attack verbs replacing the weapon-type table.
    pub combat_verbs: Vec<String>,
    /// Custom health messages, one per [`HealthBand`].
    pub health_messages: Vec<String>,
    pub player: Option<Box<PlayerProfile>>,
}

impl Monster {
    pub fn new(id: MonsterId, name: impl Into<String>) -> Self {
        Self {
            id,
            info: ObjectInfo::named(name),
            hardiness: 10,
            agility: 10,
            charisma: 10,
            courage: 100,
            speed_multiplier: 1,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn is_alive(&self) -> bool {
        self.status == MonsterStatus::Alive
    }

    pub fn is_hostile(&self) -> bool {
        self.reaction == Reaction::Hostile
    }

    /// Hit points left before death.
    pub fn remaining(&self) -> i32 {
        self.hardiness - self.damage
    }

    pub fn health_band(&self) -> HealthBand {
        if self.hardiness <= 0 {
            return HealthBand::Dead;
        }
        HealthBand::from_ratio(f64::from(self.remaining()) / f64::from(self.hardiness))
    }

    /// Full health line for the current band, e.g. "orc is hurting.".
    pub fn health_message(&self) -> String {
        let band = self.health_band();
        match self.health_messages.get(band.index()) {
            Some(custom) => format!("{} {}", self.info.name, custom),
            None => format!("{} {}", self.info.name, band.phrase()),
        }
    }

    /// Monster is willing to fight at all with what it has.
    pub fn can_attack(&self) -> bool {
        match self.combat_code {
            CombatCode::NeverFight => false,
            CombatCode::WeaponIfAvailable => true,
            _ => matches!(self.weapon, Armament::Weapon(_) | Armament::Natural),
        }
    }

    pub fn wants_weapon(&self) -> bool {
        match self.combat_code {
            CombatCode::NeverFight | CombatCode::NaturalOnly => false,
            CombatCode::WeaponIfAvailable => !matches!(self.weapon, Armament::Weapon(_)),
            CombatCode::Normal => matches!(self.weapon, Armament::Unarmed | Armament::Seeking(_)),
        }
    }

    /// Courage against which a 1d100 fear roll is compared.
    ///
    /// Wounds lower it; a monster deciding whether to follow the player is
    /// capped at 85, and one that never pursues has none.
    pub fn effective_courage(&self, following: bool) -> f64 {
        if following && !self.pursues {
            return 0.0;
        }
        let mut courage = f64::from(self.courage);
        let damage = f64::from(self.damage);
        let hardiness = f64::from(self.hardiness);
        if damage > hardiness * 0.6 {
            courage *= 0.5;
        } else if damage > hardiness * 0.2 {
            courage *= 0.75;
        }
        if following {
            courage = courage.min(85.0);
        }
        courage
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.player.as_deref()
    }

    pub fn profile_mut(&mut self) -> Option<&mut PlayerProfile> {
        self.player.as_deref_mut()
    }
}
