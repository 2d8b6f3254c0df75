mod artifact;
mod effect;
mod group;
mod history;
mod ids;
mod monster;
mod object;
mod room;

pub use artifact::{
    ArmorProfile, ArmorSlot, Artifact, ArtifactFlags, ArtifactKind, ArtifactLocation, Lock,
    WeaponProfile, WeaponType,
};
pub use effect::Effect;
pub use group::{GroupMonster, MonsterEntry};
pub use history::{History, HistoryEntry, Line, Style};
pub use ids::{ArtifactId, EffectId, MonsterId, RoomId, Tick};
pub use monster::{
    Armament, BaseStats, CombatCode, Friendliness, HealthBand, Monster, MonsterStatus,
    PlayerProfile, Reaction, Spell, Spellbook, WeaponAbilities,
};
pub use object::{ObjectInfo, pluralize};
pub use room::{EXIT, EXIT_SILENT, Exit, ExitTarget, Room, direction_name, normalize_direction};
