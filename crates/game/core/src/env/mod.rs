//! Inputs the engine does not own: adventure records and randomness.

mod records;
mod rng;

pub use records::{
    AdventureData, ArtifactRecord, EffectRecord, ExitRecord, MonsterRecord, PlayerRecord,
    RoomRecord,
};
pub use rng::{FixedRng, PcgRng, RandomSource};
