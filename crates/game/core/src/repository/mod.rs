//! Id-keyed stores for the adventure's entities.
//!
//! Repositories enforce unique ids and answer lookups. Visibility lists are
//! recomputed explicitly by the engine after mutations, never lazily.

mod artifact;
mod effect;
mod monster;
mod room;

pub use artifact::ArtifactRepository;
pub use effect::EffectRepository;
pub use monster::MonsterRepository;
pub use room::RoomRepository;
