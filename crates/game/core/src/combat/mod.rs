//! Combat resolution.
//!
//! The pure parts (to-hit odds, the hit check, critical and fumble bands,
//! flavor verbs) are free functions over plain numbers. [`attack`] and
//! [`battle`] wire them into the running [`crate::Game`]: rolls, hooks,
//! messages and monster decisions.

mod attack;
mod battle;
pub mod damage;
pub mod hit;
pub mod verbs;

pub use damage::{CriticalEffect, FumbleEffect};
pub use hit::{CRITICAL_THRESHOLD, FUMBLE_THRESHOLD, HitCheck, HitFactors, check_hit, to_hit_odds};
