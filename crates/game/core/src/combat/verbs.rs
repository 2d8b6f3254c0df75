//! Flavor text for attacks and misses, by weapon row.
//!
//! Row 0 is natural weapons; rows 1-5 follow [`crate::state::WeaponType`].

pub const ATTACK_VERBS: [&[&str]; 6] = [
    &["lunges", "tears", "claws"],
    &["swings", "chops", "swings"],
    &["shoots"],
    &["swings"],
    &["stabs", "lunges", "jabs"],
    &["swings", "chops", "stabs"],
];

pub const MISS_VERBS: [&[&str]; 6] = [
    &["missed", "missed"],
    &["dodged", "missed"],
    &["missed", "missed"],
    &["dodged", "missed"],
    &["dodged", "missed"],
    &["parried", "missed"],
];

pub fn attack_verbs(row: usize) -> &'static [&'static str] {
    ATTACK_VERBS.get(row).copied().unwrap_or(ATTACK_VERBS[0])
}

pub fn miss_verbs(row: usize) -> &'static [&'static str] {
    MISS_VERBS.get(row).copied().unwrap_or(MISS_VERBS[0])
}
