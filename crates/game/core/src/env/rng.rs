//! Random number sources for dice rolls.
//!
//! Every roll the rules make goes through [`RandomSource::roll`]. Production
//! games use [`PcgRng`]; tests and scripted replays use [`FixedRng`], which
//! hands out a queue of predetermined roll results before falling back to a
//! seeded stream.

use std::collections::VecDeque;

/// Source of dice rolls and random choices.
pub trait RandomSource {
    /// Next raw 32-bit value from the underlying stream.
    fn next_u32(&mut self) -> u32;

    /// Rolls `dice` dice with `sides` sides and returns the total.
    ///
    /// Zero dice or zero sides roll 0. Negative sides roll values in
    /// `sides..=-1` per die.
    fn roll(&mut self, dice: i32, sides: i32) -> i32 {
        if dice <= 0 || sides == 0 {
            return 0;
        }
        let magnitude = sides.unsigned_abs();
        (0..dice)
            .map(|_| {
                let face = (self.next_u32() % magnitude) as i32 + 1;
                if sides < 0 { -face } else { face }
            })
            .sum()
    }

    /// Picks an index in `0..len` with a single 1dN roll.
    ///
    /// Returns `None` when `len` is zero.
    fn random_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let roll = self.roll(1, len as i32).max(1) as usize;
        Some((roll - 1).min(len - 1))
    }

    /// Picks an index for cosmetic variation (combat verbs) without consuming
    /// a dice roll.
    fn flavor_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32() as usize % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Same seed always produces the same sequence of rolls.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG (Linear Congruential Generator) formula:
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Roll source that replays queued results.
///
/// Each call to [`RandomSource::roll`] pops one queued value and returns it as
/// the whole roll total, whatever the dice count. Once the queue is empty the
/// seeded stream takes over. Cosmetic choices never consume queued values.
#[derive(Clone, Debug, Default)]
pub struct FixedRng {
    queued: VecDeque<i32>,
    fallback: PcgRng,
}

impl FixedRng {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            queued: rolls.into_iter().collect(),
            fallback: PcgRng::default(),
        }
    }

    /// Appends more results to the end of the queue.
    pub fn push(&mut self, rolls: impl IntoIterator<Item = i32>) {
        self.queued.extend(rolls);
    }

    /// Number of queued results not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queued.len()
    }
}

impl RandomSource for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.fallback.next_u32()
    }

    fn roll(&mut self, dice: i32, sides: i32) -> i32 {
        match self.queued.pop_front() {
            Some(value) => value,
            None => self.fallback.roll(dice, sides),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        let first: Vec<i32> = (0..16).map(|_| a.roll(1, 100)).collect();
        let second: Vec<i32> = (0..16).map(|_| b.roll(1, 100)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rolls_stay_within_dice_range() {
        let mut rng = PcgRng::new(7);
        for _ in 0..500 {
            let total = rng.roll(2, 6);
            assert!((2..=12).contains(&total));
            let negative = rng.roll(1, -4);
            assert!((-4..=-1).contains(&negative));
        }
        assert_eq!(rng.roll(0, 6), 0);
        assert_eq!(rng.roll(3, 0), 0);
    }

    #[test]
    fn fixed_rng_replays_queue_then_falls_back() {
        let mut rng = FixedRng::new([3, 97]);
        assert_eq!(rng.roll(1, 100), 3);
        assert_eq!(rng.roll(2, 6), 97);
        assert_eq!(rng.remaining(), 0);
        let fallback = rng.roll(1, 6);
        assert!((1..=6).contains(&fallback));
    }

    #[test]
    fn random_index_uses_one_roll() {
        let mut rng = FixedRng::new([2, 9]);
        assert_eq!(rng.random_index(4), Some(1));
        // out-of-range queued values clamp to the last index
        assert_eq!(rng.random_index(3), Some(2));
        assert_eq!(rng.random_index(0), None);
    }

    #[test]
    fn flavor_choices_leave_queue_untouched() {
        let mut rng = FixedRng::new([5]);
        let _ = rng.flavor_index(3);
        assert_eq!(rng.remaining(), 1);
    }
}
