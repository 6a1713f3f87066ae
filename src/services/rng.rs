//! Randomness used to draw puzzles.
//!
//! `SeededRandom` is a small LCG whose output depends only on a seed string,
//! so a daily or shared puzzle comes out identical on every client.
//! `AmbientRng` wraps an entropy-seeded `StdRng` for throwaway games.
//! Both implement [`PuzzleRng`], which is what the builder and the session
//! accept; the caller picks one explicitly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const LCG_MULTIPLIER: f64 = 1_103_515_245.0;
const LCG_INCREMENT: f64 = 12_345.0;
const STATE_MASK: u64 = 0x7fff_ffff;

/// Fold a string into a 32-bit signed hash, `h = h * 31 + unit` per UTF-16
/// code unit with two's-complement wraparound.
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

pub trait PuzzleRng {
    /// Next value in `[0, 1]`.
    fn next_f64(&mut self) -> f64;

    /// Integer in `[min, max)`. `min >= max` is a caller error.
    fn next_int(&mut self, min: usize, max: usize) -> usize {
        (self.next_f64() * (max - min) as f64).floor() as usize + min
    }

    /// Fisher-Yates over a copy of `items`, last index down to 1.
    fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut result = items.to_vec();
        for i in (1..result.len()).rev() {
            let j = self.next_int(0, i + 1).min(i);
            result.swap(i, j);
        }
        result
    }
}

/// Deterministic generator driven by a seed string.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        Self {
            state: hash_seed(seed).unsigned_abs(),
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl PuzzleRng for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        // The multiply-add runs in f64 before masking, matching the browser
        // client that issues shared seeds. The product stays below 2^63 so the
        // integer conversion is exact.
        let next = f64::from(self.state) * LCG_MULTIPLIER + LCG_INCREMENT;
        self.state = ((next as u64) & STATE_MASK) as u32;
        f64::from(self.state) / STATE_MASK as f64
    }
}

/// Non-reproducible randomness for ordinary games and display shuffles.
#[derive(Debug, Clone)]
pub struct AmbientRng(StdRng);

impl AmbientRng {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Fixed-seed variant for tests.
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for AmbientRng {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleRng for AmbientRng {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut result = items.to_vec();
        result.shuffle(&mut self.0);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_matches_java_style_string_hash() {
        assert_eq!(hash_seed(""), 0);
        assert_eq!(hash_seed("a"), 97);
        assert_eq!(hash_seed("ab"), 97 * 31 + 98);
        // Wraps rather than saturating.
        assert_eq!(hash_seed("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn test_seeded_rng_deterministic() {
        let mut rng1 = SeededRandom::new("jumbl-daily-2024-01-01");
        let mut rng2 = SeededRandom::new("jumbl-daily-2024-01-01");

        for _ in 0..1000 {
            assert_eq!(rng1.next_f64().to_bits(), rng2.next_f64().to_bits());
        }
    }

    #[test]
    fn test_seeded_rng_different_seeds() {
        let mut rng1 = SeededRandom::new("alpha");
        let mut rng2 = SeededRandom::new("beta");
        assert_ne!(rng1.next_f64(), rng2.next_f64());
    }

    #[test]
    fn test_min_hash_seed_is_accepted() {
        let mut rng = SeededRandom::new("polygenelubricants");
        assert_eq!(rng.state(), 1 << 31);
        let value = rng.next_f64();
        assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn test_first_draws_follow_the_lcg() {
        // state 97 -> 97 * 1103515245 + 12345, small enough to be exact
        let mut rng = SeededRandom::new("a");
        let expected = (97u64 * 1_103_515_245 + 12_345) & 0x7fff_ffff;
        rng.next_f64();
        assert_eq!(u64::from(rng.state()), expected);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut rng = SeededRandom::new("range-check");
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..=1.0).contains(&v));
            let n = rng.next_int(3, 9);
            assert!((3..9).contains(&n));
        }
    }

    #[test]
    fn test_shuffle_is_permutation_and_leaves_input() {
        let input: Vec<u32> = (0..50).collect();
        let mut rng = SeededRandom::new("perm");
        let shuffled = rng.shuffle(&input);

        assert_eq!(input, (0..50).collect::<Vec<_>>());
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn test_reference_vector() {
        let letters = ["A", "B", "C", "D", "E"];
        let shuffled = SeededRandom::new("jumbl-daily-2024-01-01").shuffle(&letters);
        assert_eq!(shuffled, ["C", "D", "A", "B", "E"]);
    }

    #[test]
    fn test_states_from_min_hash_seed() {
        let mut rng = SeededRandom::new("polygenelubricants");
        let states: Vec<u32> = (0..5)
            .map(|_| {
                rng.next_f64();
                rng.state()
            })
            .collect();
        assert_eq!(states, [12288, 783589433, 1355794048, 1039315968, 187618304]);
    }

    #[test]
    fn test_shuffle_handles_short_inputs() {
        let mut rng = SeededRandom::new("short");
        assert!(rng.shuffle::<char>(&[]).is_empty());
        assert_eq!(rng.shuffle(&['x']), vec!['x']);
    }

    #[test]
    fn test_ambient_shuffle_is_permutation() {
        let mut rng = AmbientRng::from_seed(7);
        let input = vec!['J', 'U', 'M', 'B', 'L'];
        let mut shuffled = rng.shuffle(&input);
        shuffled.sort_unstable();
        let mut expected = input.clone();
        expected.sort_unstable();
        assert_eq!(shuffled, expected);
    }
}
