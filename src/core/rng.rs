//! Seeded randomness for combat.
//!
//! A combat owns two streams derived from one seed: the main stream shuffles
//! piles, places generated cards and picks random targets, while a separate
//! `"intent"` stream rolls opponent moves. Keeping them apart means an extra
//! shuffle never changes which move an opponent announces.
//!
//! ```
//! use resonance_combat::core::GameRng;
//!
//! let mut shuffles = GameRng::new(7);
//! let mut again = GameRng::new(7);
//! let mut deck = vec!["strike", "strike", "defend", "ember"];
//! let mut copy = deck.clone();
//! shuffles.shuffle(&mut deck);
//! again.shuffle(&mut copy);
//! assert_eq!(deck, copy);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream that remembers the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    seed: u64,
    chacha: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            chacha: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Derive a named stream. The label is mixed into the seed with
    /// `FxHasher`, which is stable across platforms and toolchains.
    #[must_use]
    pub fn for_context(&self, label: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        label.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Position for inserting into a pile of `len` cards: any of `0..=len`.
    pub fn insertion_index(&mut self, len: usize) -> usize {
        self.chacha.gen_range(0..=len)
    }

    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.chacha);
    }

    /// Uniform pick, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.chacha)
    }

    /// Roll an index in proportion to `weights`.
    ///
    /// Negative weights count as zero. The roll walks the cumulative sum and
    /// the last positive entry takes any floating point remainder. `None`
    /// when nothing carries weight.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = self.chacha.gen::<f64>() * total;
        let mut last_positive = None;
        for (index, weight) in weights.iter().map(|w| w.max(0.0)).enumerate() {
            if weight <= 0.0 {
                continue;
            }
            if remaining < weight {
                return Some(index);
            }
            remaining -= weight;
            last_positive = Some(index);
        }
        last_positive
    }

    /// Where this stream currently stands.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.chacha.get_word_pos(),
        }
    }

    /// Resume a stream at a recorded position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.chacha.set_word_pos(state.word_pos);
        rng
    }
}

/// Seed plus ChaCha word position; enough to resume a stream exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<usize> {
        (0..n).map(|_| rng.insertion_index(50)).collect()
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = GameRng::new(2024);
        let mut b = GameRng::new(2024);
        assert_eq!(draws(&mut a, 64), draws(&mut b, 64));
    }

    #[test]
    fn test_intent_stream_is_independent() {
        let base = GameRng::new(9);
        let mut main = base.for_context("main");
        let mut intent = base.for_context("intent");
        assert_ne!(draws(&mut main, 16), draws(&mut intent, 16));

        let mut again = base.for_context("intent");
        let mut intent = base.for_context("intent");
        assert_eq!(draws(&mut again, 16), draws(&mut intent, 16));
    }

    #[test]
    fn test_insertion_index_covers_both_ends() {
        let mut rng = GameRng::new(1);
        let seen: Vec<usize> = (0..500).map(|_| rng.insertion_index(2)).collect();
        assert!(seen.iter().all(|&i| i <= 2));
        assert!(seen.contains(&0));
        assert!(seen.contains(&2));
        assert_eq!(rng.insertion_index(0), 0);
    }

    #[test]
    fn test_zero_weight_moves_never_rolled() {
        let mut rng = GameRng::new(42);
        for _ in 0..200 {
            assert_eq!(rng.choose_weighted(&[0.0, 4.0, -1.0]), Some(1));
        }
        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0.0, -2.0]), None);
    }

    #[test]
    fn test_weighted_roll_proportions() {
        let mut rng = GameRng::new(3);
        let mut heavy = 0;
        for _ in 0..4000 {
            if rng.choose_weighted(&[1.0, 3.0]) == Some(1) {
                heavy += 1;
            }
        }
        assert!((2800..3200).contains(&heavy), "heavy rolled {heavy} times");
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = GameRng::new(42);
        let mut deck: Vec<u32> = (0..12).collect();
        rng.shuffle(&mut deck);
        assert_ne!(deck, (0..12).collect::<Vec<_>>());
        deck.sort_unstable();
        assert_eq!(deck, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = GameRng::new(77);
        draws(&mut rng, 30);

        let saved = rng.state();
        let expected = draws(&mut rng, 10);

        let mut resumed = GameRng::from_state(&saved);
        assert_eq!(resumed.seed(), 77);
        assert_eq!(draws(&mut resumed, 10), expected);
    }
}
