//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L) in shuffled order.
//! Draws pop from the bag; an empty bag is refilled and reshuffled on the
//! next draw, never earlier. The same kind therefore repeats at most
//! 13 draws apart.
//!
//! Shuffling uses a small seeded LCG so a seed reproduces a whole game.

use crate::types::PieceKind;

/// Number of kinds in one bag.
pub const BAG_SIZE: usize = 7;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next kind to hand out; `BAG_SIZE` means empty.
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create an empty bag; the first draw fills it.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: BAG_SIZE,
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind
    pub fn next(&mut self) -> PieceKind {
        if self.bag_index >= BAG_SIZE {
            self.refill();
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Kinds left in the current bag.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..=7 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_starts_empty() {
        let bag = PieceBag::new(1);
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_bag_refills_on_first_draw() {
        let mut bag = PieceBag::new(1);
        bag.next();
        assert_eq!(bag.remaining().len(), BAG_SIZE - 1);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(7);

        let mut drawn: Vec<PieceKind> = (0..BAG_SIZE).map(|_| bag.next()).collect();
        drawn.sort_by_key(|k| k.as_str());
        let mut all = PieceKind::ALL.to_vec();
        all.sort_by_key(|k| k.as_str());
        assert_eq!(drawn, all);
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(42);
        let mut v = PieceKind::ALL;
        rng.shuffle(&mut v);
        for kind in PieceKind::ALL {
            assert_eq!(v.iter().filter(|&&k| k == kind).count(), 1);
        }
    }

    #[test]
    fn test_shuffle_varies_across_bags() {
        // 50 bags from one stream should not all share an opening kind.
        let mut bag = PieceBag::new(2024);
        let mut firsts = std::collections::HashSet::new();
        for _ in 0..50 {
            firsts.insert(bag.next());
            for _ in 1..BAG_SIZE {
                bag.next();
            }
        }
        assert!(firsts.len() > 1);
    }
}
