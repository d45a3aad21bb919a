/*!
This module handles random generation of [`PieceKind`]s.
*/

use rand::seq::SliceRandom;

use crate::{GameRng, PieceKind};

/// The 7-bag piece randomizer.
///
/// Works by shuffling one copy of each of the seven [`PieceKind`]s and
/// handing them out without replacement, reshuffling a fresh set only once
/// the bag runs empty. This guarantees every kind appears exactly once per
/// seven draws (aligned to a refill) and prevents long droughts.
///
/// The bag owns no RNG; the game's own seeded [`GameRng`] is passed in so
/// that the piece sequence stays reproducible.
#[derive(Eq, PartialEq, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bag {
    remaining: Vec<PieceKind>,
}

impl Bag {
    /// Creates an empty bag; the first draw triggers a refill.
    pub fn new() -> Self {
        Self {
            remaining: Vec::with_capacity(PieceKind::VARIANTS.len()),
        }
    }

    /// Removes and returns one piece kind, refilling and reshuffling the bag
    /// first if it is empty.
    pub fn next(&mut self, rng: &mut GameRng) -> PieceKind {
        loop {
            if let Some(kind) = self.remaining.pop() {
                return kind;
            }
            self.refill(rng);
        }
    }

    /// Resets the bag to exactly one instance of each kind in uniformly
    /// random order.
    fn refill(&mut self, rng: &mut GameRng) {
        self.remaining.extend(PieceKind::VARIANTS);
        self.remaining.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn every_refill_window_holds_each_kind_once() {
        let mut rng = GameRng::seed_from_u64(7);
        let mut bag = Bag::new();
        for _ in 0..20 {
            let mut counts = [0u32; PieceKind::VARIANTS.len()];
            for _ in 0..PieceKind::VARIANTS.len() {
                counts[bag.next(&mut rng) as usize] += 1;
            }
            assert_eq!(counts, [1; 7]);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let draws = |seed| {
            let mut rng = GameRng::seed_from_u64(seed);
            let mut bag = Bag::new();
            (0..28).map(|_| bag.next(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draws(42), draws(42));
        // Not a hard guarantee, but two seeds agreeing on all 28 draws would
        // point at the shuffle ignoring its RNG.
        assert_ne!(draws(1), draws(2));
    }
}
