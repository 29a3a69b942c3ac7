//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then moves on to the next bag.
//!
//! The following bag is always shuffled ahead of time so lookahead never has to
//! touch the RNG. A simple LCG keeps every sequence reproducible from its seed.

use crate::types::PieceKind;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG are weak; take the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// A freshly shuffled bag
    fn shuffled_bag(&mut self) -> [PieceKind; 7] {
        let mut bag = PieceKind::ALL;
        self.shuffle(&mut bag);
        bag
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// Pre-shuffled bag used once the current one runs out
    next_bag: [PieceKind; 7],
    /// RNG for shuffling
    rng: SimpleRng,
    /// Seed this queue was created or last reset with
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let bag = rng.shuffled_bag();
        let next_bag = rng.shuffled_bag();
        Self {
            bag,
            bag_index: 0,
            next_bag,
            rng,
            seed,
        }
    }

    /// Create a queue seeded from system entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Restart the sequence. `None` picks a fresh seed from entropy.
    pub fn reset(&mut self, seed: Option<u32>) {
        *self = match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        };
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= 7 {
            self.bag = self.next_bag;
            self.next_bag = self.rng.shuffled_bag();
            self.bag_index = 0;
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Discard what is left of a partly drawn bag so the next draw opens a fresh one.
    ///
    /// Does nothing on a bag boundary.
    pub fn start_new_bag(&mut self) {
        if self.bag_index == 0 {
            return;
        }
        self.bag = self.next_bag;
        self.next_bag = self.rng.shuffled_bag();
        self.bag_index = 0;
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        if self.bag_index < 7 {
            self.bag[self.bag_index]
        } else {
            self.next_bag[0]
        }
    }

    /// Peek at the next `n` pieces without consuming anything.
    ///
    /// Bags beyond the pre-shuffled one are previewed with a clone of the RNG, so the
    /// preview always matches the following `draw()` calls.
    pub fn peek_n(&self, n: usize) -> Vec<PieceKind> {
        let mut out = Vec::with_capacity(n);
        out.extend(self.bag[self.bag_index.min(7)..].iter().take(n).copied());
        out.extend(self.next_bag.iter().take(n - out.len()).copied());

        let mut preview_rng = self.rng.clone();
        while out.len() < n {
            let bag = preview_rng.shuffled_bag();
            let take = n - out.len();
            out.extend(bag.iter().take(take).copied());
        }

        out
    }

    /// Pieces still to come in the current bag
    pub fn remaining_in_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index.min(7)..]
    }

    /// Seed the current sequence was started from
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
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
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut queue = PieceQueue::new(0);
        let mut drawn: Vec<_> = (0..7).map(|_| queue.draw()).collect();
        drawn.sort();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_piece_queue_initial() {
        let queue = PieceQueue::new(1);
        assert_eq!(queue.remaining_in_bag().len(), 7);
    }

    #[test]
    fn test_piece_queue_draws_all_seven() {
        let mut queue = PieceQueue::new(1);

        let drawn: Vec<_> = (0..7).map(|_| queue.draw()).collect();

        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert!(queue.remaining_in_bag().is_empty());
    }

    #[test]
    fn test_piece_queue_peek() {
        let mut queue = PieceQueue::new(1);

        let peeked = queue.peek();
        assert_eq!(peeked, queue.draw());
    }

    #[test]
    fn test_peek_after_seven_draws_previews_next_bag() {
        let mut queue = PieceQueue::new(1);

        for _ in 0..7 {
            let _ = queue.draw();
        }

        let peeked = queue.peek();
        assert_eq!(peeked, queue.draw());
    }

    #[test]
    fn test_peek_n_spans_several_bags() {
        let mut queue = PieceQueue::new(99);
        let _ = queue.draw();
        let _ = queue.draw();

        let preview = queue.peek_n(20);
        assert_eq!(preview.len(), 20);
        let drawn: Vec<_> = (0..20).map(|_| queue.draw()).collect();
        assert_eq!(preview, drawn);
    }

    #[test]
    fn test_peek_n_zero_is_empty() {
        let queue = PieceQueue::new(5);
        assert!(queue.peek_n(0).is_empty());
    }

    #[test]
    fn test_reset_with_seed_replays_sequence() {
        let mut queue = PieceQueue::new(7);
        let first: Vec<_> = (0..10).map(|_| queue.draw()).collect();

        queue.reset(Some(7));
        let again: Vec<_> = (0..10).map(|_| queue.draw()).collect();
        assert_eq!(first, again);
        assert_eq!(queue.seed(), 7);
    }
    #[test]
    fn test_start_new_bag_discards_partial_bag() {
        let mut queue = PieceQueue::new(11);
        queue.draw();
        queue.draw();
        queue.draw();
        let upcoming = queue.peek_n(7);
        queue.start_new_bag();
        assert_eq!(queue.remaining_in_bag().len(), 7);

        let mut drawn: Vec<_> = (0..7).map(|_| queue.draw()).collect();
        assert_eq!(drawn[..3], upcoming[4..]);
        drawn.sort();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_start_new_bag_on_boundary_keeps_sequence() {
        let mut queue = PieceQueue::new(11);
        let upcoming = queue.peek_n(7);
        queue.start_new_bag();
        let drawn: Vec<_> = (0..7).map(|_| queue.draw()).collect();
        assert_eq!(drawn, upcoming);
    }
}
