//! Implements RandomSource. Thread RNG for normal runs, seeded or fixed for reproducible ones.

use crate::ports::RandomSource;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fresh entropy on every call.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }
}

/// Deterministic sequence from a seed. Same seed, same replies.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len.max(1))
    }
}

/// Always returns the same index (wrapped into range). For tests.
#[derive(Debug, Default)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn next_index(&self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}

/// Walks 0, 1, 2, ... wrapping at each table's length. For tests that need to visit every entry.
#[derive(Debug, Default)]
pub struct CyclingRandom {
    next: AtomicUsize,
}

impl RandomSource for CyclingRandom {
    fn next_index(&self, len: usize) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed) % len.max(1)
    }
}
