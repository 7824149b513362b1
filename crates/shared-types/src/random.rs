//! Randomness port.
//!
//! Stores draw jitter through [`RandomSource`] instead of calling `rand`
//! directly, so tick behavior is reproducible under a seeded or scripted
//! source.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniform random draws.
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Uniform draw in `[low, high)`.
    fn uniform(&self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }

    /// Uniform integer in `[0, bound)`. Returns 0 for a zero bound.
    fn below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        ((self.next_unit() * bound as f64) as u64).min(bound - 1)
    }

    /// True with probability `p`.
    fn chance(&self, p: f64) -> bool {
        self.next_unit() > 1.0 - p
    }
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Deterministic RNG seeded once.
#[derive(Debug)]
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
    fn next_unit(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`.
#[derive(Debug)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Always returns the same draw.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst) % self.values.len();
        self.values[index].clamp(0.0, 1.0 - f64::EPSILON)
    }
}
