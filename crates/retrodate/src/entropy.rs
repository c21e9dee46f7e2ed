// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Sources of randomness for scheduling
//!
//! Everything random in a run (the shuffle, commit times, template choice)
//! goes through [`Entropy`], so tests can substitute [`ScriptedEntropy`] and
//! the CLI can pin a seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Uniform random draws used by the synthesizer
pub trait Entropy {
    /// A value uniformly drawn from `low..=high`
    fn between(&mut self, low: u32, high: u32) -> u32;

    /// An index uniformly drawn from `0..len`; `0` when `len` is zero
    fn index(&mut self, len: usize) -> usize;

    /// Shuffle `items` in place
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// [`Entropy`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomEntropy<R = StdRng> {
    rng: R,
}

impl RandomEntropy<StdRng> {
    /// Deterministic generator; the same seed yields the same run
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system
    #[must_use]
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomEntropy<R> {
    /// Wrap an existing generator
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Entropy for RandomEntropy<R> {
    fn between(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// [`Entropy`] that replays a fixed list of values, for tests
///
/// Each draw takes the next scripted value (cycling when exhausted) and folds
/// it into the requested range. Shuffling leaves the order untouched.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEntropy {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedEntropy {
    /// Replay `values` in order
    #[must_use]
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    fn next_value(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

impl Entropy for ScriptedEntropy {
    fn between(&mut self, low: u32, high: u32) -> u32 {
        let value = self.next_value();
        if low >= high {
            return low;
        }
        low + value % (high - low + 1)
    }

    fn index(&mut self, len: usize) -> usize {
        let value = self.next_value() as usize;
        if len == 0 { 0 } else { value % len }
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
