//! Random number implementations of the domain's `RandomPort`.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sheetsmith_domain::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Reproducible randomness from a fixed seed.
pub struct SeededRandom(RefCell<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(RefCell::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.borrow_mut().gen_range(min..=max)
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        self.0
    }
}

/// Replays a script of values in order, then repeats the last one.
#[cfg(test)]
pub struct ScriptedRandom {
    values: Vec<i32>,
    cursor: std::cell::Cell<usize>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            cursor: std::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_range(&self, min: i32, _max: i32) -> i32 {
        let i = self.cursor.get();
        self.cursor.set(i + 1);
        self.values
            .get(i)
            .or(self.values.last())
            .copied()
            .unwrap_or(min)
    }
}
