//! Correlation id generation
//!
//! Every request carries a string id that the daemon echoes back. Three
//! strategies are available:
//!
//! - [`IdStrategy::Counter`] (default): decimal counter per generator, starting
//!   at 1. Never repeats within one client handle.
//! - [`IdStrategy::Random`]: 64 random bits rendered as 16 hex digits.
//! - [`IdStrategy::UnixSeconds`]: current Unix time in whole seconds. Kept for
//!   compatibility with tooling that expects timestamp ids; two calls in the
//!   same second get the same id.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// How correlation ids are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Monotonically increasing decimal counter
    #[default]
    Counter,
    /// Random 64-bit token in hex
    Random,
    /// Wall-clock seconds since the Unix epoch, in decimal
    UnixSeconds,
}

/// Produces correlation ids for one client handle
#[derive(Debug, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
    counter: AtomicU64,
}

impl IdGenerator {
    /// Create a generator using the given strategy
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            counter: AtomicU64::new(0),
        }
    }

    /// The strategy in use
    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Produce the next id
    pub fn next_id(&self) -> String {
        match self.strategy {
            IdStrategy::Counter => (self.counter.fetch_add(1, Ordering::Relaxed) + 1).to_string(),
            IdStrategy::Random => format!("{:016x}", rand::random::<u64>()),
            IdStrategy::UnixSeconds => id_from_unix_seconds(unix_seconds_now()),
        }
    }
}

/// Render a Unix timestamp the way [`IdStrategy::UnixSeconds`] does
pub fn id_from_unix_seconds(seconds: u64) -> String {
    seconds.to_string()
}

fn unix_seconds_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
