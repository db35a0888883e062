#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Item variants sold by the store and ticked by the game level.
//!
//! Every variant implements [`typer_core::Item`]. [`catalog`] builds the
//! prototype list the store duplicates from.

use std::time::Duration;

use typer_core::Item;

mod upgrade;
mod worker;

pub use upgrade::CpuUpgrade;
pub use worker::GoroutineWorker;

/// Timing knobs shared by every goroutine worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerTuning {
    base_wait: Duration,
    jitter_range: Duration,
}

impl WorkerTuning {
    /// Creates tuning from a base wait and the width of the random jitter added to it.
    #[must_use]
    pub const fn new(base_wait: Duration, jitter_range: Duration) -> Self {
        Self {
            base_wait,
            jitter_range,
        }
    }

    /// Wait between keystrokes before CPU upgrades are applied.
    #[must_use]
    pub const fn base_wait(&self) -> Duration {
        self.base_wait
    }

    /// Upper bound (exclusive) of the random delay added to each wait.
    #[must_use]
    pub const fn jitter_range(&self) -> Duration {
        self.jitter_range
    }
}

impl Default for WorkerTuning {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(500))
    }
}

/// Builds one prototype per item variant, in store display order.
#[must_use]
pub fn catalog(tuning: WorkerTuning) -> Vec<Box<dyn Item>> {
    vec![
        Box::new(GoroutineWorker::new(tuning)),
        Box::new(CpuUpgrade::new()),
    ]
}
