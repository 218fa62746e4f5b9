//! Pluggable sources of progress increments and upload failures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dropvault_entity::upload::UploadTask;

/// Produces the progress increment applied on each tick.
///
/// Implementations should return a value in `(0, max]`; the simulator
/// clamps anything outside that range.
pub trait ProgressSource: Send {
    /// The next increment, in percent.
    fn next_increment(&mut self, max: f64) -> f64;
}

impl<F> ProgressSource for F
where
    F: FnMut(f64) -> f64 + Send,
{
    fn next_increment(&mut self, max: f64) -> f64 {
        self(max)
    }
}

/// Uniformly random increments, the default.
#[derive(Debug)]
pub struct RandomProgress {
    rng: StdRng,
}

impl RandomProgress {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomProgress {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ProgressSource for RandomProgress {
    fn next_increment(&mut self, max: f64) -> f64 {
        let max = max.max(f64::MIN_POSITIVE);
        self.rng.gen_range(f64::MIN_POSITIVE..=max)
    }
}

/// The same increment on every tick.
#[derive(Debug, Clone, Copy)]
pub struct FixedProgress(pub f64);

impl ProgressSource for FixedProgress {
    fn next_increment(&mut self, _max: f64) -> f64 {
        self.0
    }
}

/// Decides, on each tick, whether an upload fails.
pub trait FailurePolicy: Send {
    /// Return `true` to fail `task` on this tick.
    fn should_fail(&mut self, task: &UploadTask) -> bool;
}

impl<F> FailurePolicy for F
where
    F: FnMut(&UploadTask) -> bool + Send,
{
    fn should_fail(&mut self, task: &UploadTask) -> bool {
        self(task)
    }
}

/// Uploads always succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FailurePolicy for NeverFail {
    fn should_fail(&mut self, _task: &UploadTask) -> bool {
        false
    }
}
