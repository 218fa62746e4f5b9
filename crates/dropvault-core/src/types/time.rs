//! Simulated time.
//!
//! Upload progress is driven by an external clock so that tests can step
//! time deterministically. [`SimInstant`] counts milliseconds since the
//! session started.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A point on the simulated session clock, in milliseconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimInstant(u64);

impl SimInstant {
    /// The start of the session.
    pub const ZERO: SimInstant = SimInstant(0);

    /// Construct from a millisecond offset.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since session start.
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl Add<Duration> for SimInstant {
    type Output = SimInstant;

    fn add(self, rhs: Duration) -> SimInstant {
        let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        SimInstant(self.0.saturating_add(millis))
    }
}

impl AddAssign<Duration> for SimInstant {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl fmt::Display for SimInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}
