//! Simulated uploads.

pub mod progress;
pub mod simulator;

pub use progress::{FailurePolicy, FixedProgress, NeverFail, ProgressSource, RandomProgress};
pub use simulator::{UploadOutcome, UploadSimulator};
