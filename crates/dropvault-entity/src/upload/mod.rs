//! Transient upload records.

pub mod task;

pub use task::{UploadStatus, UploadTask};
