//! Shared value types: identifiers and simulated time.

pub mod id;
pub mod time;

pub use id::{FileId, FileVersionId, FolderId, UploadId};
pub use time::SimInstant;
