//! File and folder storage.

pub mod file_store;

pub use file_store::{CopiedFile, FileStore, MovedFile};
