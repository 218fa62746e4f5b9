//! # dropvault-entity
//!
//! Domain entity models for DropVault. Every struct in this crate is a
//! plain in-memory value: files and their version history, folders,
//! transient upload tasks, and the view-state enums the presentation layer
//! reads. All entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`.

pub mod file;
pub mod folder;
pub mod upload;
pub mod view;
