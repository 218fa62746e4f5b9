//! # dropvault-core
//!
//! Core crate for DropVault. Contains configuration schemas, typed
//! identifiers, simulated time, domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DropVault crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
