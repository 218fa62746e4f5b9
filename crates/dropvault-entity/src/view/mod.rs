//! View-state value types shared with the presentation layer.

pub mod dialog;
pub mod mode;

pub use dialog::{Dialog, DialogCloseReason};
pub use mode::ViewMode;
