//! # dropvault-service
//!
//! The in-memory core of DropVault. [`Workspace`] owns every piece of
//! session state (the file/folder store, the upload simulator, the
//! selection, and the view controller) and is the single entry point for
//! commands. [`UploadDriver`] ticks a shared workspace from a tokio timer.
//!
//! All components are plain `&mut self` state machines; time is simulated
//! and advanced explicitly, so every behavior is deterministic under test.

pub mod driver;
pub mod selection;
pub mod store;
pub mod upload;
pub mod view;
pub mod workspace;

pub use driver::{DriverExit, UploadDriver};
pub use selection::Selection;
pub use store::FileStore;
pub use upload::{FailurePolicy, FixedProgress, NeverFail, ProgressSource, RandomProgress};
pub use upload::{UploadOutcome, UploadSimulator};
pub use view::ViewController;
pub use workspace::{Workspace, WorkspaceView};
