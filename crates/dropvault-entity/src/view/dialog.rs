//! Modal dialogs.

use serde::{Deserialize, Serialize};

use dropvault_core::types::FileId;

/// The modal dialog currently shown. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dialog {
    /// Confirm deletion of the selected files.
    DeleteConfirm,
    /// Choose a destination folder for the selected files.
    Move,
    /// Choose a destination folder for copies of the selected files.
    Copy,
    /// Browse and restore versions of one file.
    VersionHistory {
        /// The file whose history is shown.
        file_id: FileId,
    },
}

impl Dialog {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeleteConfirm => "delete_confirm",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::VersionHistory { .. } => "version_history",
        }
    }

    /// Whether the dialog acts on the current selection.
    pub fn needs_selection(&self) -> bool {
        matches!(self, Self::DeleteConfirm | Self::Move | Self::Copy)
    }
}

/// Why a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogCloseReason {
    /// The cancel button.
    Cancel,
    /// A click on the backdrop.
    Backdrop,
    /// The "X" button.
    Dismiss,
    /// The confirmed action finished.
    Completed,
}
