//! Upload simulation events.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FolderId, UploadId};

/// Lifecycle events of a simulated upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UploadEvent {
    /// An upload was registered.
    Started {
        /// The upload ID.
        upload_id: UploadId,
        /// Name of the raw file.
        file_name: String,
        /// Folder captured when the upload was initiated.
        folder_id: FolderId,
    },
    /// Progress reached 100 and a file was materialized.
    Completed {
        /// The upload ID.
        upload_id: UploadId,
        /// The file created from it.
        file_id: FileId,
    },
    /// The failure hook rejected the upload.
    Failed {
        /// The upload ID.
        upload_id: UploadId,
        /// Name of the raw file.
        file_name: String,
        /// Progress reached before the failure.
        progress: f64,
    },
    /// A finished upload was removed from the active list.
    Dismissed {
        /// The upload ID.
        upload_id: UploadId,
    },
    /// A pending upload was dropped at teardown.
    Abandoned {
        /// The upload ID.
        upload_id: UploadId,
    },
}
