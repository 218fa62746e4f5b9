//! File-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FileVersionId, FolderId};

/// Events related to file operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileEvent {
    /// A file was materialized by a finished upload.
    Uploaded {
        /// The file ID.
        file_id: FileId,
        /// The folder containing the file.
        folder_id: FolderId,
        /// The file name.
        name: String,
        /// The file size in bytes.
        size_bytes: u64,
    },
    /// A file was deleted.
    Deleted {
        /// The file ID.
        file_id: FileId,
        /// The file name (for display after deletion).
        name: String,
        /// The folder it was in.
        folder_id: FolderId,
    },
    /// A file was moved.
    Moved {
        /// The file ID.
        file_id: FileId,
        /// The source folder.
        from_folder_id: FolderId,
        /// The destination folder.
        to_folder_id: FolderId,
    },
    /// A file was copied.
    Copied {
        /// The original file ID.
        source_file_id: FileId,
        /// The new copy file ID.
        new_file_id: FileId,
        /// The destination folder.
        to_folder_id: FolderId,
    },
    /// A file was reverted, producing a new current version.
    VersionReverted {
        /// The file ID.
        file_id: FileId,
        /// The version whose content was restored.
        source_version_id: FileVersionId,
        /// The number of the newly appended version.
        version_number: u32,
    },
}
