//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropvault_core::types::FileVersionId;

use super::content::ContentRef;

/// A snapshot of a file's content at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileVersion {
    /// Unique version identifier.
    pub id: FileVersionId,
    /// Sequential version number, starting at 1.
    pub version_number: u32,
    /// When this version was created.
    pub timestamp: DateTime<Utc>,
    /// Size in bytes.
    pub size: u64,
    /// This version's content.
    pub content_ref: ContentRef,
    /// Preview image, for image files.
    pub thumbnail_ref: Option<ContentRef>,
    /// Whether the owning file currently mirrors this version.
    pub is_current_version: bool,
}

impl FileVersion {
    /// The first version of a freshly uploaded file.
    pub fn initial(
        size: u64,
        content_ref: ContentRef,
        thumbnail_ref: Option<ContentRef>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FileVersionId::new(),
            version_number: 1,
            timestamp,
            size,
            content_ref,
            thumbnail_ref,
            is_current_version: true,
        }
    }

    /// A new current version carrying `source`'s content under a new number.
    pub fn restored_from(source: &FileVersion, version_number: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: FileVersionId::new(),
            version_number,
            timestamp,
            size: source.size,
            content_ref: source.content_ref.clone(),
            thumbnail_ref: source.thumbnail_ref.clone(),
            is_current_version: true,
        }
    }

    /// The same snapshot under a fresh identity, for copied files.
    pub fn duplicate(&self) -> Self {
        Self {
            id: FileVersionId::new(),
            ..self.clone()
        }
    }
}
