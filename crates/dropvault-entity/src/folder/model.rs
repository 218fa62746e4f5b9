//! Folder entity model.

use serde::{Deserialize, Serialize};

use dropvault_core::config::workspace::FolderSeed;
use dropvault_core::types::FolderId;

/// A folder in the (seeded, static) hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder slug.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// Parent folder ID (null for the root).
    pub parent_id: Option<FolderId>,
    /// Number of files directly inside this folder.
    pub file_count: u64,
}

impl Folder {
    /// Create an empty folder.
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            file_count: 0,
        }
    }

    /// Check if this is the root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the folder appears in the one-level navigation bar:
    /// the root itself or a direct child of `root`.
    pub fn is_navigable(&self, root: &FolderId) -> bool {
        self.is_root() || self.parent_id.as_ref() == Some(root)
    }
}

impl From<&FolderSeed> for Folder {
    fn from(seed: &FolderSeed) -> Self {
        Self::new(
            seed.id.as_str(),
            seed.name.clone(),
            seed.parent_id.as_deref().map(FolderId::from),
        )
    }
}
