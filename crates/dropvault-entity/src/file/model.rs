//! File entity model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropvault_core::types::{FileId, FileVersionId, FolderId};

use super::category::FileCategory;
use super::content::{ContentRef, RawFile};
use super::version::FileVersion;

/// A file held by the workspace, with its full version history.
///
/// The top-level `size`, `content_ref` and `thumbnail_ref` always mirror
/// the version flagged `is_current_version`, whose number is
/// `current_version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntity {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub name: String,
    /// Size of the current version in bytes.
    pub size: u64,
    /// Category derived from the name.
    #[serde(rename = "type")]
    pub category: FileCategory,
    /// When the file was uploaded (or copied).
    pub upload_date: DateTime<Utc>,
    /// The folder containing this file.
    pub folder_id: FolderId,
    /// Free-form tags. Nothing assigns them yet.
    pub tags: BTreeSet<String>,
    /// Content of the current version.
    pub content_ref: ContentRef,
    /// Thumbnail of the current version, for images.
    pub thumbnail_ref: Option<ContentRef>,
    /// Version history, oldest first.
    pub versions: Vec<FileVersion>,
    /// Number of the current version.
    pub current_version: u32,
}

impl FileEntity {
    /// Materialize a file from a finished upload, with a single initial version.
    pub fn from_upload(raw: &RawFile, folder_id: FolderId, now: DateTime<Utc>) -> Self {
        let content_ref = ContentRef::object_url();
        let thumbnail_ref = raw.is_image().then(|| content_ref.clone());
        let initial = FileVersion::initial(raw.size, content_ref.clone(), thumbnail_ref.clone(), now);

        Self {
            id: FileId::new(),
            name: raw.name.clone(),
            size: raw.size,
            category: FileCategory::from_file_name(&raw.name),
            upload_date: now,
            folder_id,
            tags: BTreeSet::new(),
            content_ref,
            thumbnail_ref,
            versions: vec![initial],
            current_version: 1,
        }
    }

    /// Look up a version of this file.
    pub fn version(&self, id: FileVersionId) -> Option<&FileVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Append `version` as the new current version and mirror it at the top level.
    pub fn push_current_version(&mut self, version: FileVersion) {
        for existing in &mut self.versions {
            existing.is_current_version = false;
        }
        self.size = version.size;
        self.content_ref = version.content_ref.clone();
        self.thumbnail_ref = version.thumbnail_ref.clone();
        self.current_version = version.version_number;
        self.versions.push(version);
    }

    /// Check the version invariants: exactly one current version, whose
    /// number and content the top-level fields mirror.
    pub fn is_consistent(&self) -> bool {
        let mut current = self.versions.iter().filter(|v| v.is_current_version);
        match (current.next(), current.next()) {
            (Some(v), None) => {
                v.version_number == self.current_version
                    && v.content_ref == self.content_ref
                    && v.thumbnail_ref == self.thumbnail_ref
                    && v.size == self.size
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, size: u64, mime: Option<&str>) -> RawFile {
        RawFile::new(name, size, mime.map(String::from))
    }

    #[test]
    fn test_from_upload_creates_single_current_version() {
        let file = FileEntity::from_upload(
            &raw("report.pdf", 1000, Some("application/pdf")),
            FolderId::from("root"),
            Utc::now(),
        );
        assert_eq!(file.category, FileCategory::Pdf);
        assert_eq!(file.size, 1000);
        assert_eq!(file.versions.len(), 1);
        assert!(file.versions[0].is_current_version);
        assert_eq!(file.versions[0].version_number, 1);
        assert_eq!(file.current_version, 1);
        assert!(file.thumbnail_ref.is_none());
        assert!(file.tags.is_empty());
        assert!(file.is_consistent());
    }

    #[test]
    fn test_images_get_a_thumbnail() {
        let file = FileEntity::from_upload(
            &raw("cat.png", 20, Some("image/png")),
            FolderId::from("images"),
            Utc::now(),
        );
        assert_eq!(file.thumbnail_ref.as_ref(), Some(&file.content_ref));
    }

    #[test]
    fn test_push_current_version_mirrors_fields() {
        let mut file = FileEntity::from_upload(&raw("a.txt", 5, None), FolderId::from("root"), Utc::now());
        let first = file.versions[0].clone();
        let mut changed = FileVersion::restored_from(&first, 2, Utc::now());
        changed.size = 99;
        file.push_current_version(changed);

        assert_eq!(file.current_version, 2);
        assert_eq!(file.size, 99);
        assert!(!file.versions[0].is_current_version);
        assert_eq!(file.versions.len(), 2);
        assert!(file.is_consistent());
    }

    #[test]
    fn test_serializes_category_as_type() {
        let file = FileEntity::from_upload(&raw("a.zip", 5, None), FolderId::from("root"), Utc::now());
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "archive");
        assert_eq!(json["folder_id"], "root");
    }
}
