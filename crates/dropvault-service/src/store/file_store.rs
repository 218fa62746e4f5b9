//! In-memory file and folder store with version history operations.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use dropvault_core::config::workspace::WorkspaceConfig;
use dropvault_core::AppResult;
use dropvault_core::error::AppError;
use dropvault_core::types::{FileId, FileVersionId, FolderId};
use dropvault_entity::file::{FileEntity, FileVersion};
use dropvault_entity::folder::Folder;

/// Result of moving one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    /// The moved file.
    pub file_id: FileId,
    /// Where it was before.
    pub from_folder_id: FolderId,
}

/// Result of copying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    /// The original.
    pub source_file_id: FileId,
    /// The new copy.
    pub new_file_id: FileId,
}

/// Owns every folder and file of a session.
///
/// Operations over id sets skip ids that do not exist. Destination folders
/// are validated and a missing one fails with `InvalidTarget` before
/// anything changes.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Sentinel root folder.
    root: FolderId,
    /// Static folder set, in seed order.
    folders: Vec<Folder>,
    /// Files in insertion order.
    files: Vec<FileEntity>,
}

impl FileStore {
    /// Creates a store seeded with the configured folders and no files.
    pub fn new(config: &WorkspaceConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            root: FolderId::from(config.root_folder.as_str()),
            folders: config.folders.iter().map(Folder::from).collect(),
            files: Vec::new(),
        })
    }

    /// The root folder's id.
    pub fn root_id(&self) -> &FolderId {
        &self.root
    }

    /// All folders, in seed order.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Look up a folder.
    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    /// Folders reachable from the navigation bar: the root and its direct children.
    pub fn navigable_folders(&self) -> Vec<&Folder> {
        self.folders
            .iter()
            .filter(|f| f.is_navigable(&self.root))
            .collect()
    }

    /// All files, in insertion order.
    pub fn files(&self) -> &[FileEntity] {
        &self.files
    }

    /// Look up a file.
    pub fn file(&self, id: FileId) -> Option<&FileEntity> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Files directly inside `folder_id`, in insertion order.
    pub fn files_in(&self, folder_id: &FolderId) -> Vec<&FileEntity> {
        self.files
            .iter()
            .filter(|f| &f.folder_id == folder_id)
            .collect()
    }

    /// The version history of a file, oldest first.
    pub fn versions(&self, file_id: FileId) -> AppResult<&[FileVersion]> {
        self.file(file_id)
            .map(|f| f.versions.as_slice())
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Appends a file. Names need not be unique within a folder.
    pub fn add(&mut self, file: FileEntity) -> FileId {
        let id = file.id;
        info!(
            file_id = %id,
            folder_id = %file.folder_id,
            name = %file.name,
            size = file.size,
            "File added"
        );
        self.files.push(file);
        self.refresh_file_counts();
        id
    }

    /// Removes every file whose id is in `ids` and returns the removed files.
    ///
    /// Unknown ids are ignored; an empty set leaves the store untouched.
    pub fn delete(&mut self, ids: &[FileId]) -> Vec<FileEntity> {
        if ids.is_empty() {
            return Vec::new();
        }
        let wanted: HashSet<FileId> = ids.iter().copied().collect();

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|f| wanted.contains(&f.id));
        self.files = kept;

        if !removed.is_empty() {
            self.refresh_file_counts();
        }
        info!(
            requested = ids.len(),
            removed = removed.len(),
            "Files deleted"
        );
        removed
    }

    /// Reassigns `folder_id` of every matching file to `target`. No other field changes.
    pub fn move_files(
        &mut self,
        ids: &[FileId],
        target: &FolderId,
    ) -> AppResult<Vec<MovedFile>> {
        self.require_folder(target)?;
        let wanted: HashSet<FileId> = ids.iter().copied().collect();

        let mut moved = Vec::new();
        for file in self.files.iter_mut().filter(|f| wanted.contains(&f.id)) {
            let from_folder_id = std::mem::replace(&mut file.folder_id, target.clone());
            moved.push(MovedFile {
                file_id: file.id,
                from_folder_id,
            });
        }

        self.refresh_file_counts();
        info!(to_folder = %target, moved = moved.len(), "Files moved");
        Ok(moved)
    }

    /// Appends a copy of every matching file into `target`.
    ///
    /// Each copy gets a new id, the name `"Copy of <name>"`, `upload_date = now`,
    /// and its own deep copy of the version history (fresh version ids).
    pub fn copy_files(
        &mut self,
        ids: &[FileId],
        target: &FolderId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<CopiedFile>> {
        self.require_folder(target)?;
        let wanted: HashSet<FileId> = ids.iter().copied().collect();

        let (copied, copies): (Vec<CopiedFile>, Vec<FileEntity>) = self
            .files
            .iter()
            .filter(|f| wanted.contains(&f.id))
            .map(|source| {
                let copy = duplicate(source, target, now);
                let record = CopiedFile {
                    source_file_id: source.id,
                    new_file_id: copy.id,
                };
                (record, copy)
            })
            .unzip();

        self.files.extend(copies);
        self.refresh_file_counts();
        info!(to_folder = %target, copied = copied.len(), "Files copied");
        Ok(copied)
    }

    /// Restores the content of `version_id` as a new current version.
    ///
    /// The new version is numbered `current_version + 1`; every earlier
    /// version loses its current flag; the file's top-level content,
    /// thumbnail, and size mirror the new version. Nothing changes if the
    /// file or version does not exist.
    pub fn revert_to_version(
        &mut self,
        file_id: FileId,
        version_id: FileVersionId,
        now: DateTime<Utc>,
    ) -> AppResult<FileVersion> {
        let file = self
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;

        let source = file.version(version_id).ok_or_else(|| {
            AppError::not_found(format!("Version {version_id} of file {file_id} not found"))
        })?;

        let version = FileVersion::restored_from(source, file.current_version + 1, now);
        file.push_current_version(version.clone());

        info!(
            file_id = %file_id,
            source_version = %version_id,
            version = version.version_number,
            "File reverted"
        );
        Ok(version)
    }

    fn require_folder(&self, id: &FolderId) -> AppResult<()> {
        if self.folder(id).is_some() {
            Ok(())
        } else {
            Err(AppError::invalid_target(format!("Folder '{id}' does not exist")))
        }
    }

    fn refresh_file_counts(&mut self) {
        for folder in &mut self.folders {
            folder.file_count = self
                .files
                .iter()
                .filter(|f| f.folder_id == folder.id)
                .count() as u64;
        }
        debug!(files = self.files.len(), "Folder file counts refreshed");
    }
}

fn duplicate(source: &FileEntity, target: &FolderId, now: DateTime<Utc>) -> FileEntity {
    FileEntity {
        id: FileId::new(),
        name: format!("Copy of {}", source.name),
        upload_date: now,
        folder_id: target.clone(),
        versions: source.versions.iter().map(FileVersion::duplicate).collect(),
        ..source.clone()
    }
}
