//! The owned application state of one session.
//!
//! [`Workspace`] composes the store, the upload simulator, the selection,
//! and the view controller, and keeps the simulated clock. Every command
//! goes through it; the presentation layer reads [`WorkspaceView`]
//! snapshots and drains notifications.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_core::events::{DomainEvent, EventPayload, FileEvent, Notification, UploadEvent};
use dropvault_core::types::{FileId, FileVersionId, FolderId, SimInstant, UploadId};
use dropvault_entity::file::{FileEntity, FileVersion, RawFile};
use dropvault_entity::folder::Folder;
use dropvault_entity::upload::{UploadStatus, UploadTask};
use dropvault_entity::view::{Dialog, DialogCloseReason, ViewMode};

use crate::selection::Selection;
use crate::store::FileStore;
use crate::upload::{FailurePolicy, NeverFail, ProgressSource, RandomProgress};
use crate::upload::{UploadOutcome, UploadSimulator};
use crate::view::ViewController;

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceView {
    /// Simulated session time of the snapshot.
    pub now: SimInstant,
    /// Grid or list.
    pub view_mode: ViewMode,
    /// The folder being shown.
    pub current_folder: Folder,
    /// Folders in the navigation bar.
    pub folders: Vec<Folder>,
    /// Files of the current folder.
    pub visible_files: Vec<FileEntity>,
    /// Active uploads.
    pub uploads: Vec<UploadTask>,
    /// Selected file ids.
    pub selection: Vec<FileId>,
    /// The open dialog.
    pub dialog: Option<Dialog>,
    /// Version history of the file targeted by an open history dialog.
    pub version_history: Option<Vec<FileVersion>>,
    /// Whether files are dragged over the drop zone.
    pub drag_active: bool,
}

/// All state of one file-manager session.
#[derive(Debug)]
pub struct Workspace {
    now: SimInstant,
    store: FileStore,
    uploads: UploadSimulator,
    selection: Selection,
    view: ViewController,
    notifications: Vec<Notification>,
    events: Vec<DomainEvent>,
}

impl Workspace {
    /// Creates a session with random upload progress.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_sources(config, RandomProgress::from_entropy(), NeverFail)
    }

    /// Creates a session with explicit progress and failure sources.
    pub fn with_sources(
        config: &AppConfig,
        progress: impl ProgressSource + 'static,
        failure: impl FailurePolicy + 'static,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let store = FileStore::new(&config.workspace)?;
        let view_mode: ViewMode = config.workspace.default_view.parse()?;
        let root = store.root_id().clone();

        Ok(Self {
            now: SimInstant::ZERO,
            uploads: UploadSimulator::with_sources(config.simulator.clone(), progress, failure),
            selection: Selection::new(root.clone()),
            view: ViewController::new(root, view_mode),
            store,
            notifications: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Current simulated time.
    pub fn now(&self) -> SimInstant {
        self.now
    }

    /// The file and folder store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// The upload simulator.
    pub fn uploads(&self) -> &UploadSimulator {
        &self.uploads
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The view controller.
    pub fn view_controller(&self) -> &ViewController {
        &self.view
    }

    /// Every event recorded so far, oldest first.
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Takes the pending notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Files of the current folder.
    pub fn visible_files(&self) -> Vec<&FileEntity> {
        self.view.visible_files(&self.store)
    }

    // ── Uploads ──────────────────────────────────────────────────────

    /// Starts a simulated upload for each file into the current folder.
    pub fn upload(&mut self, files: Vec<RawFile>) -> Vec<UploadId> {
        let folder_id = self.view.current_folder().clone();
        files
            .into_iter()
            .map(|raw| {
                let file_name = raw.name.clone();
                let upload_id = self.uploads.register(raw, folder_id.clone(), self.now);
                self.record(UploadEvent::Started {
                    upload_id,
                    file_name,
                    folder_id: folder_id.clone(),
                });
                upload_id
            })
            .collect()
    }

    /// Files are being dragged over the drop zone.
    pub fn drag_over(&mut self) {
        self.view.set_drag_active(true);
    }

    /// The drag left the drop zone.
    pub fn drag_leave(&mut self) {
        self.view.set_drag_active(false);
    }

    /// Files were dropped: clears the drag state and uploads them.
    pub fn drop_files(&mut self, files: Vec<RawFile>) -> Vec<UploadId> {
        self.view.set_drag_active(false);
        self.upload(files)
    }

    /// Moves the simulated clock forward by `delta` and applies every
    /// upload tick and dismissal that falls due.
    pub fn advance(&mut self, delta: Duration) {
        self.advance_to(self.now + delta);
    }

    /// Moves the simulated clock to `at` (never backwards).
    pub fn advance_to(&mut self, at: SimInstant) {
        self.now = self.now.max(at);
        for outcome in self.uploads.advance(self.now, Utc::now()) {
            self.apply_upload_outcome(outcome);
        }
    }

    fn apply_upload_outcome(&mut self, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Completed {
                upload_id,
                file,
                at,
            } => {
                let event = FileEvent::Uploaded {
                    file_id: file.id,
                    folder_id: file.folder_id.clone(),
                    name: file.name.clone(),
                    size_bytes: file.size,
                };
                let file_id = self.store.add(file);
                self.record_at(at, UploadEvent::Completed { upload_id, file_id });
                self.record_at(at, event);
            }
            UploadOutcome::Failed {
                upload_id,
                file_name,
                progress,
                at,
            } => {
                self.record_at(
                    at,
                    UploadEvent::Failed {
                        upload_id,
                        file_name,
                        progress,
                    },
                );
            }
            UploadOutcome::Dismissed {
                upload_id,
                file_name,
                status,
                at,
            } => {
                let notification = match status {
                    UploadStatus::Failed => {
                        Notification::error(format!("{file_name} failed to upload"), at)
                    }
                    _ => Notification::success(format!("{file_name} uploaded successfully!"), at),
                };
                self.notify(notification);
                self.record_at(at, UploadEvent::Dismissed { upload_id });
            }
        }
    }

    /// Drops every pending upload. Returns how many were abandoned.
    pub fn shutdown(&mut self) -> usize {
        let abandoned = self.uploads.shutdown();
        for upload_id in &abandoned {
            self.record(UploadEvent::Abandoned {
                upload_id: *upload_id,
            });
        }
        abandoned.len()
    }

    // ── Navigation and view ──────────────────────────────────────────

    /// Shows `folder`. The selection moves with it and is emptied.
    pub fn navigate(&mut self, folder: &FolderId) -> Result<(), AppError> {
        if self.store.folder(folder).is_none() {
            warn!(folder_id = %folder, "Navigation to unknown folder");
            return Err(AppError::not_found(format!("Folder '{folder}' not found")));
        }
        self.view.navigate(folder.clone());
        self.selection.rescope(folder.clone());
        Ok(())
    }

    /// Switches between grid and list.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view.set_view_mode(mode);
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Toggles a visible file; returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, file_id: FileId) -> Result<bool, AppError> {
        let visible = self
            .store
            .file(file_id)
            .is_some_and(|f| &f.folder_id == self.selection.folder_id());
        if !visible {
            return Err(AppError::not_found(format!(
                "File {file_id} is not in the current folder"
            )));
        }
        Ok(self.selection.toggle(file_id))
    }

    /// Selects exactly the visible files.
    pub fn select_all(&mut self) {
        let visible: Vec<FileId> = self.visible_files().iter().map(|f| f.id).collect();
        self.selection.select_all(visible);
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Dialogs ──────────────────────────────────────────────────────

    /// Opens a dialog. Delete, move and copy require a non-empty selection;
    /// version history requires an existing file.
    pub fn open_dialog(&mut self, dialog: Dialog) -> Result<(), AppError> {
        if dialog.needs_selection() && self.selection.is_empty() {
            return Err(AppError::validation(format!(
                "'{}' needs at least one selected file",
                dialog.name()
            )));
        }
        if let Dialog::VersionHistory { file_id } = dialog {
            if self.store.file(file_id).is_none() {
                return Err(AppError::not_found(format!("File {file_id} not found")));
            }
        }
        self.view.open(dialog)
    }

    /// Closes the open dialog without acting.
    pub fn close_dialog(&mut self, reason: DialogCloseReason) -> Option<Dialog> {
        self.view.close(reason)
    }

    /// Deletes the selection from an open delete-confirm dialog.
    pub fn confirm_delete(&mut self) -> Result<usize, AppError> {
        self.require_dialog(|d| matches!(d, Dialog::DeleteConfirm))?;
        let count = self.delete_selected();
        self.view.close(DialogCloseReason::Completed);
        Ok(count)
    }

    /// Moves the selection from an open move dialog.
    pub fn confirm_move(&mut self, target: &FolderId) -> Result<usize, AppError> {
        self.require_dialog(|d| matches!(d, Dialog::Move))?;
        let count = self.move_selected(target)?;
        self.view.close(DialogCloseReason::Completed);
        Ok(count)
    }

    /// Copies the selection from an open copy dialog.
    pub fn confirm_copy(&mut self, target: &FolderId) -> Result<usize, AppError> {
        self.require_dialog(|d| matches!(d, Dialog::Copy))?;
        let count = self.copy_selected(target)?;
        self.view.close(DialogCloseReason::Completed);
        Ok(count)
    }

    /// Restores a version of the file shown in the open history dialog.
    pub fn revert_to_version(&mut self, version_id: FileVersionId) -> Result<FileVersion, AppError> {
        let file_id = match self.view.dialog() {
            Some(Dialog::VersionHistory { file_id }) => *file_id,
            _ => return Err(AppError::conflict("No version history dialog is open")),
        };
        let version = self.revert(file_id, version_id)?;
        self.view.close(DialogCloseReason::Completed);
        Ok(version)
    }

    fn require_dialog(&self, expected: impl Fn(&Dialog) -> bool) -> Result<(), AppError> {
        match self.view.dialog() {
            Some(dialog) if expected(dialog) => Ok(()),
            Some(dialog) => Err(AppError::conflict(format!(
                "The '{}' dialog is open instead",
                dialog.name()
            ))),
            None => Err(AppError::conflict("No dialog is open")),
        }
    }

    // ── File operations ──────────────────────────────────────────────

    /// Deletes the selected files and clears the selection. Returns how
    /// many files were removed; an empty selection does nothing. A version
    /// history dialog showing a deleted file is closed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let ids = self.selection.to_vec();
        let removed = self.store.delete(&ids);
        for file in &removed {
            self.record(FileEvent::Deleted {
                file_id: file.id,
                name: file.name.clone(),
                folder_id: file.folder_id.clone(),
            });
        }
        self.selection.clear();
        let shown = match self.view.dialog() {
            Some(Dialog::VersionHistory { file_id }) => Some(*file_id),
            _ => None,
        };
        if shown.is_some_and(|shown| removed.iter().any(|f| f.id == shown)) {
            self.view.close(DialogCloseReason::Dismiss);
        }
        self.notify(Notification::success(
            format!("{} file(s) deleted successfully!", ids.len()),
            self.now,
        ));
        removed.len()
    }

    /// Moves the selected files into `target` and clears the selection.
    /// An empty selection does nothing.
    pub fn move_selected(&mut self, target: &FolderId) -> Result<usize, AppError> {
        if self.selection.is_empty() {
            return Ok(0);
        }
        let ids = self.selection.to_vec();
        let moved = self.store.move_files(&ids, target)?;
        for entry in &moved {
            self.record(FileEvent::Moved {
                file_id: entry.file_id,
                from_folder_id: entry.from_folder_id.clone(),
                to_folder_id: target.clone(),
            });
        }
        self.selection.clear();
        let folder_name = self.folder_name(target);
        self.notify(Notification::success(
            format!("{} file(s) moved to {folder_name}", moved.len()),
            self.now,
        ));
        Ok(moved.len())
    }

    /// Copies the selected files into `target` and clears the selection.
    /// An empty selection does nothing.
    pub fn copy_selected(&mut self, target: &FolderId) -> Result<usize, AppError> {
        if self.selection.is_empty() {
            return Ok(0);
        }
        let ids = self.selection.to_vec();
        let copied = self.store.copy_files(&ids, target, Utc::now())?;
        for entry in &copied {
            self.record(FileEvent::Copied {
                source_file_id: entry.source_file_id,
                new_file_id: entry.new_file_id,
                to_folder_id: target.clone(),
            });
        }
        self.selection.clear();
        let folder_name = self.folder_name(target);
        self.notify(Notification::success(
            format!("{} file(s) copied to {folder_name}", copied.len()),
            self.now,
        ));
        Ok(copied.len())
    }

    /// Restores `version_id` of `file_id` as a new current version.
    pub fn revert(
        &mut self,
        file_id: FileId,
        version_id: FileVersionId,
    ) -> Result<FileVersion, AppError> {
        let version = self.store.revert_to_version(file_id, version_id, Utc::now())?;
        let name = self
            .store
            .file(file_id)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        self.record(FileEvent::VersionReverted {
            file_id,
            source_version_id: version_id,
            version_number: version.version_number,
        });
        self.notify(Notification::success(
            format!("Reverted {name} to version {}", version.version_number),
            self.now,
        ));
        Ok(version)
    }

    // ── Read side ────────────────────────────────────────────────────

    /// Snapshot of everything the presentation layer renders.
    pub fn view(&self) -> WorkspaceView {
        let current = self.view.current_folder();
        let current_folder = self
            .store
            .folder(current)
            .cloned()
            .unwrap_or_else(|| Folder::new(current.clone(), current.to_string(), None));

        let version_history = match self.view.dialog() {
            Some(Dialog::VersionHistory { file_id }) => {
                self.store.versions(*file_id).ok().map(<[FileVersion]>::to_vec)
            }
            _ => None,
        };

        WorkspaceView {
            now: self.now,
            view_mode: self.view.view_mode(),
            current_folder,
            folders: self.store.navigable_folders().into_iter().cloned().collect(),
            visible_files: self.visible_files().into_iter().cloned().collect(),
            uploads: self.uploads.tasks().cloned().collect(),
            selection: self.selection.to_vec(),
            dialog: self.view.dialog().copied(),
            version_history,
            drag_active: self.view.is_drag_active(),
        }
    }

    fn folder_name(&self, id: &FolderId) -> String {
        self.store
            .folder(id)
            .map_or_else(|| id.to_string(), |f| f.name.clone())
    }

    fn notify(&mut self, notification: Notification) {
        info!(level = ?notification.level, message = %notification.message, "Notification");
        self.notifications.push(notification);
    }

    fn record(&mut self, payload: impl Into<EventPayload>) {
        self.record_at(self.now, payload);
    }

    fn record_at(&mut self, at: SimInstant, payload: impl Into<EventPayload>) {
        self.events.push(DomainEvent::new(at, payload.into()));
    }
}
