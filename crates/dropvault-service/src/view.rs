//! View controller: layout mode, active folder, dialog, and drag state.

use tracing::{debug, warn};

use dropvault_core::error::AppError;
use dropvault_core::types::FolderId;
use dropvault_entity::file::FileEntity;
use dropvault_entity::view::{Dialog, DialogCloseReason, ViewMode};

use crate::store::FileStore;

/// Transient UI state. Holds at most one open dialog.
#[derive(Debug, Clone)]
pub struct ViewController {
    view_mode: ViewMode,
    current_folder: FolderId,
    dialog: Option<Dialog>,
    drag_active: bool,
}

impl ViewController {
    /// Starts in `folder` with `view_mode` and no dialog.
    pub fn new(folder: FolderId, view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            current_folder: folder,
            dialog: None,
            drag_active: false,
        }
    }

    /// Current layout.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches layout.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// The folder being shown.
    pub fn current_folder(&self) -> &FolderId {
        &self.current_folder
    }

    /// Shows `folder`. The caller validates that it exists.
    pub fn navigate(&mut self, folder: FolderId) {
        debug!(from = %self.current_folder, to = %folder, "Navigated");
        self.current_folder = folder;
    }

    /// Files of the current folder.
    pub fn visible_files<'a>(&self, store: &'a FileStore) -> Vec<&'a FileEntity> {
        store.files_in(&self.current_folder)
    }

    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Opens `dialog`; fails with `Conflict` while another dialog is open.
    pub fn open(&mut self, dialog: Dialog) -> Result<(), AppError> {
        if let Some(open) = &self.dialog {
            warn!(open = open.name(), requested = dialog.name(), "Dialog already open");
            return Err(AppError::conflict(format!(
                "Cannot open '{}' while '{}' is open",
                dialog.name(),
                open.name()
            )));
        }
        debug!(dialog = dialog.name(), "Dialog opened");
        self.dialog = Some(dialog);
        Ok(())
    }

    /// Closes the open dialog, returning it.
    pub fn close(&mut self, reason: DialogCloseReason) -> Option<Dialog> {
        let closed = self.dialog.take();
        if let Some(dialog) = &closed {
            debug!(dialog = dialog.name(), ?reason, "Dialog closed");
        }
        closed
    }

    /// Whether files are being dragged over the drop zone.
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Sets or clears the drag-hover flag.
    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }
}
