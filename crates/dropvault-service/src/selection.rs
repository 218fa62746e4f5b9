//! Folder-scoped file selection.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use dropvault_core::types::{FileId, FolderId};

/// The set of selected files, explicitly tied to the folder it was made in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    folder_id: FolderId,
    ids: BTreeSet<FileId>,
}

impl Selection {
    /// An empty selection in `folder_id`.
    pub fn new(folder_id: FolderId) -> Self {
        Self {
            folder_id,
            ids: BTreeSet::new(),
        }
    }

    /// The folder the selection belongs to.
    pub fn folder_id(&self) -> &FolderId {
        &self.folder_id
    }

    /// Selected ids, in id order.
    pub fn ids(&self) -> impl Iterator<Item = FileId> + '_ {
        self.ids.iter().copied()
    }

    /// Selected ids as a vector.
    pub fn to_vec(&self) -> Vec<FileId> {
        self.ids().collect()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: FileId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flips `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: FileId) -> bool {
        let selected = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        debug!(file_id = %id, selected, "Selection toggled");
        selected
    }

    /// Replaces the selection with exactly `visible`.
    pub fn select_all(&mut self, visible: impl IntoIterator<Item = FileId>) {
        self.ids = visible.into_iter().collect();
        debug!(count = self.ids.len(), "Selected all visible files");
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Moves the selection to `folder_id`. Switching folders empties it;
    /// returns whether anything was dropped.
    pub fn rescope(&mut self, folder_id: FolderId) -> bool {
        if self.folder_id == folder_id {
            return false;
        }
        self.folder_id = folder_id;
        let dropped = !self.ids.is_empty();
        self.ids.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new(FolderId::from("root"));
        let id = FileId::new();
        assert!(selection.toggle(id));
        assert!(selection.contains(id));
        assert!(!selection.toggle(id));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_replaces() {
        let mut selection = Selection::new(FolderId::from("root"));
        let stale = FileId::new();
        selection.toggle(stale);

        let visible = [FileId::new(), FileId::new()];
        selection.select_all(visible);
        assert_eq!(selection.len(), 2);
        assert!(!selection.contains(stale));
    }

    #[test]
    fn test_rescope_clears_on_folder_change() {
        let mut selection = Selection::new(FolderId::from("root"));
        selection.toggle(FileId::new());

        assert!(!selection.rescope(FolderId::from("root")));
        assert_eq!(selection.len(), 1);

        assert!(selection.rescope(FolderId::from("images")));
        assert!(selection.is_empty());
        assert_eq!(selection.folder_id(), &FolderId::from("images"));
    }
}
