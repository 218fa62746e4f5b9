//! Workspace seed configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Initial state of a session: seeded folders and the starting view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Id of the sentinel root folder. Uploads start here.
    #[serde(default = "default_root_folder")]
    pub root_folder: String,
    /// Initial view mode: `"grid"` or `"list"`.
    #[serde(default = "default_view")]
    pub default_view: String,
    /// Folders present when the session starts. Must include the root.
    #[serde(default = "default_folders")]
    pub folders: Vec<FolderSeed>,
}

/// A folder created at session start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSeed {
    /// Folder slug.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Parent slug; `None` only for the root.
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl FolderSeed {
    fn new(id: &str, name: &str, parent_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(String::from),
        }
    }
}

impl WorkspaceConfig {
    /// Check that the seed describes a single tree rooted at `root_folder`.
    pub fn validate(&self) -> Result<(), AppError> {
        let ids: HashSet<&str> = self.folders.iter().map(|f| f.id.as_str()).collect();
        if ids.len() != self.folders.len() {
            return Err(AppError::configuration("workspace.folders contains duplicate ids"));
        }

        let root = self
            .folders
            .iter()
            .find(|f| f.id == self.root_folder)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "workspace.folders must contain the root folder '{}'",
                    self.root_folder
                ))
            })?;
        if root.parent_id.is_some() {
            return Err(AppError::configuration("the root folder cannot have a parent"));
        }

        for folder in self.folders.iter().filter(|f| f.id != self.root_folder) {
            match folder.parent_id.as_deref() {
                Some(parent) if ids.contains(parent) && parent != folder.id => {}
                Some(parent) => {
                    return Err(AppError::configuration(format!(
                        "folder '{}' references unknown parent '{parent}'",
                        folder.id
                    )));
                }
                None => {
                    return Err(AppError::configuration(format!(
                        "folder '{}' has no parent; only the root may be parentless",
                        folder.id
                    )));
                }
            }
        }

        // Walk each parent chain; a chain longer than the folder count is a cycle.
        for folder in &self.folders {
            let mut current = folder.parent_id.as_deref();
            let mut hops = 0;
            while let Some(id) = current {
                hops += 1;
                if hops > self.folders.len() {
                    return Err(AppError::configuration(format!(
                        "folder '{}' is part of a parent cycle",
                        folder.id
                    )));
                }
                current = self
                    .folders
                    .iter()
                    .find(|f| f.id == id)
                    .and_then(|f| f.parent_id.as_deref());
            }
        }

        Ok(())
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root_folder: default_root_folder(),
            default_view: default_view(),
            folders: default_folders(),
        }
    }
}

fn default_root_folder() -> String {
    "root".to_string()
}

fn default_view() -> String {
    "grid".to_string()
}

fn default_folders() -> Vec<FolderSeed> {
    vec![
        FolderSeed::new("root", "My Files", None),
        FolderSeed::new("documents", "Documents", Some("root")),
        FolderSeed::new("images", "Images", Some("root")),
        FolderSeed::new("videos", "Videos", Some("root")),
    ]
}
