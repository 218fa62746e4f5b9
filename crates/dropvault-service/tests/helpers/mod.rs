//! Shared helpers for workspace integration tests.

use std::time::Duration;

use dropvault_core::config::AppConfig;
use dropvault_core::types::FileId;
use dropvault_entity::file::RawFile;
use dropvault_service::{FixedProgress, NeverFail, Workspace};

/// A workspace whose uploads advance 20% per tick.
pub fn workspace() -> Workspace {
    Workspace::with_sources(&AppConfig::default(), FixedProgress(20.0), NeverFail)
        .expect("default config is valid")
}

/// Uploads `files` into the current folder and runs the clock until every
/// upload is dismissed. Returns the ids of the new files.
pub fn upload_all(ws: &mut Workspace, files: Vec<RawFile>) -> Vec<FileId> {
    let before = ws.store().files().len();
    ws.upload(files);
    while !ws.uploads().is_idle() {
        ws.advance(Duration::from_millis(200));
    }
    ws.store().files()[before..].iter().map(|f| f.id).collect()
}

/// Uploads plain text files with the given names.
pub fn upload_named(ws: &mut Workspace, names: &[&str]) -> Vec<FileId> {
    let files = names
        .iter()
        .map(|name| RawFile::with_guessed_mime(*name, 100))
        .collect();
    upload_all(ws, files)
}
