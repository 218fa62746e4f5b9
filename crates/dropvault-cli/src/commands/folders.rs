//! Folder listing.

use crate::output::{self, FolderRow, OutputFormat};
use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_service::FileStore;

/// List the folders shown in the navigation bar
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let store = FileStore::new(&config.workspace)?;
    let rows: Vec<FolderRow> = store
        .navigable_folders()
        .into_iter()
        .map(FolderRow::from)
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
