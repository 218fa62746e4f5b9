//! Simulated upload of local files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::sync::{Mutex, watch};

use crate::output::{self, FileRow, OutputFormat};
use dropvault_core::config::AppConfig;
use dropvault_core::error::{AppError, ErrorKind};
use dropvault_core::types::FolderId;
use dropvault_entity::file::RawFile;
use dropvault_service::{DriverExit, UploadDriver, Workspace};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local files to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Destination folder id
    #[arg(long)]
    pub folder: Option<String>,

    /// Real milliseconds between simulator ticks
    #[arg(long, default_value_t = 20)]
    pub tick_ms: u64,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut workspace = Workspace::new(config)?;
    if let Some(folder) = &args.folder {
        workspace.navigate(&FolderId::from(folder.as_str()))?;
    }

    let mut files = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        files.push(read_raw_file(path).await?);
    }
    tracing::info!(
        count = files.len(),
        folder_id = %workspace.view_controller().current_folder(),
        "Starting simulated upload"
    );
    workspace.upload(files);

    let workspace = Arc::new(Mutex::new(workspace));
    let driver = UploadDriver::new(workspace.clone())
        .await
        .with_period(Duration::from_millis(args.tick_ms))
        .stop_when_idle(true);

    let (tx, rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });
    let exit = driver.run(rx).await;
    ctrl_c.abort();

    let mut workspace = workspace.lock().await;
    output::print_notifications(&workspace.drain_notifications(), format);
    if exit == DriverExit::Shutdown {
        output::print_warning("Interrupted; pending uploads were abandoned");
    }

    let rows: Vec<FileRow> = workspace
        .visible_files()
        .into_iter()
        .map(FileRow::from)
        .collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Read a local file's name and size into a raw upload handle
async fn read_raw_file(path: &Path) -> Result<RawFile, AppError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Cannot read '{}'", path.display()),
            e,
        )
    })?;
    if !metadata.is_file() {
        return Err(AppError::validation(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation(format!("'{}' has no file name", path.display())))?;
    Ok(RawFile::with_guessed_mime(name, metadata.len()))
}
