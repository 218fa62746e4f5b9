//! Scripted session that exercises every file operation.

use clap::Args;
use serde::Serialize;

use crate::output::{self, FileRow, FolderRow, OutputFormat};
use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_core::events::Notification;
use dropvault_core::types::{FileId, FolderId};
use dropvault_entity::file::RawFile;
use dropvault_entity::view::Dialog;
use dropvault_service::{NeverFail, RandomProgress, Workspace};

/// Arguments for the demo command
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Seed for upload progress (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Everything the demo produced
#[derive(Debug, Serialize)]
struct DemoReport {
    notifications: Vec<Notification>,
    files: Vec<FileRow>,
    folders: Vec<FolderRow>,
    events: usize,
    elapsed_ms: u64,
}

/// Execute the demo command
pub fn execute(args: &DemoArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let progress = match args.seed {
        Some(seed) => RandomProgress::seeded(seed),
        None => RandomProgress::from_entropy(),
    };
    let mut ws = Workspace::with_sources(config, progress, NeverFail)?;
    let documents = FolderId::from("documents");
    let images = FolderId::from("images");

    ws.upload(vec![
        RawFile::new("report.pdf", 1000, Some("application/pdf".to_string())),
        RawFile::with_guessed_mime("holiday.jpg", 2_400_000),
        RawFile::with_guessed_mime("notes.txt", 512),
        RawFile::with_guessed_mime("song.mp3", 4_200_000),
    ]);
    run_until_idle(&mut ws, config);

    let report = file_id(&ws, "report.pdf")?;
    let notes = file_id(&ws, "notes.txt")?;
    ws.toggle_selection(report)?;
    ws.toggle_selection(notes)?;
    ws.open_dialog(Dialog::Move)?;
    ws.confirm_move(&documents)?;

    ws.toggle_selection(file_id(&ws, "holiday.jpg")?)?;
    ws.open_dialog(Dialog::Copy)?;
    ws.confirm_copy(&images)?;

    ws.navigate(&documents)?;
    let first = ws
        .store()
        .versions(notes)?
        .first()
        .map(|v| v.id)
        .ok_or_else(|| AppError::internal("notes.txt has no versions"))?;
    for _ in 0..2 {
        ws.open_dialog(Dialog::VersionHistory { file_id: notes })?;
        ws.revert_to_version(first)?;
    }

    let root = ws.store().root_id().clone();
    ws.navigate(&root)?;
    ws.toggle_selection(file_id(&ws, "song.mp3")?)?;
    ws.open_dialog(Dialog::DeleteConfirm)?;
    ws.confirm_delete()?;

    let result = DemoReport {
        notifications: ws.drain_notifications(),
        files: ws.store().files().iter().map(FileRow::from).collect(),
        folders: ws
            .store()
            .navigable_folders()
            .into_iter()
            .map(FolderRow::from)
            .collect(),
        events: ws.events().len(),
        elapsed_ms: ws.now().as_millis(),
    };

    match format {
        OutputFormat::Json => output::print_item(&result, format),
        OutputFormat::Table => {
            output::print_notifications(&result.notifications, format);
            println!();
            output::print_list(&result.files, format);
            output::print_list(&result.folders, format);
            output::print_kv("Events recorded", &result.events.to_string());
            output::print_kv("Simulated time", &format!("{} ms", result.elapsed_ms));
        }
    }
    Ok(())
}

fn run_until_idle(ws: &mut Workspace, config: &AppConfig) {
    let step = config.simulator.tick_interval();
    while !ws.uploads().is_idle() {
        ws.advance(step);
    }
}

fn file_id(ws: &Workspace, name: &str) -> Result<FileId, AppError> {
    ws.store()
        .files()
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.id)
        .ok_or_else(|| AppError::not_found(format!("File '{name}' not found")))
}
