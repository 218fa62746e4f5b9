//! End-to-end workspace scenarios.

mod helpers;

use std::time::Duration;

use dropvault_core::config::AppConfig;
use dropvault_core::error::ErrorKind;
use dropvault_core::events::{EventPayload, FileEvent, UploadEvent};
use dropvault_core::types::{FolderId, SimInstant};
use dropvault_entity::file::{FileCategory, RawFile};
use dropvault_entity::upload::UploadStatus;
use dropvault_entity::view::{Dialog, DialogCloseReason, ViewMode};
use dropvault_service::{NeverFail, ProgressSource, RandomProgress, Workspace};

#[test]
fn test_report_pdf_upload_into_root() {
    let mut ws = helpers::workspace();
    let id = ws.upload(vec![RawFile::new("report.pdf", 1000, None)])[0];

    while ws.store().files().is_empty() {
        ws.advance(Duration::from_millis(200));
    }

    let task = ws.uploads().task(id).expect("task lingers after completion");
    assert_eq!(task.status, UploadStatus::Completed);
    assert_eq!(task.progress, 100.0);

    let files = ws.store().files();
    assert_eq!(files.len(), 1);
    let file = &files[0];
    assert_eq!(file.category, FileCategory::Pdf);
    assert_eq!(file.size, 1000);
    assert_eq!(file.folder_id, "root");
    assert_eq!(file.versions.len(), 1);
    assert!(file.versions[0].is_current_version);
    assert_eq!(file.current_version, 1);
    assert_eq!(ws.store().folder(&FolderId::from("root")).unwrap().file_count, 1);
}

#[test]
fn test_random_uploads_complete_with_single_version() {
    let mut ws =
        Workspace::with_sources(&AppConfig::default(), RandomProgress::seeded(3), NeverFail)
            .unwrap();
    let ids = helpers::upload_all(
        &mut ws,
        vec![
            RawFile::with_guessed_mime("a.png", 10),
            RawFile::with_guessed_mime("b.mp4", 20),
            RawFile::with_guessed_mime("c", 30),
        ],
    );

    assert_eq!(ids.len(), 3);
    for file in ws.store().files() {
        assert_eq!(file.versions.len(), 1);
        assert!(file.versions[0].is_current_version);
        assert!(file.is_consistent());
    }
    let png = ws.store().files().iter().find(|f| f.name == "a.png").unwrap();
    assert_eq!(png.thumbnail_ref.as_ref(), Some(&png.content_ref));
    let bare = ws.store().files().iter().find(|f| f.name == "c").unwrap();
    assert_eq!(bare.category, FileCategory::Other);
}

#[test]
fn test_move_two_selected_files_to_documents() {
    let mut ws = helpers::workspace();
    let ids = helpers::upload_named(&mut ws, &["a.txt", "b.txt", "c.txt"]);
    ws.drain_notifications();

    ws.toggle_selection(ids[0]).unwrap();
    ws.toggle_selection(ids[1]).unwrap();
    ws.open_dialog(Dialog::Move).unwrap();
    let before = ws.store().file(ids[0]).unwrap().clone();

    assert_eq!(ws.confirm_move(&FolderId::from("documents")).unwrap(), 2);

    assert_eq!(ws.store().file(ids[0]).unwrap().folder_id, "documents");
    assert_eq!(ws.store().file(ids[1]).unwrap().folder_id, "documents");
    assert_eq!(ws.store().file(ids[2]).unwrap().folder_id, "root");
    assert!(ws.selection().is_empty());
    assert!(ws.view_controller().dialog().is_none());

    let after = ws.store().file(ids[0]).unwrap();
    assert_eq!(after.name, before.name);
    assert_eq!(after.size, before.size);
    assert_eq!(after.versions, before.versions);
    assert_eq!(after.upload_date, before.upload_date);

    let notes = ws.drain_notifications();
    assert_eq!(notes[0].message, "2 file(s) moved to Documents");
    assert_eq!(ws.store().folder(&FolderId::from("documents")).unwrap().file_count, 2);
}

#[test]
fn test_revert_v1_produces_v3() {
    let mut ws = helpers::workspace();
    let id = helpers::upload_named(&mut ws, &["notes.txt"])[0];
    let v1 = ws.store().file(id).unwrap().versions[0].clone();

    ws.revert(id, v1.id).unwrap();
    ws.open_dialog(Dialog::VersionHistory { file_id: id }).unwrap();
    let v3 = ws.revert_to_version(v1.id).unwrap();

    let file = ws.store().file(id).unwrap();
    assert_eq!(v3.version_number, 3);
    assert_eq!(v3.size, v1.size);
    assert!(v3.is_current_version);
    assert!(!file.versions[0].is_current_version);
    assert!(!file.versions[1].is_current_version);
    assert_eq!(file.current_version, 3);
    assert_eq!(file.content_ref, v1.content_ref);
    assert!(file.is_consistent());

    let notes = ws.drain_notifications();
    assert_eq!(notes.last().unwrap().message, "Reverted notes.txt to version 3");
}

#[test]
fn test_repeated_revert_adds_one_version_each() {
    let mut ws = helpers::workspace();
    let id = helpers::upload_named(&mut ws, &["a.txt"])[0];
    let v1 = ws.store().file(id).unwrap().versions[0].id;

    for n in 1..=5u32 {
        let version = ws.revert(id, v1).unwrap();
        assert_eq!(version.version_number, n + 1);
    }

    let file = ws.store().file(id).unwrap();
    assert_eq!(file.versions.len(), 6);
    assert_eq!(file.versions.iter().filter(|v| v.is_current_version).count(), 1);
    let mut ids: Vec<_> = file.versions.iter().map(|v| v.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_revert_unknown_version_leaves_state() {
    let mut ws = helpers::workspace();
    let id = helpers::upload_named(&mut ws, &["a.txt"])[0];
    let before = ws.store().file(id).unwrap().clone();

    let err = ws.revert(id, Default::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(ws.store().file(id).unwrap(), &before);
}

#[test]
fn test_delete_empty_selection_is_noop() {
    let mut ws = helpers::workspace();
    helpers::upload_named(&mut ws, &["a.txt"]);
    ws.drain_notifications();
    let before = ws.store().files().to_vec();

    assert_eq!(ws.delete_selected(), 0);
    assert_eq!(ws.store().files(), before.as_slice());
    assert!(ws.drain_notifications().is_empty());
}

#[test]
fn test_copy_gets_new_identity_and_name() {
    let mut ws = helpers::workspace();
    let id = helpers::upload_named(&mut ws, &["photo.jpg"])[0];
    ws.toggle_selection(id).unwrap();
    ws.open_dialog(Dialog::Copy).unwrap();
    ws.confirm_copy(&FolderId::from("images")).unwrap();

    let original = ws.store().file(id).unwrap().clone();
    ws.navigate(&FolderId::from("images")).unwrap();
    let visible = ws.visible_files();
    assert_eq!(visible.len(), 1);
    let copy = visible[0];
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "Copy of photo.jpg");
    assert_eq!(copy.folder_id, "images");
    assert_ne!(copy.versions[0].id, original.versions[0].id);
    assert_eq!(original.folder_id, "root");

    assert!(ws.events().iter().any(|e| matches!(
        &e.payload,
        EventPayload::File(FileEvent::Copied { source_file_id, .. }) if *source_file_id == id
    )));
}

#[test]
fn test_upload_keeps_initiating_folder() {
    let mut ws = helpers::workspace();
    ws.navigate(&FolderId::from("videos")).unwrap();
    let upload_id = ws.upload(vec![RawFile::new("clip.mp4", 5, None)])[0];
    ws.navigate(&FolderId::from("documents")).unwrap();

    assert_eq!(
        ws.uploads().destination(upload_id),
        Some(&FolderId::from("videos"))
    );
    ws.advance(Duration::from_secs(5));

    assert!(ws.visible_files().is_empty());
    assert_eq!(ws.store().files_in(&FolderId::from("videos")).len(), 1);
}

#[test]
fn test_dialog_lifecycle() {
    let mut ws = helpers::workspace();
    let ids = helpers::upload_named(&mut ws, &["a.txt"]);
    ws.toggle_selection(ids[0]).unwrap();

    ws.open_dialog(Dialog::DeleteConfirm).unwrap();
    let err = ws.open_dialog(Dialog::Move).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    assert_eq!(
        ws.close_dialog(DialogCloseReason::Backdrop),
        Some(Dialog::DeleteConfirm)
    );
    assert_eq!(ws.close_dialog(DialogCloseReason::Cancel), None);
    assert_eq!(ws.selection().len(), 1);
    assert_eq!(ws.store().files().len(), 1);
}

#[test]
fn test_view_snapshot_serializes() {
    let mut ws = helpers::workspace();
    helpers::upload_named(&mut ws, &["a.txt", "b.png"]);
    ws.set_view_mode(ViewMode::List);
    ws.select_all();

    let view = ws.view();
    assert_eq!(view.view_mode, ViewMode::List);
    assert_eq!(view.folders.len(), 4);
    assert_eq!(view.selection.len(), 2);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["view_mode"], "list");
    assert_eq!(json["current_folder"]["id"], "root");
    assert_eq!(json["visible_files"][0]["type"], "document");
}

#[test]
fn test_event_log_orders_upload_lifecycle() {
    let mut ws = helpers::workspace();
    helpers::upload_named(&mut ws, &["a.txt"]);

    let kinds: Vec<&str> = ws
        .events()
        .iter()
        .map(|e| match &e.payload {
            EventPayload::Upload(UploadEvent::Started { .. }) => "started",
            EventPayload::Upload(UploadEvent::Completed { .. }) => "completed",
            EventPayload::File(FileEvent::Uploaded { .. }) => "uploaded",
            EventPayload::Upload(UploadEvent::Dismissed { .. }) => "dismissed",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["started", "completed", "uploaded", "dismissed"]);
}

/// Slow and fast uploads share one source: odd calls give 5%, even calls 50%.
fn alternating_progress() -> impl ProgressSource + 'static {
    let mut calls = 0u32;
    move |_max: f64| {
        calls += 1;
        if calls % 2 == 1 { 5.0 } else { 50.0 }
    }
}

fn racing_workspace() -> Workspace {
    let mut config = AppConfig::default();
    config.simulator.max_increment = 50.0;
    let mut ws = Workspace::with_sources(&config, alternating_progress(), NeverFail).unwrap();
    ws.upload(vec![RawFile::new("slow.txt", 1, None)]);
    ws.advance(Duration::from_millis(1));
    ws.upload(vec![RawFile::new("fast.txt", 1, None)]);
    ws
}

fn outcome_log(ws: &mut Workspace) -> (Vec<String>, Vec<(String, SimInstant)>, Vec<SimInstant>) {
    let names = ws.store().files().iter().map(|f| f.name.clone()).collect();
    let notes = ws
        .drain_notifications()
        .into_iter()
        .map(|n| (n.message, n.at))
        .collect();
    let event_times = ws.events().iter().map(|e| e.at).collect();
    (names, notes, event_times)
}

#[test]
fn test_one_long_advance_matches_many_ticks() {
    let mut jumped = racing_workspace();
    jumped.advance(Duration::from_secs(10));

    let mut stepped = racing_workspace();
    for _ in 0..50 {
        stepped.advance(Duration::from_millis(200));
    }

    let jumped_log = outcome_log(&mut jumped);
    assert_eq!(jumped_log, outcome_log(&mut stepped));

    let (names, notes, event_times) = jumped_log;
    assert_eq!(names, ["fast.txt", "slow.txt"]);
    assert_eq!(
        notes,
        vec![
            ("fast.txt uploaded successfully!".to_string(), SimInstant::from_millis(901)),
            ("slow.txt uploaded successfully!".to_string(), SimInstant::from_millis(1700)),
        ]
    );
    assert!(event_times.windows(2).all(|w| w[0] <= w[1]));
}
