//! Time-stepped upload simulator.
//!
//! Each registered upload advances on a fixed interval by a random
//! increment until it reaches 100%, at which point a [`FileEntity`] is
//! materialized in the folder that was active when the upload started.
//! Finished uploads linger in the active list for a short while before
//! they are dismissed.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use dropvault_core::config::simulator::SimulatorConfig;
use dropvault_core::types::{FolderId, SimInstant, UploadId};
use dropvault_entity::file::{FileEntity, RawFile};
use dropvault_entity::upload::{UploadStatus, UploadTask};

use super::progress::{FailurePolicy, NeverFail, ProgressSource, RandomProgress};

/// Something that happened to an upload during [`UploadSimulator::advance`].
///
/// Every outcome carries the simulated instant it fell due.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Progress reached 100; the file is ready to be added to the store.
    Completed {
        /// The finished upload.
        upload_id: UploadId,
        /// The materialized file.
        file: FileEntity,
        /// The tick that finished it.
        at: SimInstant,
    },
    /// The failure policy rejected the upload.
    Failed {
        /// The failed upload.
        upload_id: UploadId,
        /// Name of the raw file.
        file_name: String,
        /// Progress reached before failing.
        progress: f64,
        /// The tick that failed it.
        at: SimInstant,
    },
    /// A finished upload left the active list.
    Dismissed {
        /// The dismissed upload.
        upload_id: UploadId,
        /// Name of the raw file.
        file_name: String,
        /// Final status (completed or failed).
        status: UploadStatus,
        /// When the linger expired.
        at: SimInstant,
    },
}

/// One tracked upload and its timers.
#[derive(Debug)]
struct PendingUpload {
    task: UploadTask,
    raw: RawFile,
    /// Folder captured when the upload was registered.
    folder_id: FolderId,
    next_tick: SimInstant,
    dismiss_at: Option<SimInstant>,
}

impl PendingUpload {
    /// The next instant something happens to this upload.
    fn due_at(&self) -> SimInstant {
        self.dismiss_at.unwrap_or(self.next_tick)
    }
}

/// Drives every in-flight upload from an external clock.
pub struct UploadSimulator {
    config: SimulatorConfig,
    progress: Box<dyn ProgressSource>,
    failure: Box<dyn FailurePolicy>,
    pending: Vec<PendingUpload>,
}

impl fmt::Debug for UploadSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadSimulator")
            .field("config", &self.config)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl UploadSimulator {
    /// Creates a simulator with random progress that never fails.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_sources(config, RandomProgress::from_entropy(), NeverFail)
    }

    /// Creates a simulator with explicit progress and failure sources.
    pub fn with_sources(
        config: SimulatorConfig,
        progress: impl ProgressSource + 'static,
        failure: impl FailurePolicy + 'static,
    ) -> Self {
        Self {
            config,
            progress: Box::new(progress),
            failure: Box::new(failure),
            pending: Vec::new(),
        }
    }

    /// The timing configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Registers an upload at 0% that will land in `folder_id`.
    pub fn register(&mut self, raw: RawFile, folder_id: FolderId, now: SimInstant) -> UploadId {
        let task = UploadTask::new(raw.name.clone(), now);
        let id = task.id;
        info!(
            upload_id = %id,
            file_name = %raw.name,
            size = raw.size,
            folder_id = %folder_id,
            "Upload started"
        );
        self.pending.push(PendingUpload {
            task,
            raw,
            folder_id,
            next_tick: now + self.interval(),
            dismiss_at: None,
        });
        id
    }

    /// Processes every tick and dismissal due at or before `now`, across
    /// all uploads in simulated-time order. Uploads due at the same instant
    /// are handled in registration order.
    ///
    /// `wall_clock` stamps the upload date of files completed in this call.
    pub fn advance(&mut self, now: SimInstant, wall_clock: DateTime<Utc>) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::new();

        while let Some((index, due)) = self.next_due(now) {
            if self.pending[index].dismiss_at.is_some() {
                let upload = self.pending.remove(index);
                debug!(upload_id = %upload.task.id, at = %due, "Upload dismissed");
                outcomes.push(UploadOutcome::Dismissed {
                    upload_id: upload.task.id,
                    file_name: upload.task.file_name,
                    status: upload.task.status,
                    at: due,
                });
            } else if let Some(outcome) = self.tick(index, due, wall_clock) {
                outcomes.push(outcome);
            }
        }

        outcomes
    }

    /// Tick interval, never zero.
    fn interval(&self) -> Duration {
        self.config.tick_interval().max(Duration::from_millis(1))
    }

    /// The earliest upload with something due at or before `now`.
    fn next_due(&self, now: SimInstant) -> Option<(usize, SimInstant)> {
        self.pending
            .iter()
            .enumerate()
            .map(|(index, upload)| (index, upload.due_at()))
            .filter(|(_, due)| *due <= now)
            .min_by_key(|&(index, due)| (due, index))
    }

    /// Applies one progress tick to the upload at `index`.
    fn tick(
        &mut self,
        index: usize,
        tick_at: SimInstant,
        wall_clock: DateTime<Utc>,
    ) -> Option<UploadOutcome> {
        let interval = self.interval();
        let linger = self.config.completion_linger();
        let max = self.config.max_increment.max(f64::MIN_POSITIVE);
        let upload = &mut self.pending[index];
        upload.next_tick += interval;

        if self.failure.should_fail(&upload.task) {
            upload.task.status = UploadStatus::Failed;
            upload.dismiss_at = Some(tick_at + linger);
            warn!(
                upload_id = %upload.task.id,
                file_name = %upload.task.file_name,
                progress = upload.task.progress,
                "Upload failed"
            );
            return Some(UploadOutcome::Failed {
                upload_id: upload.task.id,
                file_name: upload.task.file_name.clone(),
                progress: upload.task.progress,
                at: tick_at,
            });
        }

        let increment = self.progress.next_increment(max).clamp(f64::MIN_POSITIVE, max);
        upload.task.progress = (upload.task.progress + increment).min(100.0);
        debug!(
            upload_id = %upload.task.id,
            progress = upload.task.progress,
            at = %tick_at,
            "Upload progressed"
        );

        if upload.task.progress < 100.0 {
            return None;
        }

        upload.task.progress = 100.0;
        upload.task.status = UploadStatus::Completed;
        upload.dismiss_at = Some(tick_at + linger);

        let file = FileEntity::from_upload(&upload.raw, upload.folder_id.clone(), wall_clock);
        info!(
            upload_id = %upload.task.id,
            file_id = %file.id,
            folder_id = %file.folder_id,
            "Upload completed"
        );
        Some(UploadOutcome::Completed {
            upload_id: upload.task.id,
            file,
            at: tick_at,
        })
    }

    /// Active uploads (in flight or lingering), in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &UploadTask> {
        self.pending.iter().map(|upload| &upload.task)
    }

    /// Look up an active upload.
    pub fn task(&self, id: UploadId) -> Option<&UploadTask> {
        self.tasks().find(|task| task.id == id)
    }

    /// Folder an active upload will land in.
    pub fn destination(&self, id: UploadId) -> Option<&FolderId> {
        self.pending
            .iter()
            .find(|upload| upload.task.id == id)
            .map(|upload| &upload.folder_id)
    }

    /// Number of active uploads.
    pub fn active_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is in flight or lingering.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending upload and returns their ids. No file is
    /// materialized for an upload dropped before completion.
    pub fn shutdown(&mut self) -> Vec<UploadId> {
        let abandoned: Vec<UploadId> = self.pending.drain(..).map(|u| u.task.id).collect();
        if !abandoned.is_empty() {
            info!(abandoned = abandoned.len(), "Pending uploads abandoned");
        }
        abandoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::progress::FixedProgress;

    fn simulator(step: f64) -> UploadSimulator {
        UploadSimulator::with_sources(SimulatorConfig::default(), FixedProgress(step), NeverFail)
    }

    fn at(ms: u64) -> SimInstant {
        SimInstant::from_millis(ms)
    }

    #[test]
    fn test_register_starts_at_zero() {
        let mut sim = simulator(10.0);
        let id = sim.register(RawFile::new("a.txt", 5, None), FolderId::from("root"), at(0));
        let task = sim.task(id).unwrap();
        assert_eq!(task.progress, 0.0);
        assert_eq!(task.status, UploadStatus::Uploading);
        assert_eq!(sim.destination(id), Some(&FolderId::from("root")));
    }

    #[test]
    fn test_no_progress_before_first_interval() {
        let mut sim = simulator(10.0);
        let id = sim.register(RawFile::new("a.txt", 5, None), FolderId::from("root"), at(0));
        assert!(sim.advance(at(199), Utc::now()).is_empty());
        assert_eq!(sim.task(id).unwrap().progress, 0.0);

        sim.advance(at(200), Utc::now());
        assert_eq!(sim.task(id).unwrap().progress, 10.0);
    }

    #[test]
    fn test_completion_then_dismissal() {
        let mut sim = simulator(15.0);
        let id = sim.register(RawFile::new("report.pdf", 1000, None), FolderId::from("root"), at(0));

        // 7 ticks of 15% reach 100 at t=1400.
        let outcomes = sim.advance(at(1399), Utc::now());
        assert!(outcomes.is_empty());
        assert_eq!(sim.task(id).unwrap().progress, 90.0);

        let outcomes = sim.advance(at(1400), Utc::now());
        assert_eq!(outcomes.len(), 1);
        let UploadOutcome::Completed { upload_id, file, .. } = &outcomes[0] else {
            panic!("expected completion, got {outcomes:?}");
        };
        assert_eq!(*upload_id, id);
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.versions.len(), 1);

        let task = sim.task(id).unwrap();
        assert_eq!(task.progress, 100.0);
        assert_eq!(task.status, UploadStatus::Completed);

        assert!(sim.advance(at(1899), Utc::now()).is_empty());
        let outcomes = sim.advance(at(1900), Utc::now());
        assert!(matches!(
            outcomes.as_slice(),
            [UploadOutcome::Dismissed { status: UploadStatus::Completed, .. }]
        ));
        assert!(sim.is_idle());
    }

    #[test]
    fn test_large_jump_processes_every_tick() {
        let mut sim = simulator(30.0);
        sim.register(RawFile::new("a.txt", 5, None), FolderId::from("root"), at(0));
        let outcomes = sim.advance(at(10_000), Utc::now());
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], UploadOutcome::Completed { .. }));
        assert!(matches!(outcomes[1], UploadOutcome::Dismissed { .. }));
    }

    #[test]
    fn test_uploads_are_independent() {
        let mut sim = simulator(50.0);
        let first = sim.register(RawFile::new("a.txt", 1, None), FolderId::from("root"), at(0));
        let second = sim.register(RawFile::new("b.txt", 1, None), FolderId::from("images"), at(100));

        let outcomes = sim.advance(at(400), Utc::now());
        assert_eq!(outcomes.len(), 1);
        assert_eq!(sim.task(first).unwrap().status, UploadStatus::Completed);
        assert_eq!(sim.task(second).unwrap().progress, 50.0);

        let outcomes = sim.advance(at(500), Utc::now());
        let UploadOutcome::Completed { file, .. } = &outcomes[0] else {
            panic!("expected completion, got {outcomes:?}");
        };
        assert_eq!(file.folder_id, "images");
    }

    #[test]
    fn test_outcomes_follow_simulated_time() {
        let config = SimulatorConfig {
            max_increment: 50.0,
            ..SimulatorConfig::default()
        };
        let mut calls = 0u32;
        let alternating = move |_max: f64| {
            calls += 1;
            if calls % 2 == 1 { 5.0 } else { 50.0 }
        };
        let mut sim = UploadSimulator::with_sources(config, alternating, NeverFail);
        let slow = sim.register(RawFile::new("slow.txt", 1, None), FolderId::from("root"), at(0));
        let fast = sim.register(RawFile::new("fast.txt", 1, None), FolderId::from("root"), at(1));

        let outcomes = sim.advance(at(10_000), Utc::now());
        let timeline: Vec<(UploadId, u64, &str)> = outcomes
            .iter()
            .map(|o| match o {
                UploadOutcome::Completed { upload_id, at, .. } => (*upload_id, at.as_millis(), "completed"),
                UploadOutcome::Failed { upload_id, at, .. } => (*upload_id, at.as_millis(), "failed"),
                UploadOutcome::Dismissed { upload_id, at, .. } => (*upload_id, at.as_millis(), "dismissed"),
            })
            .collect();
        assert_eq!(
            timeline,
            vec![
                (fast, 401, "completed"),
                (fast, 901, "dismissed"),
                (slow, 1200, "completed"),
                (slow, 1700, "dismissed"),
            ]
        );
    }

    #[test]
    fn test_increments_are_clamped() {
        let mut sim = UploadSimulator::with_sources(
            SimulatorConfig::default(),
            |_max: f64| 1000.0,
            NeverFail,
        );
        let id = sim.register(RawFile::new("a.txt", 1, None), FolderId::from("root"), at(0));
        sim.advance(at(200), Utc::now());
        assert_eq!(sim.task(id).unwrap().progress, 15.0);
    }

    #[test]
    fn test_failure_policy() {
        let mut sim = UploadSimulator::with_sources(
            SimulatorConfig::default(),
            FixedProgress(20.0),
            |task: &UploadTask| task.progress >= 40.0,
        );
        let id = sim.register(RawFile::new("bad.bin", 1, None), FolderId::from("root"), at(0));

        let outcomes = sim.advance(at(10_000), Utc::now());
        assert!(matches!(
            outcomes.as_slice(),
            [
                UploadOutcome::Failed { progress, .. },
                UploadOutcome::Dismissed { status: UploadStatus::Failed, .. },
            ] if *progress == 40.0
        ));
        assert!(sim.task(id).is_none());
    }

    #[test]
    fn test_shutdown_abandons_pending() {
        let mut sim = simulator(10.0);
        let id = sim.register(RawFile::new("a.txt", 1, None), FolderId::from("root"), at(0));
        sim.advance(at(400), Utc::now());

        assert_eq!(sim.shutdown(), vec![id]);
        assert!(sim.is_idle());
        assert!(sim.advance(at(100_000), Utc::now()).is_empty());
    }
}
