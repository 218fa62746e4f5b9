//! Upload task entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use dropvault_core::types::{SimInstant, UploadId};

/// Lifecycle state of a simulated upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Progress is still advancing.
    Uploading,
    /// Progress reached 100 and the file was materialized.
    Completed,
    /// The failure hook rejected the upload.
    Failed,
}

impl UploadStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress-tracking record for an in-flight simulated upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTask {
    /// Unique upload identifier.
    pub id: UploadId,
    /// Name of the file being uploaded.
    pub file_name: String,
    /// Progress in percent, within `[0, 100]`.
    pub progress: f64,
    /// Current status.
    pub status: UploadStatus,
    /// Simulated time the upload was registered.
    pub start_time: SimInstant,
}

impl UploadTask {
    /// A new task at 0%.
    pub fn new(file_name: impl Into<String>, start_time: SimInstant) -> Self {
        Self {
            id: UploadId::new(),
            file_name: file_name.into(),
            progress: 0.0,
            status: UploadStatus::Uploading,
            start_time,
        }
    }

    /// Whether progress no longer advances.
    pub fn is_finished(&self) -> bool {
        !matches!(self.status, UploadStatus::Uploading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_starts_uploading_at_zero() {
        let task = UploadTask::new("a.txt", SimInstant::from_millis(40));
        assert_eq!(task.progress, 0.0);
        assert_eq!(task.status, UploadStatus::Uploading);
        assert!(!task.is_finished());
        assert_eq!(task.start_time.as_millis(), 40);
    }
}
