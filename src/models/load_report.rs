//! Per-file load reports.
//!
//! The loader never produces user-facing text; these reports carry enough
//! for a UI to render partial-failure banners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollRecord;

/// Outcome of loading one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileLoadStatus {
    /// The file loaded and contributed this many records.
    Loaded {
        /// Number of records contributed.
        records: usize,
    },
    /// The file was skipped.
    Failed {
        /// Why the file was skipped.
        reason: String,
    },
}

/// Load report for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLoadReport {
    /// The source file name.
    pub name: String,
    /// Whether the file loaded.
    pub status: FileLoadStatus,
    /// Fetch attempts made; zero when served from cache.
    pub attempts: u32,
    /// True when the records came from the loader cache.
    pub from_cache: bool,
}

impl FileLoadReport {
    /// Returns true if the file loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, FileLoadStatus::Loaded { .. })
    }

    /// Returns the number of records the file contributed.
    pub fn record_count(&self) -> usize {
        match self.status {
            FileLoadStatus::Loaded { records } => records,
            FileLoadStatus::Failed { .. } => 0,
        }
    }
}

/// Records merged from every successfully loaded file, plus per-file reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Correlation id of the load.
    pub load_id: Uuid,
    /// When the load finished.
    pub loaded_at: DateTime<Utc>,
    /// Every record, in file order.
    pub records: Vec<PayrollRecord>,
    /// One report per requested file, in request order.
    pub reports: Vec<FileLoadReport>,
}

impl LoadOutcome {
    /// Returns the reports of the files that failed.
    pub fn failures(&self) -> impl Iterator<Item = &FileLoadReport> {
        self.reports.iter().filter(|report| !report.is_loaded())
    }

    /// Returns true if every requested file loaded.
    pub fn is_complete(&self) -> bool {
        self.reports.iter().all(FileLoadReport::is_loaded)
    }
}
