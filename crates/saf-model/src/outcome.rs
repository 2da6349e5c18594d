//! Per-record outcomes and run-level statistics.
//!
//! The pipeline returns an explicit outcome per record instead of relying
//! on catch-and-continue control flow; the orchestrator aggregates them.

use serde::Serialize;

/// Result of resolving file tokens against the bitstream directory.
#[derive(Debug, Clone, Default)]
pub struct FileAssociation {
    /// On-disk filenames to copy, in resolution order.
    pub resolved: Vec<String>,
    /// Requested tokens that matched no strategy.
    pub unresolved: Vec<String>,
}

/// Outcome of processing one record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    /// 1-based package number, assigned in record order.
    pub package: usize,
    /// Required specifiers the record did not satisfy.
    pub missing_fields: Vec<String>,
    /// Filenames copied into the package.
    pub copied: Vec<String>,
    /// Requested tokens with no on-disk resolution.
    pub missing_files: Vec<String>,
    /// Per-file copy errors that did not abort the record.
    pub copy_errors: Vec<String>,
    /// Set when the record failed as a whole; the package may be partial.
    pub failure: Option<String>,
}

impl RecordOutcome {
    pub fn new(package: usize) -> Self {
        Self {
            package,
            missing_fields: Vec::new(),
            copied: Vec::new(),
            missing_files: Vec::new(),
            copy_errors: Vec::new(),
            failure: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Counters accumulated across one run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunStats {
    pub records_processed: usize,
    pub records_failed: usize,
    pub files_copied: usize,
    pub files_missing: usize,
}

impl RunStats {
    pub fn records_succeeded(&self) -> usize {
        self.records_processed - self.records_failed
    }

    pub fn absorb(&mut self, outcome: &RecordOutcome) {
        self.records_processed += 1;
        if !outcome.succeeded() {
            self.records_failed += 1;
        }
        self.files_copied += outcome.copied.len();
        self.files_missing += outcome.missing_files.len();
    }
}
