//! Per-record packaging pipeline.
//!
//! Assigns sequential package numbers in record order and builds one
//! package directory per record: metadata document, copied bitstreams,
//! and the `contents` manifest. Each record yields an explicit
//! `RecordOutcome`; a failure is captured, logged, and counted, and the
//! run continues with the next record. Partial package directories are
//! left in place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use saf_map::{filename_columns, missing_required_fields};
use saf_model::{FileAssociation, Record, RecordOutcome, RunStats, SafConfig};

use crate::associate::{associate_files, extract_file_tokens};
use crate::metadata_xml::write_metadata_document;

const METADATA_FILE: &str = "dublin_core.xml";
const MANIFEST_FILE: &str = "contents";

/// Behavior switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Log all decisions without creating directories or copying files.
    pub dry_run: bool,
    /// Rewrite camera-raw extensions in filename cells before matching.
    pub retarget_raw: bool,
}

/// Aggregated result of one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcomes: Vec<RecordOutcome>,
    pub stats: RunStats,
}

impl RunResult {
    pub fn has_failures(&self) -> bool {
        self.stats.records_failed > 0
    }
}

/// Orchestrates packaging for a whole record table.
pub struct RecordPipeline<'a> {
    config: &'a SafConfig,
    files_dir: &'a Path,
    output_dir: &'a Path,
    options: PipelineOptions,
}

impl<'a> RecordPipeline<'a> {
    pub fn new(
        config: &'a SafConfig,
        files_dir: &'a Path,
        output_dir: &'a Path,
        options: PipelineOptions,
    ) -> Self {
        Self {
            config,
            files_dir,
            output_dir,
            options,
        }
    }

    /// Processes every record in order. Fatal only when the output root
    /// itself cannot be created; everything else is captured per record.
    pub fn run(&self, columns: &[String], records: &[Record]) -> Result<RunResult> {
        if !self.options.dry_run {
            fs::create_dir_all(self.output_dir)
                .with_context(|| format!("create {}", self.output_dir.display()))?;
        }

        let filename_cols = filename_columns(columns);
        if filename_cols.is_empty() {
            info!("no filename column detected; packages will carry metadata only");
        } else {
            info!(columns = ?filename_cols, "filename columns detected");
        }
        if !self.files_dir.is_dir() {
            warn!(
                path = %self.files_dir.display(),
                "bitstream directory not found; all file tokens will be reported missing"
            );
        }

        let mut outcomes = Vec::with_capacity(records.len());
        let mut stats = RunStats::default();
        for (index, record) in records.iter().enumerate() {
            let package = index + 1;
            let outcome = match self.process_record(package, record, &filename_cols) {
                Ok(outcome) => outcome,
                Err(failure) => {
                    error!(package, error = %format!("{failure:#}"), "record failed");
                    let mut outcome = RecordOutcome::new(package);
                    outcome.failure = Some(format!("{failure:#}"));
                    outcome
                }
            };
            stats.absorb(&outcome);
            outcomes.push(outcome);
        }

        info!(
            records = stats.records_processed,
            succeeded = stats.records_succeeded(),
            failed = stats.records_failed,
            files_copied = stats.files_copied,
            files_missing = stats.files_missing,
            "run complete"
        );
        Ok(RunResult { outcomes, stats })
    }

    fn process_record(
        &self,
        package: usize,
        record: &Record,
        filename_cols: &[String],
    ) -> Result<RecordOutcome> {
        let mut outcome = RecordOutcome::new(package);

        // Warn-only: absence never blocks package creation.
        outcome.missing_fields = missing_required_fields(record, self.config);
        if !outcome.missing_fields.is_empty() {
            warn!(
                package,
                missing = %outcome.missing_fields.join(", "),
                "record is missing required metadata fields"
            );
        }

        let package_dir = self.output_dir.join(package.to_string());
        if !self.options.dry_run {
            fs::create_dir_all(&package_dir)
                .with_context(|| format!("create {}", package_dir.display()))?;
            write_metadata_document(record, self.config, &package_dir.join(METADATA_FILE))?;
        }

        let tokens = extract_file_tokens(record, filename_cols, self.options.retarget_raw);
        let association = if self.files_dir.is_dir() {
            associate_files(&tokens, self.files_dir, self.config)?
        } else {
            FileAssociation {
                resolved: Vec::new(),
                unresolved: tokens.iter().cloned().collect(),
            }
        };

        for name in &association.resolved {
            if self.options.dry_run {
                outcome.copied.push(name.clone());
                continue;
            }
            let src = self.files_dir.join(name);
            let dst = package_dir.join(name);
            match fs::copy(&src, &dst) {
                Ok(_) => outcome.copied.push(name.clone()),
                Err(copy_error) => {
                    error!(package, file = %name, error = %copy_error, "copy failed");
                    outcome
                        .copy_errors
                        .push(format!("{name}: {copy_error}"));
                }
            }
        }
        for token in &association.unresolved {
            warn!(package, token = %token, "missing bitstream file");
        }
        outcome.missing_files = association.unresolved;

        if !self.options.dry_run {
            write_manifest(&package_dir, &outcome.copied)?;
        }

        info!(
            package,
            files_copied = outcome.copied.len(),
            files_missing = outcome.missing_files.len(),
            "package complete"
        );
        Ok(outcome)
    }
}

/// Writes the `contents` manifest: copied filenames sorted ascending, one
/// per line.
fn write_manifest(package_dir: &Path, copied: &[String]) -> Result<()> {
    let mut names: Vec<&str> = copied.iter().map(String::as_str).collect();
    names.sort_unstable();
    let mut manifest = String::new();
    for name in names {
        manifest.push_str(name);
        manifest.push('\n');
    }
    let path = package_dir.join(MANIFEST_FILE);
    fs::write(&path, manifest).with_context(|| format!("write {}", path.display()))
}

#[derive(Debug, Serialize)]
struct RunReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    stats: RunStats,
    records: &'a [RecordOutcome],
}

const REPORT_SCHEMA: &str = "saf-packager.run-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Writes a machine-readable run report next to the packages.
pub fn write_run_report_json(output_path: &Path, result: &RunResult) -> Result<PathBuf> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let payload = RunReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        stats: result.stats,
        records: &result.outcomes,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(output_path, format!("{json}\n"))
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(output_path.to_path_buf())
}
