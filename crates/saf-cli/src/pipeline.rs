//! Convert-pipeline wiring: ingest, header detection, packaging.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use saf_ingest::{build_records, detect_header_row, read_raw_table};
use saf_model::SafConfig;
use saf_pack::{PipelineOptions, RecordPipeline, RunResult};

/// Everything the convert command needs for its summary.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub spreadsheet: PathBuf,
    pub output_dir: PathBuf,
    pub header_row: usize,
    pub columns: Vec<String>,
    pub run: RunResult,
}

impl ConvertOutcome {
    pub fn has_failures(&self) -> bool {
        self.run.has_failures()
    }
}

/// Runs the full packaging pipeline for one spreadsheet.
pub fn run_pipeline(
    spreadsheet: &Path,
    files_dir: &Path,
    output_dir: &Path,
    config: &SafConfig,
    options: PipelineOptions,
) -> Result<ConvertOutcome> {
    let span = info_span!("convert", spreadsheet = %spreadsheet.display());
    let _guard = span.enter();

    let raw = read_raw_table(spreadsheet).context("load spreadsheet")?;
    let detection = detect_header_row(&raw.rows, config);
    let table = build_records(&raw, detection.index);
    info!(
        header_row = detection.index,
        columns = table.columns.len(),
        records = table.records.len(),
        "spreadsheet ingested"
    );

    let pipeline = RecordPipeline::new(config, files_dir, output_dir, options);
    let run = pipeline.run(&table.columns, &table.records)?;

    Ok(ConvertOutcome {
        spreadsheet: spreadsheet.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        header_row: detection.index,
        columns: table.columns,
        run,
    })
}
