use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use saf_cli::pipeline::{ConvertOutcome, run_pipeline};
use saf_model::{SafConfig, ValidationReport};
use saf_pack::{PipelineOptions, RenameSummary, rename_bitstreams, write_run_report_json};
use saf_validate::validate_tree;

use crate::cli::{ConvertArgs, RenameArgs, ValidateArgs};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertOutcome> {
    let config = load_config(args.config.as_deref())?;
    let options = PipelineOptions {
        dry_run: args.dry_run,
        retarget_raw: args.retarget_raw,
    };
    let outcome = run_pipeline(
        &args.spreadsheet,
        &args.files_dir,
        &args.output_dir,
        &config,
        options,
    )?;
    if let Some(report_path) = &args.report {
        let path = write_run_report_json(report_path, &outcome.run)?;
        info!(path = %path.display(), "run report written");
    }
    Ok(outcome)
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let config = load_config(args.config.as_deref())?;
    validate_tree(&args.output_root, &config)
}

pub fn run_rename(args: &RenameArgs) -> Result<RenameSummary> {
    rename_bitstreams(&args.files_dir)
}

fn load_config(path: Option<&Path>) -> Result<SafConfig> {
    let Some(path) = path else {
        return Ok(SafConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config =
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    Ok(config)
}
