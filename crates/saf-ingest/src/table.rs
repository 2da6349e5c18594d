//! Raw tabular loading and record building.
//!
//! The loader is the narrow collaborator the pipeline consumes: it yields
//! raw rows of string cells and, once a header row is chosen, canonical
//! columns plus one `Record` per data row in source order.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use saf_map::{canonical_column, is_placeholder_column};
use saf_model::Record;

use crate::error::{IngestError, Result};

/// Raw rows exactly as loaded, before header detection.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

/// Canonical columns plus data records, after header selection.
#[derive(Debug, Clone)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads the spreadsheet as raw rows, keeping blank rows so header offsets
/// stay aligned with the source.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    info!(path = %path.display(), rows = rows.len(), "loaded spreadsheet");
    Ok(RawTable { rows })
}

/// Builds canonical columns and records from the rows below the header.
///
/// Placeholder headers ("unnamed" or empty cells) are dropped entirely;
/// repeated header names get a `.<n>` suffix so each column keeps a
/// distinct value-lookup key while mapping back to the same base form.
/// Rows with nothing but blank cells are skipped.
pub fn build_records(table: &RawTable, header_index: usize) -> RecordTable {
    let header = table.rows.get(header_index).cloned().unwrap_or_default();

    let mut columns: Vec<Option<String>> = Vec::with_capacity(header.len());
    let mut seen: Vec<String> = Vec::new();
    for raw in &header {
        let name = canonical_column(raw);
        if name.is_empty() || is_placeholder_column(&name) {
            columns.push(None);
            continue;
        }
        let repeats = seen.iter().filter(|existing| **existing == name).count();
        seen.push(name.clone());
        if repeats == 0 {
            columns.push(Some(name));
        } else {
            columns.push(Some(format!("{name}.{repeats}")));
        }
    }

    let kept: Vec<String> = columns.iter().flatten().cloned().collect();
    debug!(columns = kept.len(), dropped = columns.len() - kept.len(), "cleaned header");

    let mut records = Vec::new();
    for row in table.rows.iter().skip(header_index + 1) {
        let mut cells = Vec::with_capacity(kept.len());
        for (position, column) in columns.iter().enumerate() {
            let Some(name) = column else {
                continue;
            };
            let value = row.get(position).map(String::as_str).unwrap_or("");
            cells.push((name.clone(), value.to_string()));
        }
        let record = Record::new(cells);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    RecordTable {
        columns: kept,
        records,
    }
}
