//! Header-row detection.
//!
//! Archival spreadsheets often open with template text or instructions, so
//! the column-name row has to be found rather than assumed.

use saf_map::normalize_key;
use saf_model::{SafConfig, is_blank_value};
use tracing::{debug, info};

/// How the header row was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderChoice {
    /// A row with a filename-like cell and at least two schema-prefixed cells.
    FilenameAndPrefix,
    /// No such row; the row with the most schema-prefixed cells won.
    BestPrefixCount,
    /// Nothing structured found; the first row is assumed.
    Fallback,
}

/// Selected header row plus the rule that selected it.
#[derive(Debug, Clone, Copy)]
pub struct HeaderDetection {
    pub index: usize,
    pub choice: HeaderChoice,
    pub prefix_count: usize,
}

/// Scans the leading rows for the header.
///
/// The first row combining a filename-like cell with two or more
/// schema-prefixed cells wins outright. Failing that, the first row with
/// the strictly greatest prefix count (> 0) wins. Otherwise row 0.
pub fn detect_header_row(rows: &[Vec<String>], config: &SafConfig) -> HeaderDetection {
    let prefix = config.schema_prefix.to_lowercase();
    let mut best_index = None;
    let mut best_count = 0usize;

    for (index, row) in rows.iter().take(config.max_header_scan).enumerate() {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| cell.trim())
            .filter(|cell| !is_blank_value(cell))
            .collect();
        let has_filename = cells
            .iter()
            .any(|cell| normalize_key(cell).contains("filename"));
        let prefix_count = cells
            .iter()
            .filter(|cell| cell.to_lowercase().starts_with(&prefix))
            .count();
        debug!(row = index, has_filename, prefix_count, "header scan");

        if has_filename && prefix_count >= 2 {
            info!(
                row = index,
                prefix_count, "header row detected (filename cell + schema columns)"
            );
            return HeaderDetection {
                index,
                choice: HeaderChoice::FilenameAndPrefix,
                prefix_count,
            };
        }
        // Running maximum updates only on strict improvement, so the first
        // row at the top count wins ties.
        if prefix_count > best_count {
            best_count = prefix_count;
            best_index = Some(index);
        }
    }

    if let Some(index) = best_index {
        info!(row = index, prefix_count = best_count, "header row guessed from schema columns");
        return HeaderDetection {
            index,
            choice: HeaderChoice::BestPrefixCount,
            prefix_count: best_count,
        };
    }

    info!("header row fallback to first row");
    HeaderDetection {
        index: 0,
        choice: HeaderChoice::Fallback,
        prefix_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn filename_plus_prefixes_wins_immediately() {
        let config = SafConfig::default();
        let rows = rows(&[
            &["Fill in one row per item", "", ""],
            &["dc.title", "dc.creator", "Filename"],
            &["dc.title", "dc.creator", "dc.date.issued", "dc.subject", "Filename"],
        ]);
        let detection = detect_header_row(&rows, &config);
        assert_eq!(detection.index, 1);
        assert_eq!(detection.choice, HeaderChoice::FilenameAndPrefix);
    }

    #[test]
    fn best_prefix_count_first_max_wins() {
        let config = SafConfig::default();
        // Prefix counts 0, 1, 3, 2 and no filename cell anywhere.
        let rows = rows(&[
            &["instructions", "", ""],
            &["dc.title", "notes", ""],
            &["dc.title", "dc.creator", "dc.date.issued"],
            &["dc.title", "dc.creator", "other"],
        ]);
        let detection = detect_header_row(&rows, &config);
        assert_eq!(detection.index, 2);
        assert_eq!(detection.choice, HeaderChoice::BestPrefixCount);
        assert_eq!(detection.prefix_count, 3);
    }

    #[test]
    fn tie_keeps_earlier_row() {
        let config = SafConfig::default();
        let rows = rows(&[
            &["dc.title", "dc.creator"],
            &["dc.title", "dc.creator"],
        ]);
        assert_eq!(detect_header_row(&rows, &config).index, 0);
    }

    #[test]
    fn unstructured_input_falls_back_to_first_row() {
        let config = SafConfig::default();
        let rows = rows(&[&["free text", "more text"], &["a", "b"]]);
        let detection = detect_header_row(&rows, &config);
        assert_eq!(detection.index, 0);
        assert_eq!(detection.choice, HeaderChoice::Fallback);
    }

    #[test]
    fn scan_limit_is_honored() {
        let config = SafConfig {
            max_header_scan: 2,
            ..SafConfig::default()
        };
        let rows = rows(&[
            &["noise", ""],
            &["noise", ""],
            &["dc.title", "dc.creator", "Filename"],
        ]);
        let detection = detect_header_row(&rows, &config);
        assert_eq!(detection.index, 0);
        assert_eq!(detection.choice, HeaderChoice::Fallback);
    }
}
