//! Required-field checking.
//!
//! Warn-only: an unsatisfied specifier never blocks package creation.

use saf_model::{Record, SafConfig, is_blank_value};

use crate::canonical::{base_column, canonical_column};
use crate::dublin_core::decompose;

/// Returns the configured specifiers the record does not satisfy.
///
/// A specifier is a bare element ("title") or "element.qualifier"
/// ("date.issued"). It is satisfied when some metadata-bearing column
/// decomposes to the matching element (and qualifier, when given) with a
/// non-blank cell.
pub fn missing_required_fields(record: &Record, config: &SafConfig) -> Vec<String> {
    let mut missing = Vec::new();
    for specifier in &config.required_fields {
        let (want_element, want_qualifier) = match specifier.split_once('.') {
            Some((element, qualifier)) => (element, Some(qualifier)),
            None => (specifier.as_str(), None),
        };
        let satisfied = record.iter().any(|(column, value)| {
            if is_blank_value(value) {
                return false;
            }
            let base = base_column(&canonical_column(column)).to_string();
            let Some(field) = decompose(&base, &config.schema_prefix) else {
                return false;
            };
            field.element == want_element
                && match want_qualifier {
                    Some(qualifier) => field.qualifier.as_deref() == Some(qualifier),
                    None => true,
                }
        });
        if !satisfied {
            missing.push(specifier.clone());
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[(&str, &str)]) -> Record {
        Record::new(
            cells
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        )
    }

    #[test]
    fn reports_only_missing_specifiers() {
        let config = SafConfig::default();
        let record = record(&[
            ("dc.title", "A Title"),
            ("dc.creator", "Someone"),
            ("Filename", "scan.pdf"),
        ]);
        assert_eq!(missing_required_fields(&record, &config), vec!["date.issued"]);
    }

    #[test]
    fn blank_cell_does_not_satisfy() {
        let config = SafConfig::default();
        let record = record(&[
            ("dc.title", "nan"),
            ("dc.creator", "Someone"),
            ("dc.date.issued", "2021"),
        ]);
        assert_eq!(missing_required_fields(&record, &config), vec!["title"]);
    }

    #[test]
    fn qualifier_must_match_when_given() {
        let config = SafConfig::default();
        // dc.date alone does not satisfy date.issued.
        let record = record(&[
            ("dc.title", "A Title"),
            ("dc.creator", "Someone"),
            ("dc.date", "2021"),
        ]);
        assert_eq!(missing_required_fields(&record, &config), vec!["date.issued"]);
    }

    #[test]
    fn repeat_suffix_column_satisfies() {
        let config = SafConfig::default();
        let record = record(&[
            ("dc.title.1", "A Title"),
            ("dc.creator", "Someone"),
            ("dc.date.issued", "2021"),
        ]);
        assert!(missing_required_fields(&record, &config).is_empty());
    }

    #[test]
    fn all_present_reports_nothing() {
        let config = SafConfig::default();
        let record = record(&[
            ("dc.title", "A Title"),
            ("dc.creator", "Someone"),
            ("dc.date.issued", "2021-04-01"),
        ]);
        assert!(missing_required_fields(&record, &config).is_empty());
    }
}
