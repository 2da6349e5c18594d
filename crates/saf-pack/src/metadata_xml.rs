//! Metadata document generation.
//!
//! One `dublin_core.xml` per record: a root tagged with the schema
//! identifier holding one `dcvalue` node per unique
//! (element, qualifier, text) triple found in the record's
//! metadata-bearing columns.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use saf_map::{base_column, canonical_column, decompose};
use saf_model::{Record, SafConfig, is_blank_value};

/// Renders the metadata document for one record.
///
/// Output is deterministic UTF-8 with an XML declaration, no BOM,
/// two-space indentation, and exactly one trailing newline. A record with
/// no metadata fields still yields a minimal well-formed document.
pub fn metadata_document(record: &Record, config: &SafConfig) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("dublin_core");
    root.push_attribute(("schema", config.schema.as_str()));
    writer.write_event(Event::Start(root))?;

    let mut seen: BTreeSet<(String, String, String)> = BTreeSet::new();
    for (column, value) in record.iter() {
        if is_blank_value(value) {
            continue;
        }
        let base = base_column(&canonical_column(column)).to_string();
        let Some(field) = decompose(&base, &config.schema_prefix) else {
            continue;
        };
        let text = value.trim().to_string();
        let qualifier = field.qualifier_or_none().to_string();
        let key = (field.element.clone(), qualifier.clone(), text.clone());
        if !seen.insert(key) {
            continue;
        }

        let mut node = BytesStart::new("dcvalue");
        node.push_attribute(("element", field.element.as_str()));
        node.push_attribute(("qualifier", qualifier.as_str()));
        node.push_attribute(("language", config.language.as_str()));
        writer.write_event(Event::Start(node))?;
        writer.write_event(Event::Text(BytesText::new(&text)))?;
        writer.write_event(Event::End(BytesEnd::new("dcvalue")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("dublin_core")))?;

    let mut document = String::from_utf8(writer.into_inner())?;
    if !document.ends_with('\n') {
        document.push('\n');
    }
    Ok(document)
}

/// Writes the metadata document to disk, returning the field count.
pub fn write_metadata_document(
    record: &Record,
    config: &SafConfig,
    output_path: &Path,
) -> Result<usize> {
    let document = metadata_document(record, config)?;
    let fields = document.matches("<dcvalue").count();
    fs::write(output_path, &document)
        .with_context(|| format!("write {}", output_path.display()))?;
    debug!(path = %output_path.display(), fields, "wrote metadata document");
    Ok(fields)
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
    fn emits_one_node_per_field() {
        let config = SafConfig::default();
        let record = record(&[
            ("dc.title", "A Title"),
            ("dc.date.issued", "2021-04-01"),
            ("Filename", "scan.pdf"),
        ]);
        let document = metadata_document(&record, &config).unwrap();
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(document.contains(
            "<dcvalue element=\"title\" qualifier=\"none\" language=\"en\">A Title</dcvalue>"
        ));
        assert!(document.contains(
            "<dcvalue element=\"date\" qualifier=\"issued\" language=\"en\">2021-04-01</dcvalue>"
        ));
        assert!(!document.contains("scan.pdf"));
        assert!(document.ends_with("</dublin_core>\n"));
    }

    #[test]
    fn repeated_columns_with_equal_text_collapse() {
        let config = SafConfig::default();
        let record = record(&[
            ("dc.subject", "history"),
            ("dc.subject.1", "history"),
            ("dc.subject.2", "maps"),
        ]);
        let document = metadata_document(&record, &config).unwrap();
        assert_eq!(document.matches("history").count(), 1);
        assert_eq!(document.matches("<dcvalue").count(), 2);
    }

    #[test]
    fn blank_cells_are_skipped() {
        let config = SafConfig::default();
        let record = record(&[("dc.title", "nan"), ("dc.creator", "  ")]);
        let document = metadata_document(&record, &config).unwrap();
        assert_eq!(document.matches("<dcvalue").count(), 0);
        assert!(document.contains("<dublin_core schema=\"dc\">"));
        assert!(document.ends_with("\n"));
    }

    #[test]
    fn text_is_escaped() {
        let config = SafConfig::default();
        let record = record(&[("dc.title", "Maps & Surveys <1900>")]);
        let document = metadata_document(&record, &config).unwrap();
        assert!(document.contains("Maps &amp; Surveys &lt;1900&gt;"));
    }

    #[test]
    fn write_reports_field_count() {
        let config = SafConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dublin_core.xml");
        let record = record(&[("dc.title", "A Title")]);
        let fields = write_metadata_document(&record, &config, &path).unwrap();
        assert_eq!(fields, 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
    }
}
