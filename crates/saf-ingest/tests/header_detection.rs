//! Header detection against real CSV files.

use std::fs;

use saf_ingest::{HeaderChoice, build_records, detect_header_row, read_raw_table};
use saf_model::SafConfig;

#[test]
fn template_preamble_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.csv");
    fs::write(
        &path,
        "How to use this template,,,\n\
         Do not delete this row,,,\n\
         dc.title,dc.creator,dc.date.issued,Filename\n\
         A Title,Someone,2021,scan.pdf\n",
    )
    .unwrap();

    let config = SafConfig::default();
    let table = read_raw_table(&path).unwrap();
    let detection = detect_header_row(&table.rows, &config);
    assert_eq!(detection.index, 2);
    assert_eq!(detection.choice, HeaderChoice::FilenameAndPrefix);

    let built = build_records(&table, detection.index);
    assert_eq!(built.records.len(), 1);
    assert_eq!(built.records[0].get("Filename"), Some("scan.pdf"));
}

#[test]
fn prefix_count_fallback_picks_first_maximum() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.csv");
    // No filename-like cell anywhere; prefix counts are 0, 1, 3, 2.
    fs::write(
        &path,
        "notes,,\n\
         dc.title,notes,\n\
         dc.title,dc.creator,dc.date.issued\n\
         dc.title,dc.creator,other\n",
    )
    .unwrap();

    let config = SafConfig::default();
    let table = read_raw_table(&path).unwrap();
    let detection = detect_header_row(&table.rows, &config);
    assert_eq!(detection.index, 2);
    assert_eq!(detection.choice, HeaderChoice::BestPrefixCount);
}

#[test]
fn bom_on_first_header_cell_is_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.csv");
    fs::write(
        &path,
        "\u{feff}dc.title,dc.creator,Filename\nA Title,Someone,scan.pdf\n",
    )
    .unwrap();

    let config = SafConfig::default();
    let table = read_raw_table(&path).unwrap();
    let detection = detect_header_row(&table.rows, &config);
    let built = build_records(&table, detection.index);
    assert_eq!(built.columns[0], "dc.title");
}
