//! End-to-end test: spreadsheet + bitstream directory in, validated
//! package tree out.

use std::fs;
use std::path::Path;

use saf_cli::pipeline::run_pipeline;
use saf_model::SafConfig;
use saf_pack::PipelineOptions;
use saf_validate::validate_tree;

fn write_spreadsheet(path: &Path) {
    let csv = "\
Fill in one row per item; leave template rows alone,,,\n\
dc.title,dc.creator,dc.date.issued,Filename\n\
First Item,Author One,2020-01-01,scan_001.pdf\n\
Second Item,Author Two,2021-06-30,missing_scan.pdf\n";
    fs::write(path, csv).unwrap();
}

#[test]
fn spreadsheet_to_validated_packages() {
    let workspace = tempfile::tempdir().unwrap();
    let spreadsheet = workspace.path().join("items.csv");
    let files_dir = workspace.path().join("bitstreams");
    let output_dir = workspace.path().join("saf_converted");
    write_spreadsheet(&spreadsheet);
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(files_dir.join("scan_001.pdf"), b"%PDF-1.4").unwrap();

    let config = SafConfig::default();
    let outcome = run_pipeline(
        &spreadsheet,
        &files_dir,
        &output_dir,
        &config,
        PipelineOptions::default(),
    )
    .unwrap();

    // Row 0 is free text; the header lives at offset 1.
    assert_eq!(outcome.header_row, 1);
    assert_eq!(
        outcome.columns,
        vec!["dc.title", "dc.creator", "dc.date.issued", "Filename"]
    );
    assert_eq!(outcome.run.stats.records_processed, 2);
    assert_eq!(outcome.run.stats.records_failed, 0);
    assert_eq!(outcome.run.stats.files_copied, 1);
    assert_eq!(outcome.run.stats.files_missing, 1);

    // Package 1 carries its bitstream, listed in the manifest.
    let package_one = output_dir.join("1");
    assert!(package_one.join("scan_001.pdf").is_file());
    let manifest = fs::read_to_string(package_one.join("contents")).unwrap();
    assert_eq!(manifest, "scan_001.pdf\n");
    let metadata = fs::read_to_string(package_one.join("dublin_core.xml")).unwrap();
    assert!(metadata.contains(
        "<dcvalue element=\"title\" qualifier=\"none\" language=\"en\">First Item</dcvalue>"
    ));
    assert!(metadata.contains(
        "<dcvalue element=\"date\" qualifier=\"issued\" language=\"en\">2020-01-01</dcvalue>"
    ));
    assert!(!metadata.contains("Second Item"));

    // Package 2 exists with an empty manifest and a recorded missing file.
    let package_two = output_dir.join("2");
    assert!(package_two.join("dublin_core.xml").is_file());
    let manifest = fs::read_to_string(package_two.join("contents")).unwrap();
    assert!(manifest.is_empty());
    assert_eq!(
        outcome.run.outcomes[1].missing_files,
        vec!["missing_scan.pdf".to_string()]
    );

    // Both metadata documents parse and satisfy the required fields.
    let report = validate_tree(&output_dir, &config).unwrap();
    assert!(report.passed(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.packages_checked, 2);
}

#[test]
fn missing_spreadsheet_is_fatal_before_any_package() {
    let workspace = tempfile::tempdir().unwrap();
    let output_dir = workspace.path().join("saf_converted");

    let config = SafConfig::default();
    let result = run_pipeline(
        &workspace.path().join("no_such.csv"),
        &workspace.path().join("bitstreams"),
        &output_dir,
        &config,
        PipelineOptions::default(),
    );

    assert!(result.is_err());
    assert!(!output_dir.exists());
}

#[test]
fn header_detection_survives_decoy_rows() {
    let workspace = tempfile::tempdir().unwrap();
    let spreadsheet = workspace.path().join("items.csv");
    // A later row holds more dc. cells, but the first row pairing a
    // filename cell with two dc. cells still wins.
    let csv = "\
Instructions: one item per row,,,,\n\
dc.title,dc.creator,Filename,,\n\
dc.title,dc.creator,dc.date.issued,dc.subject,dc.publisher\n\
A Title,Someone,scan.pdf,,\n";
    fs::write(&spreadsheet, csv).unwrap();

    let config = SafConfig::default();
    let outcome = run_pipeline(
        &spreadsheet,
        &workspace.path().join("bitstreams"),
        &workspace.path().join("out"),
        &config,
        PipelineOptions {
            dry_run: true,
            retarget_raw: false,
        },
    )
    .unwrap();
    assert_eq!(outcome.header_row, 1);
}
