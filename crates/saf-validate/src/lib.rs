//! Standalone package-tree validation.
//!
//! Re-walks a finished output tree and reports structural problems
//! without sharing any state with the writer: a missing or malformed
//! metadata document, absent required fields, a missing manifest, or
//! manifest entries pointing at files that are not in the package.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use tracing::{debug, info};

use saf_model::{SafConfig, ValidationReport, is_blank_value};

const METADATA_FILE: &str = "dublin_core.xml";
const MANIFEST_FILE: &str = "contents";

/// A metadata field read back out of a package document.
#[derive(Debug, Clone)]
struct ParsedField {
    element: String,
    qualifier: Option<String>,
    text: String,
}

/// Validates every package directory under `root`, in lexical order of
/// directory name. Never lets one package's failure stop the walk.
pub fn validate_tree(root: &Path, config: &SafConfig) -> Result<ValidationReport> {
    if !root.is_dir() {
        return Err(anyhow!("not a directory: {}", root.display()));
    }

    let mut package_dirs = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let entry = entry.with_context(|| format!("read {}", root.display()))?;
        if entry.path().is_dir() {
            package_dirs.push(entry.path());
        }
    }
    package_dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut report = ValidationReport {
        packages_checked: package_dirs.len(),
        ..ValidationReport::default()
    };
    for dir in &package_dirs {
        let package = dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("?")
            .to_string();
        for message in validate_package(dir, config) {
            report.push(&package, message);
        }
    }

    info!(
        packages = report.packages_checked,
        issues = report.issues.len(),
        "validation complete"
    );
    Ok(report)
}

/// Checks one package directory. All failures are returned as messages;
/// nothing escapes this function.
fn validate_package(dir: &Path, config: &SafConfig) -> Vec<String> {
    let mut issues = Vec::new();

    let metadata_path = dir.join(METADATA_FILE);
    if !metadata_path.is_file() {
        issues.push(format!("missing {METADATA_FILE}"));
        // Without the document neither field checks nor further parsing
        // apply, but the manifest is still checked below.
    } else {
        match read_metadata_fields(&metadata_path) {
            Ok(fields) => {
                for specifier in &config.required_fields {
                    if !specifier_satisfied(&fields, specifier) {
                        issues.push(format!(
                            "missing required metadata: {}{specifier}",
                            config.schema_prefix
                        ));
                    }
                }
            }
            Err(parse_error) => {
                issues.push(format!("invalid metadata document: {parse_error}"));
            }
        }
    }

    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        issues.push(format!("missing {MANIFEST_FILE} file"));
    } else {
        match fs::read_to_string(&manifest_path) {
            Ok(manifest) => {
                for line in manifest.lines() {
                    // The first whitespace-delimited token is the filename;
                    // a trailing bundle specifier is ignored.
                    let Some(name) = line.split_whitespace().next() else {
                        continue;
                    };
                    if !dir.join(name).is_file() {
                        issues.push(format!("listed in {MANIFEST_FILE} but missing: {name}"));
                    }
                }
            }
            Err(read_error) => {
                issues.push(format!("unreadable {MANIFEST_FILE} file: {read_error}"));
            }
        }
    }

    debug!(package = %dir.display(), issues = issues.len(), "package checked");
    issues
}

fn specifier_satisfied(fields: &[ParsedField], specifier: &str) -> bool {
    let (want_element, want_qualifier) = match specifier.split_once('.') {
        Some((element, qualifier)) => (element, Some(qualifier)),
        None => (specifier, None),
    };
    fields.iter().any(|field| {
        !is_blank_value(&field.text)
            && field.element == want_element
            && match want_qualifier {
                Some(qualifier) => field.qualifier.as_deref() == Some(qualifier),
                None => true,
            }
    })
}

/// Parses the metadata document, returning its field nodes.
fn read_metadata_fields(path: &Path) -> Result<Vec<ParsedField>> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut reader = Reader::from_str(&content);
    let mut buf = Vec::new();
    let mut fields = Vec::new();
    let mut current: Option<ParsedField> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"dcvalue" => {
                let mut element = String::new();
                let mut qualifier = None;
                for attribute in e.attributes() {
                    let attribute = attribute?;
                    let value = attribute.unescape_value()?.into_owned();
                    match attribute.key.as_ref() {
                        b"element" => element = value,
                        b"qualifier" if value != "none" => qualifier = Some(value),
                        _ => {}
                    }
                }
                current = Some(ParsedField {
                    element,
                    qualifier,
                    text: String::new(),
                });
            }
            Event::Text(ref t) => {
                if let Some(field) = current.as_mut() {
                    field.text.push_str(&unescape(&t.decode()?)?);
                }
            }
            Event::End(ref e) if e.name().as_ref() == b"dcvalue" => {
                if let Some(field) = current.take() {
                    fields.push(field);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(fields)
}
