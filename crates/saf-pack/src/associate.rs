//! File-token extraction and bitstream association.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use saf_model::{FileAssociation, Record, SafConfig, is_blank_value};

use crate::filename::retarget_raw_extensions;

/// Separators accepted inside a filename cell.
const TOKEN_SEPARATORS: [char; 4] = [';', ',', '|', '\n'];

/// Collects filename tokens from every filename-bearing column of a record.
///
/// Cells are split on `;`, `,`, `|`, and newlines; each part is reduced to
/// its basename and blank or placeholder parts are discarded. Tokens from
/// all columns are unioned.
pub fn extract_file_tokens(
    record: &Record,
    filename_columns: &[String],
    retarget_raw: bool,
) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for column in filename_columns {
        let Some(raw) = record.get(column) else {
            continue;
        };
        if is_blank_value(raw) {
            continue;
        }
        let cell = if retarget_raw {
            retarget_raw_extensions(raw).0
        } else {
            raw.to_string()
        };
        for part in cell.split(TOKEN_SEPARATORS) {
            let token = basename_only(part.trim());
            if token.is_empty() || is_blank_value(&token) {
                continue;
            }
            tokens.insert(token);
        }
    }
    tokens
}

fn basename_only(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .to_string()
}

/// Resolves tokens against the bitstream directory.
///
/// Strategies per token, first success wins: exact filename match,
/// case-insensitive full match, then extension probing for extensionless
/// tokens. Candidate names are sorted before matching so resolution is
/// deterministic even when names differ only by case.
pub fn associate_files(
    tokens: &BTreeSet<String>,
    files_dir: &Path,
    config: &SafConfig,
) -> Result<FileAssociation> {
    let names = list_file_names(files_dir)?;
    let mut association = FileAssociation::default();

    for token in tokens {
        match resolve_token(token, &names, config) {
            Some(resolved) => {
                debug!(token, resolved = %resolved, "file token resolved");
                if !association.resolved.contains(&resolved) {
                    association.resolved.push(resolved);
                }
            }
            None => association.unresolved.push(token.clone()),
        }
    }
    Ok(association)
}

fn resolve_token(token: &str, names: &[String], config: &SafConfig) -> Option<String> {
    // Strategy 1: exact match.
    if names.iter().any(|name| name == token) {
        return Some(token.to_string());
    }
    // Strategy 2: case-insensitive full match, first sorted name wins.
    let token_lower = token.to_lowercase();
    if let Some(name) = names.iter().find(|name| name.to_lowercase() == token_lower) {
        return Some(name.clone());
    }
    // Strategy 3: extension probing for extensionless tokens.
    if Path::new(token).extension().is_none() {
        for extension in &config.allowed_extensions {
            let candidate = format!("{token}{extension}");
            if names.iter().any(|name| *name == candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Lists plain-file names in the bitstream directory, sorted ascending.
fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
