//! Bitstream filename normalization and cleanup.
//!
//! Scanned-file names arrive with diacritics, stray punctuation, and
//! spaces that break downstream matching. `clean_filename` maps them onto
//! a stable lowercase form; `rename_bitstreams` applies that form to a
//! whole directory with a rename log.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, warn};

const RENAME_LOG_NAME: &str = "bitstreams_cleanup.log";

/// Folds common Latin diacritics to their ASCII base letter. Characters
/// with no mapping pass through and are handled by the replacement rules.
fn fold_diacritic(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Normalizes a filename to a stable lowercase form.
///
/// Diacritics fold to ASCII, apostrophe-like characters become hyphens,
/// parentheses and spaces become underscores, anything else outside
/// `[a-z0-9._-]` becomes an underscore. Runs of the same separator
/// collapse, separators directly before an extension dot are dropped, and
/// leading/trailing separators are stripped. Version numbers ("v2.0")
/// survive intact.
pub fn clean_filename(name: &str) -> String {
    let mut mapped = String::with_capacity(name.len());
    for ch in name.chars() {
        let ch = fold_diacritic(ch);
        let replacement = match ch {
            '\u{2019}' | '\u{2018}' | '\'' => '-',
            '(' | ')' => '_',
            ch if ch.is_whitespace() => '_',
            ch if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') => {
                ch.to_ascii_lowercase()
            }
            _ => '_',
        };
        mapped.push(replacement);
    }

    // Collapse runs of the same separator.
    let mut collapsed = String::with_capacity(mapped.len());
    for ch in mapped.chars() {
        if matches!(ch, '_' | '-') && collapsed.ends_with(ch) {
            continue;
        }
        collapsed.push(ch);
    }

    // Drop separators sitting directly before a dot.
    let mut cleaned = String::with_capacity(collapsed.len());
    for ch in collapsed.chars() {
        if ch == '.' {
            while cleaned.ends_with('_') || cleaned.ends_with('-') {
                cleaned.pop();
            }
        }
        cleaned.push(ch);
    }

    cleaned.trim_matches(['_', '-']).to_string()
}

/// Rewrites camera-raw extensions (`.cr2`, `.cr3`) to `.jpeg` inside a
/// pipe-separated filename cell, leaving other names untouched. Returns
/// the rewritten cell and whether anything changed.
pub fn retarget_raw_extensions(cell: &str) -> (String, bool) {
    let mut changed = false;
    let parts: Vec<String> = cell
        .split('|')
        .map(|part| {
            let name = part.trim();
            let retargeted = retarget_one(name);
            if retargeted != name {
                changed = true;
            }
            retargeted
        })
        .collect();
    if changed {
        (parts.join(" | "), true)
    } else {
        (cell.to_string(), false)
    }
}

fn retarget_one(name: &str) -> String {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("cr2" | "cr3") => match name.rfind('.') {
            Some(dot) => format!("{}.jpeg", &name[..dot]),
            None => name.to_string(),
        },
        _ => name.to_string(),
    }
}

/// Result of a bitstream-directory cleanup pass.
#[derive(Debug, Clone, Default)]
pub struct RenameSummary {
    pub renamed: Vec<(PathBuf, PathBuf)>,
    pub failures: Vec<String>,
    pub log_path: PathBuf,
}

/// Renames every file under `dir` (recursively) to its cleaned form,
/// suffixing `_1`, `_2`, ... on collision, and writes a timestamped
/// rename log into the directory root. Hidden files are skipped.
pub fn rename_bitstreams(dir: &Path) -> Result<RenameSummary> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let mut summary = RenameSummary {
        log_path: dir.join(RENAME_LOG_NAME),
        ..RenameSummary::default()
    };

    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || name == RENAME_LOG_NAME {
            continue;
        }
        let cleaned = clean_filename(name);
        if cleaned == name || cleaned.is_empty() {
            continue;
        }
        let parent = path.parent().unwrap_or(dir);
        let target = next_free_name(parent, &cleaned);
        match fs::rename(&path, &target) {
            Ok(()) => {
                info!(from = %path.display(), to = %target.display(), "renamed bitstream");
                summary.renamed.push((path, target));
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "rename failed");
                summary
                    .failures
                    .push(format!("{}: {error}", path.display()));
            }
        }
    }

    write_rename_log(&summary)?;
    Ok(summary)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// First non-colliding variant of `cleaned` inside `parent`.
fn next_free_name(parent: &Path, cleaned: &str) -> PathBuf {
    let mut target = parent.join(cleaned);
    let (stem, extension) = match cleaned.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{ext}")),
        _ => (cleaned.to_string(), String::new()),
    };
    let mut counter = 1;
    while target.exists() {
        target = parent.join(format!("{stem}_{counter}{extension}"));
        counter += 1;
    }
    target
}

fn write_rename_log(summary: &RenameSummary) -> Result<()> {
    let mut log = format!(
        "bitstream cleanup log - {}\n{}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(80)
    );
    for (from, to) in &summary.renamed {
        log.push_str(&format!("{}  -->  {}\n", from.display(), to.display()));
    }
    for failure in &summary.failures {
        log.push_str(&format!("failed: {failure}\n"));
    }
    log.push_str(&format!("\nTotal files renamed: {}\n", summary.renamed.len()));
    fs::write(&summary.log_path, log)
        .with_context(|| format!("write {}", summary.log_path.display()))?;
    Ok(())
}
