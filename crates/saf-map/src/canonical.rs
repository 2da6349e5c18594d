//! Column-name canonicalization.
//!
//! Headers arrive in whatever shape the spreadsheet template left them:
//! padded with whitespace, duplicated with a trailing `.<n>` repeat suffix,
//! or auto-generated placeholders for cells the template never named.

/// Trims a header, preserving the original casing.
pub fn canonical_column(raw: &str) -> String {
    raw.trim().to_string()
}

/// True for machine-generated placeholder headers that carry no data.
pub fn is_placeholder_column(name: &str) -> bool {
    name.to_lowercase().contains("unnamed")
}

/// Normalizes a header for fuzzy matching: lowercase with whitespace,
/// underscores, hyphens, and dots stripped.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '_' | '-' | '.'))
        .collect()
}

/// Strips a trailing `.<digits>` repeat suffix so `dc.subject.2` maps the
/// same as `dc.subject`. The original name stays the value-lookup key.
pub fn base_column(name: &str) -> &str {
    if let Some((base, suffix)) = name.rsplit_once('.')
        && !suffix.is_empty()
        && suffix.chars().all(|ch| ch.is_ascii_digit())
    {
        return base;
    }
    name
}
