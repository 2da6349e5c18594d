//! Immutable run configuration.
//!
//! A single `SafConfig` value is built once by the CLI and passed by
//! reference into every component, so no component reads global state.

use serde::Deserialize;

/// Configuration for one packaging run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SafConfig {
    /// Schema identifier emitted on the metadata document root.
    pub schema: String,
    /// Column prefix marking a metadata-bearing column.
    pub schema_prefix: String,
    /// Language attribute emitted on every metadata field.
    pub language: String,
    /// Maximum number of leading rows scanned for the header.
    pub max_header_scan: usize,
    /// Extensions probed, in order, for extensionless file tokens.
    pub allowed_extensions: Vec<String>,
    /// Required field specifiers: a bare element or "element.qualifier".
    pub required_fields: Vec<String>,
}

impl Default for SafConfig {
    fn default() -> Self {
        Self {
            schema: "dc".to_string(),
            schema_prefix: "dc.".to_string(),
            language: "en".to_string(),
            max_header_scan: 25,
            allowed_extensions: [
                ".cr2", ".cr3", ".pdf", ".doc", ".docx", ".jpg", ".jpeg", ".png", ".gif",
                ".tiff", ".mp3", ".mp4", ".wav", ".avi", ".mov", ".mpeg", ".mpg", ".txt",
                ".rtf", ".xls", ".xlsx", ".zip", ".rar", ".7z",
            ]
            .iter()
            .map(|ext| (*ext).to_string())
            .collect(),
            required_fields: vec![
                "title".to_string(),
                "creator".to_string(),
                "date.issued".to_string(),
            ],
        }
    }
}
