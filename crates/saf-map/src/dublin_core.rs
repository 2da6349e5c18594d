//! Qualified Dublin Core column classification and decomposition.

use crate::canonical::normalize_key;

/// A decomposed metadata column: element plus optional qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcField {
    pub element: String,
    pub qualifier: Option<String>,
}

impl DcField {
    /// Qualifier with the literal "none" default used in documents and
    /// dedup keys.
    pub fn qualifier_or_none(&self) -> &str {
        self.qualifier.as_deref().unwrap_or("none")
    }
}

/// True when a base column name carries schema metadata.
pub fn is_metadata_column(base: &str, schema_prefix: &str) -> bool {
    base.trim().to_lowercase().starts_with(schema_prefix)
}

/// Decomposes a metadata-bearing base name into (element, qualifier).
///
/// Two dot-separated segments yield a bare element; three or more keep the
/// remainder joined, so qualifiers with embedded dots survive
/// ("dc.description.abstract" -> element "description", qualifier
/// "abstract").
pub fn decompose(base: &str, schema_prefix: &str) -> Option<DcField> {
    let lowered = base.trim().to_lowercase();
    if !lowered.starts_with(schema_prefix) {
        return None;
    }
    let parts: Vec<&str> = lowered.split('.').collect();
    match parts.len() {
        0 | 1 => None,
        2 => Some(DcField {
            element: parts[1].to_string(),
            qualifier: None,
        }),
        _ => Some(DcField {
            element: parts[1].to_string(),
            qualifier: Some(parts[2..].join(".")),
        }),
    }
}

/// True when a column looks like a filename source (Filename, file name,
/// file_name, dc.filename, Bitstream, ...).
pub fn is_filename_column(name: &str) -> bool {
    let key = normalize_key(name);
    key.contains("filename") || key.contains("file") || key.contains("bitstream")
}

/// All filename-bearing columns; every one contributes tokens per record.
pub fn filename_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|name| is_filename_column(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_bare_element() {
        let field = decompose("dc.title", "dc.").unwrap();
        assert_eq!(field.element, "title");
        assert_eq!(field.qualifier, None);
        assert_eq!(field.qualifier_or_none(), "none");
    }

    #[test]
    fn decompose_qualified() {
        let field = decompose("dc.date.issued", "dc.").unwrap();
        assert_eq!(field.element, "date");
        assert_eq!(field.qualifier.as_deref(), Some("issued"));
    }

    #[test]
    fn decompose_keeps_embedded_qualifier_dots() {
        let field = decompose("dc.description.abstract.fr", "dc.").unwrap();
        assert_eq!(field.element, "description");
        assert_eq!(field.qualifier.as_deref(), Some("abstract.fr"));
    }

    #[test]
    fn decompose_rejects_foreign_columns() {
        assert_eq!(decompose("Filename", "dc."), None);
        assert_eq!(decompose("notes", "dc."), None);
    }

    #[test]
    fn decompose_is_case_insensitive() {
        let field = decompose("DC.Title", "dc.").unwrap();
        assert_eq!(field.element, "title");
    }

    #[test]
    fn metadata_column_classification() {
        assert!(is_metadata_column("dc.title", "dc."));
        assert!(is_metadata_column("  DC.Subject ", "dc."));
        assert!(!is_metadata_column("dcterms", "dc."));
        assert!(!is_metadata_column("Filename", "dc."));
    }

    #[test]
    fn filename_column_variants() {
        assert!(is_filename_column("Filename"));
        assert!(is_filename_column("file name"));
        assert!(is_filename_column("file_name"));
        assert!(is_filename_column("dc.filename"));
        assert!(is_filename_column("Bitstream Name"));
        assert!(!is_filename_column("dc.title"));
    }

    #[test]
    fn filename_columns_keep_all_candidates() {
        let columns = vec![
            "dc.title".to_string(),
            "Filename".to_string(),
            "Additional Files".to_string(),
        ];
        assert_eq!(filename_columns(&columns), vec!["Filename", "Additional Files"]);
    }
}
