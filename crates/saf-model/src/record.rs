//! Spreadsheet records and blank-value rules.

/// One spreadsheet data row: canonical column name to cell value, in
/// source column order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Record {
    cells: Vec<(String, String)>,
}

impl Record {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Cell value for an exact column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate (column, value) pairs in source column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| is_blank_value(value))
    }
}

/// A cell is blank when empty after trimming or when it holds a
/// "nan"/"none" placeholder left behind by the spreadsheet export.
pub fn is_blank_value(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "" | "nan" | "none")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(is_blank_value(""));
        assert!(is_blank_value("   "));
        assert!(is_blank_value("nan"));
        assert!(is_blank_value("NaN"));
        assert!(is_blank_value("None"));
        assert!(!is_blank_value("0"));
        assert!(!is_blank_value("nothing"));
    }

    #[test]
    fn record_lookup_uses_exact_column_name() {
        let record = Record::new(vec![
            ("dc.subject".to_string(), "history".to_string()),
            ("dc.subject.1".to_string(), "maps".to_string()),
        ]);
        assert_eq!(record.get("dc.subject"), Some("history"));
        assert_eq!(record.get("dc.subject.1"), Some("maps"));
        assert_eq!(record.get("dc.subject.2"), None);
    }

    #[test]
    fn blank_record() {
        let record = Record::new(vec![
            ("dc.title".to_string(), " ".to_string()),
            ("Filename".to_string(), "nan".to_string()),
        ]);
        assert!(record.is_blank());
    }
}
