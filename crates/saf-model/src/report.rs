//! Validation issues and reports for the package-tree validator.

use serde::Serialize;

/// A single structural problem found in one package.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Package directory name (the sequential number).
    pub package: String,
    pub message: String,
}

/// Ordered issue list for a whole package tree. Empty means pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub packages_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, package: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            package: package.to_string(),
            message: message.into(),
        });
    }

    /// Issues for one package, in recorded order.
    pub fn issues_for(&self, package: &str) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.package == package)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_passes() {
        let report = ValidationReport::default();
        assert!(report.passed());
    }

    #[test]
    fn issues_grouped_by_package() {
        let mut report = ValidationReport::default();
        report.push("1", "missing dublin_core.xml");
        report.push("2", "missing contents file");
        report.push("1", "listed in contents but missing: a.pdf");

        assert!(!report.passed());
        assert_eq!(report.issues_for("1").len(), 2);
        assert_eq!(report.issues_for("2").len(), 1);
    }
}
