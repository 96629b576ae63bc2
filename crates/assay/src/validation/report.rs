//! Validation findings grouped by issue category.

use indexmap::IndexMap;

/// Category of data-quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Null cells per column.
    MissingValues,
    /// Columns holding values outside their domain.
    IncorrectDataTypes,
    /// Rows repeating an earlier row.
    Duplicates,
}

impl IssueCategory {
    /// All categories, in report order.
    pub const ALL: [IssueCategory; 3] = [
        IssueCategory::MissingValues,
        IssueCategory::IncorrectDataTypes,
        IssueCategory::Duplicates,
    ];

    /// Get a human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::MissingValues => "Missing Values",
            IssueCategory::IncorrectDataTypes => "Incorrect Data Types",
            IssueCategory::Duplicates => "Duplicates",
        }
    }
}

/// Category-specific detail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IssueDetail<'a> {
    /// Column name to number of affected cells.
    ColumnCounts(&'a IndexMap<String, usize>),
    /// Column name to a fixed message.
    ColumnMessages(&'a IndexMap<String, String>),
    /// A single count of affected rows.
    RowCount(usize),
}

impl IssueDetail<'_> {
    /// True when the category found nothing.
    pub fn is_clean(&self) -> bool {
        match self {
            IssueDetail::ColumnCounts(counts) => counts.is_empty(),
            IssueDetail::ColumnMessages(messages) => messages.is_empty(),
            IssueDetail::RowCount(count) => *count == 0,
        }
    }
}

/// Findings from the three validation checks.
///
/// Every category is always present; a clean table has empty maps and a zero
/// duplicate count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Null cell count for each column that has any.
    pub missing_values: IndexMap<String, usize>,
    /// Message for each column with out-of-domain values.
    pub incorrect_types: IndexMap<String, String>,
    /// Rows that repeat an earlier row.
    pub duplicate_rows: usize,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detail for one category.
    pub fn detail(&self, category: IssueCategory) -> IssueDetail<'_> {
        match category {
            IssueCategory::MissingValues => IssueDetail::ColumnCounts(&self.missing_values),
            IssueCategory::IncorrectDataTypes => IssueDetail::ColumnMessages(&self.incorrect_types),
            IssueCategory::Duplicates => IssueDetail::RowCount(self.duplicate_rows),
        }
    }

    /// All categories with their detail, in report order.
    pub fn categories(&self) -> impl Iterator<Item = (IssueCategory, IssueDetail<'_>)> {
        IssueCategory::ALL.into_iter().map(|c| (c, self.detail(c)))
    }

    /// True when no category found anything.
    pub fn is_clean(&self) -> bool {
        self.categories().all(|(_, detail)| detail.is_clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_has_every_category() {
        let report = ValidationReport::new();
        let labels: Vec<&str> = report.categories().map(|(c, _)| c.label()).collect();

        assert_eq!(labels, vec!["Missing Values", "Incorrect Data Types", "Duplicates"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_detail_reflects_findings() {
        let mut report = ValidationReport::new();
        report.missing_values.insert("age".to_string(), 2);
        report.duplicate_rows = 1;

        assert!(!report.detail(IssueCategory::MissingValues).is_clean());
        assert!(report.detail(IssueCategory::IncorrectDataTypes).is_clean());
        assert_eq!(report.detail(IssueCategory::Duplicates), IssueDetail::RowCount(1));
        assert!(!report.is_clean());
    }
}
