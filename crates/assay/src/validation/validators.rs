//! Checks run against a loaded table.

use std::collections::HashSet;

use tracing::debug;

use super::report::ValidationReport;
use crate::input::{Column, Table};
use crate::schema::ColumnDomain;
use crate::schema::types::{parse_integer, parse_number};

/// Message for text columns holding numeric values.
pub const EXPECTED_STRING: &str = "Expected string, found other types";

/// Message for numeric columns holding non-numeric values.
pub const EXPECTED_NUMBER: &str = "Expected number, found other types";

/// Trait for checks.
pub trait Check {
    /// Name used in log entries.
    fn name(&self) -> &'static str;

    /// Inspect the table and record findings in the report.
    fn check(&self, table: &Table, report: &mut ValidationReport);
}

/// Counts null cells per column.
pub struct MissingValueCheck;

impl Check for MissingValueCheck {
    fn name(&self) -> &'static str {
        "missing_values"
    }

    fn check(&self, table: &Table, report: &mut ValidationReport) {
        for column in table.columns() {
            let nulls = column.null_count();
            if nulls > 0 {
                report.missing_values.insert(column.name().to_string(), nulls);
            }
        }
    }
}

/// Flags columns holding values outside their domain.
pub struct DataTypeCheck;

impl Check for DataTypeCheck {
    fn name(&self) -> &'static str {
        "data_types"
    }

    fn check(&self, table: &Table, report: &mut ValidationReport) {
        for column in table.columns() {
            if let Some(message) = self.domain_violation(column) {
                report
                    .incorrect_types
                    .insert(column.name().to_string(), message.to_string());
            }
        }
    }
}

impl DataTypeCheck {
    fn domain_violation(&self, column: &Column) -> Option<&'static str> {
        match column.domain() {
            ColumnDomain::Text => column
                .values()
                .any(|v| parse_number(v).is_some())
                .then_some(EXPECTED_STRING),
            ColumnDomain::Integer | ColumnDomain::Float => column
                .values()
                .any(|v| parse_number(v).is_none())
                .then_some(EXPECTED_NUMBER),
        }
    }
}

/// Counts rows that exactly repeat an earlier row.
///
/// The first occurrence of a row is not a duplicate. Nulls equal nulls;
/// numeric cells compare by value, so `1` and `1.0` match. Integer cells
/// compare exactly as `i64`, beyond the precision of `f64`.
pub struct DuplicateRowCheck;

/// Comparable form of one cell.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Integer(i64),
    Float(u64),
    Text(&'a str),
}

impl Check for DuplicateRowCheck {
    fn name(&self) -> &'static str {
        "duplicates"
    }

    fn check(&self, table: &Table, report: &mut ValidationReport) {
        let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(table.row_count());
        let mut duplicates = 0;

        for row_idx in 0..table.row_count() {
            if !seen.insert(self.row_key(table, row_idx)) {
                duplicates += 1;
            }
        }

        report.duplicate_rows = duplicates;
    }
}

impl DuplicateRowCheck {
    fn row_key<'a>(&self, table: &'a Table, row_idx: usize) -> Vec<CellKey<'a>> {
        table
            .columns()
            .iter()
            .map(|column| match column.get(row_idx) {
                None => CellKey::Null,
                Some(value) => numeric_key(column.domain(), value).unwrap_or(CellKey::Text(value)),
            })
            .collect()
    }
}

/// Key for a numeric-domain cell, `None` for text cells or unparseable values.
fn numeric_key(domain: ColumnDomain, value: &str) -> Option<CellKey<'_>> {
    if domain == ColumnDomain::Integer {
        if let Some(n) = parse_integer(value) {
            return Some(CellKey::Integer(n));
        }
    }
    if !domain.is_numeric() {
        return None;
    }

    let n = parse_number(value)?;
    // Whole floats share the integer key so `1` and `1.0` still match
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Some(CellKey::Integer(n as i64));
    }
    Some(CellKey::Float(n.to_bits()))
}

/// Runs the fixed set of checks.
pub struct ValidationEngine {
    checks: Vec<Box<dyn Check>>,
}

impl ValidationEngine {
    /// Create a validation engine with all checks.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(MissingValueCheck),
                Box::new(DataTypeCheck),
                Box::new(DuplicateRowCheck),
            ],
        }
    }

    /// Run all checks and collect the findings.
    pub fn validate(&self, table: &Table) -> ValidationReport {
        let mut report = ValidationReport::new();

        for check in &self.checks {
            check.check(table, &mut report);
            debug!(check = check.name(), "Check finished");
        }

        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<Option<&str>>>) -> Table {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cells = rows.iter().map(|r| r[i].map(String::from)).collect();
                Column::inferred(*name, cells)
            })
            .collect();
        Table::new(columns).unwrap()
    }

    #[test]
    fn test_missing_values_only_lists_affected_columns() {
        let table = make_table(
            vec!["name", "age"],
            vec![
                vec![Some("Alice"), None],
                vec![Some("Bob"), None],
                vec![Some("Carol"), Some("28")],
            ],
        );

        let mut report = ValidationReport::new();
        MissingValueCheck.check(&table, &mut report);

        assert_eq!(report.missing_values.get("age"), Some(&2));
        assert!(!report.missing_values.contains_key("name"));
    }

    #[test]
    fn test_mixed_text_column_is_flagged() {
        let table = make_table(
            vec!["city"],
            vec![vec![Some("NYC")], vec![Some("42")], vec![Some("LA")]],
        );

        let mut report = ValidationReport::new();
        DataTypeCheck.check(&table, &mut report);

        assert_eq!(
            report.incorrect_types.get("city").map(String::as_str),
            Some(EXPECTED_STRING)
        );
    }

    #[test]
    fn test_pure_text_column_is_not_flagged() {
        let table = make_table(
            vec!["city"],
            vec![vec![Some("NYC")], vec![None], vec![Some("LA")]],
        );

        let mut report = ValidationReport::new();
        DataTypeCheck.check(&table, &mut report);

        assert!(report.incorrect_types.is_empty());
    }

    #[test]
    fn test_numeric_column_with_text_is_flagged() {
        let column = Column::new(
            "age",
            ColumnDomain::Integer,
            vec![Some("25".to_string()), Some("unknown".to_string())],
        );
        let table = Table::new(vec![column]).unwrap();

        let mut report = ValidationReport::new();
        DataTypeCheck.check(&table, &mut report);

        assert_eq!(
            report.incorrect_types.get("age").map(String::as_str),
            Some(EXPECTED_NUMBER)
        );
    }

    #[test]
    fn test_integer_column_accepts_floats() {
        let column = Column::new(
            "n",
            ColumnDomain::Integer,
            vec![Some("1".to_string()), Some("2.5".to_string())],
        );
        let table = Table::new(vec![column]).unwrap();

        let mut report = ValidationReport::new();
        DataTypeCheck.check(&table, &mut report);

        assert!(report.incorrect_types.is_empty());
    }

    #[test]
    fn test_duplicate_rows() {
        let table = make_table(
            vec!["id", "name"],
            vec![
                vec![Some("1"), Some("Alice")],
                vec![Some("2"), Some("Bob")],
                vec![Some("1"), Some("Alice")],
                vec![Some("2"), Some("Bob")],
                vec![Some("3"), Some("Carol")],
            ],
        );

        let mut report = ValidationReport::new();
        DuplicateRowCheck.check(&table, &mut report);

        assert_eq!(report.duplicate_rows, 2);
    }

    #[test]
    fn test_duplicate_rows_treat_null_as_equal() {
        let table = make_table(
            vec!["a", "b"],
            vec![
                vec![Some("x"), None],
                vec![Some("x"), None],
                vec![Some("x"), Some("y")],
            ],
        );

        let mut report = ValidationReport::new();
        DuplicateRowCheck.check(&table, &mut report);

        assert_eq!(report.duplicate_rows, 1);
    }

    #[test]
    fn test_duplicate_rows_compare_numbers_by_value() {
        let table = make_table(
            vec!["x"],
            vec![vec![Some("1")], vec![Some("1.0")], vec![Some("-0")], vec![Some("0")]],
        );

        let mut report = ValidationReport::new();
        DuplicateRowCheck.check(&table, &mut report);

        assert_eq!(report.duplicate_rows, 2);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let table = make_table(
            vec!["id"],
            vec![
                vec![Some("9007199254740992")],
                vec![Some("9007199254740993")],
                vec![Some("9007199254740993")],
            ],
        );
        assert_eq!(table.columns()[0].domain(), ColumnDomain::Integer);

        let mut report = ValidationReport::new();
        DuplicateRowCheck.check(&table, &mut report);

        assert_eq!(report.duplicate_rows, 1);
    }

    #[test]
    fn test_engine_on_clean_table() {
        let table = make_table(
            vec!["name", "age"],
            vec![vec![Some("Alice"), Some("30")], vec![Some("Bob"), Some("25")]],
        );

        let report = ValidationEngine::new().validate(&table);

        assert!(report.is_clean());
        assert_eq!(report.categories().count(), 3);
    }
}
