//! Core type definitions for column domains.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Value domain of a column.
///
/// Decided once when the table is loaded; validation and statistics key
/// their behaviour on this tag instead of inspecting each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnDomain {
    /// Free text.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
}

impl ColumnDomain {
    /// Returns true if this domain is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnDomain::Integer | ColumnDomain::Float)
    }

    /// Infer the domain from a column's non-null values.
    ///
    /// Integer if every value parses as `i64`, float if every value parses
    /// as `f64`, text otherwise. A column with no values is float.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return ColumnDomain::Float;
        }

        let mut domain = ColumnDomain::Integer;
        for value in values {
            if domain == ColumnDomain::Integer && parse_integer(value).is_none() {
                domain = ColumnDomain::Float;
            }
            if domain == ColumnDomain::Float && parse_number(value).is_none() {
                return ColumnDomain::Text;
            }
        }
        domain
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnDomain::Text => "text",
            ColumnDomain::Integer => "integer",
            ColumnDomain::Float => "float",
        }
    }
}

impl fmt::Display for ColumnDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a domain name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column type '{0}' (expected text, integer or float)")]
pub struct ParseDomainError(pub String);

impl FromStr for ColumnDomain {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "str" => Ok(ColumnDomain::Text),
            "integer" | "int" => Ok(ColumnDomain::Integer),
            "float" | "number" | "numeric" => Ok(ColumnDomain::Float),
            _ => Err(ParseDomainError(s.to_string())),
        }
    }
}

/// Parse a cell as an integer.
pub(crate) fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse a cell as a number.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}
