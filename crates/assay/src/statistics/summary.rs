//! Summary statistics containers.

use std::fmt;

use indexmap::IndexMap;

use crate::schema::ColumnDomain;

/// A single computed statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    /// A count of cells or distinct values.
    Count(usize),
    /// A numeric result.
    Number(f64),
    /// A value taken from the column itself.
    Text(String),
    /// Not computable for this column (no values, or too few).
    Undefined,
}

impl StatValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Count(n) => Some(*n as f64),
            StatValue::Number(x) => Some(*x),
            StatValue::Text(_) | StatValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, StatValue::Undefined)
    }
}

impl From<Option<f64>> for StatValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(StatValue::Undefined, StatValue::Number)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Number(x) => f.write_str(&format_number(*x)),
            StatValue::Text(s) => f.write_str(s),
            StatValue::Undefined => f.write_str("nan"),
        }
    }
}

/// Format a float the way report readers expect: shortest round-trip
/// digits, integral values keep a trailing `.0`, very large or very small
/// magnitudes switch to exponent form (`1e+16`, `1.5e-05`).
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let s = x.to_string();
        if s.contains('.') { s } else { format!("{}.0", s) }
    } else {
        let s = format!("{:e}", x);
        match s.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => s,
        }
    }
}

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    /// Domain the statistics were computed for.
    pub domain: ColumnDomain,
    /// Statistic name to value, in display order.
    pub values: IndexMap<String, StatValue>,
}

impl ColumnStatistics {
    pub fn new(domain: ColumnDomain) -> Self {
        Self {
            domain,
            values: IndexMap::new(),
        }
    }

    /// Append a statistic.
    pub fn push(&mut self, name: &str, value: StatValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Look up a statistic by name.
    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.values.get(name)
    }
}

/// Per-column statistics for a whole table, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsSummary {
    pub columns: IndexMap<String, ColumnStatistics>,
}

impl StatisticsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for a column.
    pub fn column(&self, name: &str) -> Option<&ColumnStatistics> {
        self.columns.get(name)
    }

    /// Look up one statistic of one column.
    pub fn get(&self, column: &str, stat: &str) -> Option<&StatValue> {
        self.column(column).and_then(|c| c.get(stat))
    }

    /// Iterate columns in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnStatistics)> {
        self.columns.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3.0");
        assert_eq!(format_number(-2.0), "-2.0");
        assert_eq!(format_number(1.5811388300841898), "1.5811388300841898");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1.5e-5), "1.5e-05");
        assert_eq!(format_number(f64::NAN), "nan");
    }

    #[test]
    fn test_stat_value_display() {
        assert_eq!(StatValue::Count(5).to_string(), "5");
        assert_eq!(StatValue::Text("NYC".into()).to_string(), "NYC");
        assert_eq!(StatValue::Undefined.to_string(), "nan");
        assert_eq!(StatValue::from(None).to_string(), "nan");
    }
}
