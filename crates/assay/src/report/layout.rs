//! Text layout of the validation report.

use crate::statistics::StatisticsSummary;
use crate::validation::{IssueDetail, ValidationReport};

/// Horizontal placement of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One unit of vertical layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A single line of text.
    Line { text: String, align: Align },
    /// Blank space one line high.
    Gap,
}

/// Ordered blocks making up the report body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLayout {
    blocks: Vec<Block>,
}

impl ReportLayout {
    /// Lay out the title, the issues section and the statistics section.
    pub fn build(title: &str, report: &ValidationReport, summary: &StatisticsSummary) -> Self {
        let mut layout = Self::default();

        layout.centered(title);
        layout.gap();
        layout.line("Issues Found:");

        for (category, detail) in report.categories() {
            layout.line(format!("{}:", category.label()));
            match detail {
                IssueDetail::ColumnCounts(counts) => {
                    for (column, count) in counts {
                        layout.line(format!("  - {}: {} issues", column, count));
                    }
                }
                IssueDetail::ColumnMessages(messages) => {
                    for (column, message) in messages {
                        layout.line(format!("  - {}: {}", column, message));
                    }
                }
                IssueDetail::RowCount(count) => {
                    layout.line(format!("  - {} duplicate rows found", count));
                }
            }
        }

        layout.gap();
        layout.line("Summary Statistics:");

        for (column, stats) in summary.iter() {
            layout.line(format!("{}:", column));
            for (name, value) in &stats.values {
                layout.line(format!("  - {}: {}", name, value));
            }
        }

        layout
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Text of every line, gaps skipped.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Line { text, .. } => Some(text.as_str()),
            Block::Gap => None,
        })
    }

    fn line(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Line {
            text: text.into(),
            align: Align::Left,
        });
    }

    fn centered(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Line {
            text: text.into(),
            align: Align::Center,
        });
    }

    fn gap(&mut self) {
        self.blocks.push(Block::Gap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDomain;
    use crate::statistics::{ColumnStatistics, StatValue};

    #[test]
    fn test_clean_report_keeps_all_headers() {
        let layout = ReportLayout::build(
            "Data Validation Report",
            &ValidationReport::new(),
            &StatisticsSummary::new(),
        );
        let lines: Vec<&str> = layout.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Data Validation Report",
                "Issues Found:",
                "Missing Values:",
                "Incorrect Data Types:",
                "Duplicates:",
                "  - 0 duplicate rows found",
                "Summary Statistics:",
            ]
        );
        assert_eq!(
            layout.blocks()[0],
            Block::Line {
                text: "Data Validation Report".to_string(),
                align: Align::Center
            }
        );
        assert_eq!(layout.blocks()[1], Block::Gap);
    }

    #[test]
    fn test_findings_and_statistics_lines() {
        let mut report = ValidationReport::new();
        report.missing_values.insert("age".to_string(), 2);
        report
            .incorrect_types
            .insert("city".to_string(), "Expected string, found other types".to_string());
        report.duplicate_rows = 1;

        let mut summary = StatisticsSummary::new();
        let mut stats = ColumnStatistics::new(ColumnDomain::Integer);
        stats.push("count", StatValue::Number(3.0));
        stats.push("mean", StatValue::Number(3.0));
        summary.columns.insert("age".to_string(), stats);

        let layout = ReportLayout::build("Report", &report, &summary);
        let lines: Vec<&str> = layout.lines().collect();

        assert!(lines.contains(&"  - age: 2 issues"));
        assert!(lines.contains(&"  - city: Expected string, found other types"));
        assert!(lines.contains(&"  - 1 duplicate rows found"));
        assert_eq!(&lines[lines.len() - 3..], &["age:", "  - count: 3.0", "  - mean: 3.0"]);
    }
}
