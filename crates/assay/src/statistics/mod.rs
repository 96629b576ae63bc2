//! Per-column descriptive statistics.

mod describe;
mod summary;

pub use describe::Summarizer;
pub use summary::{ColumnStatistics, StatValue, StatisticsSummary, format_number};
