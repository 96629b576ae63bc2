//! Descriptive statistics per column.

use indexmap::IndexMap;

use super::summary::{ColumnStatistics, StatValue, StatisticsSummary};
use crate::input::{Column, Table};
use crate::schema::ColumnDomain;
use crate::schema::types::parse_number;

// =============================================================================
// MOMENTS
// =============================================================================
// Sums are pairwise (blocks of 8 partial sums, halving above 128 values) so
// means and deviations carry the same rounding as array-based tools.

const PAIRWISE_BLOCK: usize = 128;

fn pairwise_sum(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 8 {
        return values.iter().fold(0.0, |acc, &v| acc + v);
    }
    if n > PAIRWISE_BLOCK {
        let mut half = n / 2;
        half -= half % 8;
        return pairwise_sum(&values[..half]) + pairwise_sum(&values[half..]);
    }

    let mut partial = [0.0f64; 8];
    partial.copy_from_slice(&values[..8]);
    let mut chunks = values[8..].chunks_exact(8);
    for chunk in &mut chunks {
        for (acc, &v) in partial.iter_mut().zip(chunk) {
            *acc += v;
        }
    }

    let mut sum = ((partial[0] + partial[1]) + (partial[2] + partial[3]))
        + ((partial[4] + partial[5]) + (partial[6] + partial[7]));
    for &v in chunks.remainder() {
        sum += v;
    }
    sum
}

fn sample_mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| pairwise_sum(values) / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), from squared deviations
/// around the mean.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let squared: Vec<f64> = values.iter().map(|v| (mean - v) * (mean - v)).collect();
    Some((pairwise_sum(&squared) / (values.len() - 1) as f64).sqrt())
}

/// Quantile of sorted values by linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Computes descriptive statistics for every column of a table.
///
/// Numeric columns get count, mean, std, min, quartiles and max; text
/// columns get count, unique, top and freq. Missing cells are skipped, and
/// statistics that need more values than a column has come out undefined.
pub struct Summarizer;

impl Summarizer {
    /// Summarize every column, in table order.
    pub fn summarize(table: &Table) -> StatisticsSummary {
        let mut summary = StatisticsSummary::new();
        for column in table.columns() {
            summary
                .columns
                .insert(column.name().to_string(), Self::describe_column(column));
        }
        summary
    }

    /// Statistics for a single column, chosen by its domain.
    pub fn describe_column(column: &Column) -> ColumnStatistics {
        match column.domain() {
            ColumnDomain::Integer | ColumnDomain::Float => Self::describe_numeric(column),
            ColumnDomain::Text => Self::describe_text(column),
        }
    }

    fn describe_numeric(column: &Column) -> ColumnStatistics {
        // Values outside the domain are reported by validation, not counted here
        let values: Vec<f64> = column.values().filter_map(parse_number).collect();
        let mean = sample_mean(&values);
        let std = mean.and_then(|m| sample_std(&values, m));

        let mut sorted = values;
        sorted.sort_by(f64::total_cmp);

        let mut stats = ColumnStatistics::new(column.domain());
        stats.push("count", StatValue::Number(sorted.len() as f64));
        stats.push("mean", mean.into());
        stats.push("std", std.into());
        stats.push("min", sorted.first().copied().into());
        stats.push("25%", quantile(&sorted, 0.25).into());
        stats.push("50%", quantile(&sorted, 0.50).into());
        stats.push("75%", quantile(&sorted, 0.75).into());
        stats.push("max", sorted.last().copied().into());
        stats
    }

    fn describe_text(column: &Column) -> ColumnStatistics {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in column.values() {
            *counts.entry(value).or_insert(0) += 1;
        }

        let total: usize = counts.values().sum();

        // Ties go to the value seen first
        let top = counts.iter().fold(None, |best: Option<(&str, usize)>, (&value, &n)| {
            match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((value, n)),
            }
        });

        let mut stats = ColumnStatistics::new(column.domain());
        stats.push("count", StatValue::Count(total));
        stats.push("unique", StatValue::Count(counts.len()));
        match top {
            Some((value, n)) => {
                stats.push("top", StatValue::Text(value.to_string()));
                stats.push("freq", StatValue::Count(n));
            }
            None => {
                stats.push("top", StatValue::Undefined);
                stats.push("freq", StatValue::Undefined);
            }
        }
        stats
    }
}
