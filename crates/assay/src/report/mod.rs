//! Report rendering: text layout, then PDF output.

mod layout;
mod pdf;

use std::path::{Path, PathBuf};

use tracing::info;

pub use layout::{Align, Block, ReportLayout};
pub use pdf::{PageGeometry, PdfWriter};

use crate::error::Result;
use crate::statistics::StatisticsSummary;
use crate::validation::ValidationReport;

/// Default report title.
pub const DEFAULT_TITLE: &str = "Data Validation Report";

/// Report configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Title printed centered at the top of the first page.
    pub title: String,
    /// Page size and type metrics.
    pub geometry: PageGeometry,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            geometry: PageGeometry::a4(),
        }
    }
}

/// A report written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub path: PathBuf,
    pub pages: usize,
}

/// Renders validation findings and statistics into a PDF.
pub struct ReportRenderer {
    config: ReportConfig,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Lay out the report without writing anything.
    pub fn layout(&self, report: &ValidationReport, summary: &StatisticsSummary) -> ReportLayout {
        ReportLayout::build(&self.config.title, report, summary)
    }

    /// Write the report to `path`.
    pub fn render(
        &self,
        report: &ValidationReport,
        summary: &StatisticsSummary,
        path: impl AsRef<Path>,
    ) -> Result<RenderedReport> {
        let path = path.as_ref();
        let layout = self.layout(report, summary);

        let writer = PdfWriter::with_geometry(&self.config.title, self.config.geometry);
        let pages = writer.write(&layout, path)?;

        info!(pages, "Report generated as {}", path.display());

        Ok(RenderedReport {
            path: path.to_path_buf(),
            pages,
        })
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}
