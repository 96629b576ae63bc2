//! Main Assay struct and public API.

use std::path::{Path, PathBuf};

use crate::error::{LoadError, Result};
use crate::input::{Loader, LoaderConfig, SourceMetadata};
use crate::report::{ReportConfig, ReportRenderer};
use crate::statistics::{StatisticsSummary, Summarizer};
use crate::validation::{ValidationEngine, ValidationReport};

/// Default report file name.
pub const DEFAULT_REPORT_FILE: &str = "Data_Validation_Report.pdf";

/// Printed when a run finishes.
pub const COMPLETED_MESSAGE: &str = "Data validation completed. Check the PDF report and log file.";

/// Printed when the input cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";

/// Configuration for an assay run.
#[derive(Debug, Clone, Default)]
pub struct AssayConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// Report configuration.
    pub report: ReportConfig,
}

/// Findings and statistics for one table.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Validation findings.
    pub issues: ValidationReport,
    /// Per-column statistics.
    pub statistics: StatisticsSummary,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The report was written.
    Completed {
        source: SourceMetadata,
        report_path: PathBuf,
        pages: usize,
    },
    /// The input could not be loaded; no report was written.
    LoadFailed(LoadError),
}

impl RunOutcome {
    /// One-line message for the user.
    pub fn message(&self) -> &'static str {
        match self {
            RunOutcome::Completed { .. } => COMPLETED_MESSAGE,
            RunOutcome::LoadFailed(_) => LOAD_FAILED_MESSAGE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

/// Loads a table, checks it, summarizes it and renders the report.
pub struct Assay {
    loader: Loader,
    validation: ValidationEngine,
    renderer: ReportRenderer,
}

impl Assay {
    /// Create an Assay instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an Assay instance with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        Self {
            loader: Loader::with_config(config.loader),
            validation: ValidationEngine::new(),
            renderer: ReportRenderer::with_config(config.report),
        }
    }

    /// Load a file and derive its findings and statistics.
    pub fn analyze(&self, path: impl AsRef<Path>) -> std::result::Result<Analysis, LoadError> {
        let (table, source) = self.loader.load(path)?;

        let issues = self.validation.validate(&table);
        let statistics = Summarizer::summarize(&table);

        Ok(Analysis {
            source,
            issues,
            statistics,
        })
    }

    /// Run the whole pipeline.
    ///
    /// A load failure ends the run without a report and is returned as
    /// [`RunOutcome::LoadFailed`]; anything failing after that is an error.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunOutcome> {
        let analysis = match self.analyze(input) {
            Ok(analysis) => analysis,
            Err(e) => return Ok(RunOutcome::LoadFailed(e)),
        };

        let rendered = self
            .renderer
            .render(&analysis.issues, &analysis.statistics, output)?;

        Ok(RunOutcome::Completed {
            source: analysis.source,
            report_path: rendered.path,
            pages: rendered.pages,
        })
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analyze_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,,LA\nAlice,30,NYC\n";
        let file = create_test_file(content);

        let analysis = Assay::new().analyze(file.path()).unwrap();

        assert_eq!(analysis.source.row_count, 3);
        assert_eq!(analysis.source.column_count, 3);
        assert_eq!(analysis.issues.missing_values.get("age"), Some(&1));
        assert_eq!(analysis.issues.duplicate_rows, 1);
        assert_eq!(analysis.statistics.len(), 3);
    }

    #[test]
    fn test_run_missing_input_skips_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.pdf");

        let outcome = Assay::new()
            .run(dir.path().join("missing.csv"), &output)
            .unwrap();

        assert!(matches!(outcome, RunOutcome::LoadFailed(LoadError::Io { .. })));
        assert_eq!(outcome.message(), LOAD_FAILED_MESSAGE);
        assert!(!output.exists());
    }

    #[test]
    fn test_run_writes_report() {
        let file = create_test_file("a,b\n1,x\n2,y\n");
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.pdf");

        let outcome = Assay::new().run(file.path(), &output).unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.message(), COMPLETED_MESSAGE);
        assert!(output.exists());
    }
}
