//! Assay: data-quality checks and summary statistics for tabular datasets.
//!
//! A delimited text file is loaded into a column-major [`Table`], checked
//! for missing values, out-of-domain values and duplicate rows, summarized
//! column by column, and written out as a paginated PDF report.
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let outcome = Assay::new()
//!     .run("data.csv", "Data_Validation_Report.pdf")
//!     .unwrap();
//!
//! println!("{}", outcome.message());
//! ```

pub mod error;
pub mod input;
pub mod logging;
pub mod report;
pub mod schema;
pub mod statistics;
pub mod validation;

mod assay;

pub use crate::assay::{
    Analysis, Assay, AssayConfig, COMPLETED_MESSAGE, DEFAULT_REPORT_FILE, LOAD_FAILED_MESSAGE,
    RunOutcome,
};
pub use error::{AssayError, LoadError, Result};
pub use input::{Column, Loader, LoaderConfig, SourceMetadata, Table};
pub use report::{ReportConfig, ReportRenderer};
pub use schema::ColumnDomain;
pub use statistics::{StatValue, StatisticsSummary, Summarizer};
pub use validation::{IssueCategory, ValidationEngine, ValidationReport};
