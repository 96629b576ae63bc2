//! Data-quality checks and their findings.

mod report;
mod validators;

pub use report::{IssueCategory, IssueDetail, ValidationReport};
pub use validators::{
    Check, DataTypeCheck, DuplicateRowCheck, EXPECTED_NUMBER, EXPECTED_STRING, MissingValueCheck,
    ValidationEngine,
};
