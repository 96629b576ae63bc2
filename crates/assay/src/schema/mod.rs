//! Column domains decided at load time.

pub(crate) mod types;

pub use types::{ColumnDomain, ParseDomainError};
