//! Input loading and the in-memory table.

mod parser;
mod source;

pub use parser::{DEFAULT_NULL_TOKENS, Loader, LoaderConfig};
pub use source::{Column, SourceMetadata, Table};
