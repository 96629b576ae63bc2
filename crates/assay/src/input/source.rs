//! In-memory table and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::LoadError;
use crate::schema::ColumnDomain;

/// Metadata about the source data file.
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A named column of optional cells with its domain tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    domain: ColumnDomain,
    cells: Vec<Option<String>>,
}

impl Column {
    /// Create a column with an explicit domain.
    pub fn new(name: impl Into<String>, domain: ColumnDomain, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            domain,
            cells,
        }
    }

    /// Create a column, inferring its domain from the non-null cells.
    pub fn inferred(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        let domain = ColumnDomain::infer(cells.iter().flatten().map(String::as_str));
        Self::new(name, domain, cells)
    }

    /// Replace the domain tag.
    pub fn with_domain(mut self, domain: ColumnDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> ColumnDomain {
        self.domain
    }

    /// Number of cells, nulls included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row order.
    pub fn cells(&self) -> impl Iterator<Item = Option<&str>> {
        self.cells.iter().map(|c| c.as_deref())
    }

    /// Non-null cells in row order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flatten().map(String::as_str)
    }

    /// Cell at a row, `None` when null or out of range.
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|c| c.as_deref())
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

/// Parsed tabular data, column-major.
///
/// Every column has the same number of cells; [`Table::new`] refuses
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Assemble a table from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self, LoadError> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(LoadError::RaggedColumns {
                column: ragged.name.clone(),
                expected: row_count,
                found: ragged.len(),
            });
        }

        Ok(Self { columns, row_count })
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.columns.get(col).and_then(|c| c.get(row))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<&str>> {
        self.columns.iter().map(move |c| c.get(row))
    }
}
