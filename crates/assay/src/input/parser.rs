//! Delimited-text loader with delimiter detection.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use super::source::{Column, SourceMetadata, Table};
use crate::error::LoadError;
use crate::schema::ColumnDomain;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell contents read as missing by default.
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Exact cell contents treated as null.
    pub null_tokens: Vec<String>,
    /// Domains forced on named columns instead of inferring them.
    pub domain_overrides: IndexMap<String, ColumnDomain>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect(),
            domain_overrides: IndexMap::new(),
        }
    }
}

impl LoaderConfig {
    /// Check if a raw cell represents a missing value.
    pub fn is_null(&self, value: &str) -> bool {
        self.null_tokens.iter().any(|t| t == value)
    }
}

/// Reads delimited text files into a [`Table`].
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file, recording the outcome in the process log.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata), LoadError> {
        let path = path.as_ref();

        match self.read_file(path) {
            Ok((table, source)) => {
                info!(
                    file = %source.path.display(),
                    rows = source.row_count,
                    columns = source.column_count,
                    format = %source.format,
                    hash = %source.hash,
                    "Data loaded successfully."
                );
                Ok((table, source))
            }
            Err(e) => {
                error!("Failed to load data: {}", e);
                Err(e)
            }
        }
    }

    fn read_file(&self, path: &Path) -> Result<(Table, SourceMetadata), LoadError> {
        let io_err = |source: std::io::Error| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse bytes directly.
    pub(crate) fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let raw_headers = reader.headers()?;
        if raw_headers.is_empty() || (raw_headers.len() == 1 && raw_headers[0].is_empty()) {
            return Err(LoadError::EmptyData("No columns to parse from file".to_string()));
        }
        let headers = unique_headers(raw_headers.iter());

        let expected = headers.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); expected];

        for result in reader.records() {
            let record = result?;

            if record.len() > expected {
                return Err(LoadError::Malformed {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected,
                    found: record.len(),
                });
            }

            // Short rows are padded with nulls
            for (idx, column) in cells.iter_mut().enumerate() {
                let cell = record
                    .get(idx)
                    .filter(|raw| !self.config.is_null(raw))
                    .map(str::to_string);
                column.push(cell);
            }
        }

        let overrides = &self.config.domain_overrides;
        for name in overrides.keys().filter(|name| !headers.contains(name)) {
            warn!(column = %name, "Type override names a column not in the file");
        }

        let columns: Vec<Column> = headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| {
                let column = Column::inferred(name, cells);
                match overrides.get(column.name()) {
                    Some(domain) => column.with_domain(*domain),
                    None => column,
                }
            })
            .collect();

        for column in &columns {
            debug!(column = column.name(), domain = %column.domain(), "Column domain decided");
        }

        Table::new(columns)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Name every column uniquely.
///
/// Blank names become `Unnamed: <index>`; a repeated name gets a `.1`,
/// `.2`, ... suffix, skipping suffixes already taken by another column.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (idx, name) in raw.enumerate() {
        let mut name = if name.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.to_string()
        };

        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(name.clone(), seen + 1);
            name = format!("{}.{}", name, seen);
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        names.push(name);
    }

    names
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8, LoadError> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoadError::EmptyData("No columns to parse from file".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // A count that holds on every line beats any inconsistent one
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
