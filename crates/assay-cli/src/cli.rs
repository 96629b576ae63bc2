//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use assay::ColumnDomain;
use assay::logging::DEFAULT_LOG_FILE;

/// Assay: validate a delimited data file and write a PDF report
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE", default_value = "data.csv")]
    pub file: PathBuf,

    /// Output path for the PDF report
    #[arg(short, long, default_value = assay::DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Log file to append to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Field delimiter (default: auto-detect). Accepts a single character or "tab"
    #[arg(short, long)]
    pub delimiter: Option<Delimiter>,

    /// Force a column's type instead of inferring it, as NAME=TYPE
    /// (TYPE is text, integer or float). Repeatable
    #[arg(long = "column-type", value_name = "NAME=TYPE")]
    pub column_types: Vec<ColumnTypeArg>,

    /// Report title
    #[arg(long, default_value = assay::report::DEFAULT_TITLE)]
    pub title: String,

    /// Enable verbose output and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// A single-byte field delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiter(pub u8);

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" | "\\t" | "\t" => Ok(Delimiter(b'\t')),
            _ if s.len() == 1 && s.is_ascii() => Ok(Delimiter(s.as_bytes()[0])),
            _ => Err(format!("Invalid delimiter: {}. Use a single ASCII character or 'tab'.", s)),
        }
    }
}

/// A `NAME=TYPE` column type override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnTypeArg {
    pub name: String,
    pub domain: ColumnDomain,
}

impl std::str::FromStr for ColumnTypeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, domain) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Expected NAME=TYPE, got: {}", s))?;
        if name.is_empty() {
            return Err(format!("Missing column name in: {}", s));
        }

        Ok(ColumnTypeArg {
            name: name.to_string(),
            domain: domain.parse::<ColumnDomain>().map_err(|e| e.to_string())?,
        })
    }
}
