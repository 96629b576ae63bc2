//! Report command - validate a data file and write the PDF report.

use colored::Colorize;
use tracing::Level;

use assay::logging::{self, LogConfig};
use assay::report::ReportConfig;
use assay::{Assay, AssayConfig, LoaderConfig, RunOutcome};

use crate::cli::Cli;

/// Run the pipeline. Returns whether a report was produced.
pub fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _log = logging::init(LogConfig::new(&cli.log_file).with_level(level))?;

    let mut loader = LoaderConfig {
        delimiter: cli.delimiter.map(|d| d.0),
        ..LoaderConfig::default()
    };
    for arg in cli.column_types {
        loader.domain_overrides.insert(arg.name, arg.domain);
    }

    let config = AssayConfig {
        loader,
        report: ReportConfig {
            title: cli.title,
            ..ReportConfig::default()
        },
    };

    if cli.verbose {
        println!(
            "{} {}",
            "Validating".cyan().bold(),
            cli.file.display().to_string().white()
        );
    }

    let outcome = Assay::with_config(config).run(&cli.file, &cli.output)?;

    match &outcome {
        RunOutcome::Completed {
            source,
            report_path,
            pages,
        } => {
            if cli.verbose {
                println!(
                    "  {} rows, {} columns ({}, {})",
                    source.row_count, source.column_count, source.format, source.hash
                );
                println!(
                    "  {} {} ({} pages)",
                    "Saved to".green().bold(),
                    report_path.display(),
                    pages
                );
            }
            println!("{}", outcome.message().green());
        }
        RunOutcome::LoadFailed(e) => {
            if cli.verbose {
                eprintln!("  {}", e.to_string().red());
            }
            println!("{}", outcome.message().red());
        }
    }

    Ok(outcome.is_success())
}
