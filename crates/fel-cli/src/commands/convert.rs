//! Convert command - aggregate many invoice files into one report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use fel_core::batch::extract_batch_with_progress;
use fel_core::models::config::ReportFormat;
use fel_core::report::{save_report, writer_for};
use fel_core::{build_rows, FelInvoiceParser, ItemPolicy, SourceDocument};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: facturas.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<ReportFormatArg>,

    /// Continue on error instead of discarding the whole batch
    #[arg(long)]
    continue_on_error: bool,

    /// Drop items with missing fields instead of failing their invoice
    #[arg(long)]
    skip_bad_items: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormatArg {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Xlsx => ReportFormat::Xlsx,
            ReportFormatArg::Csv => ReportFormat::Csv,
        }
    }
}

pub fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = super::config::load(config_path)?;

    // Command-line flags take precedence over the file
    if args.skip_bad_items {
        config.extraction.item_policy = ItemPolicy::SkipItem;
    }
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;

    config.report.format = match (args.format, &args.output) {
        (Some(format), _) => format.into(),
        (None, Some(output)) if has_extension(output, "csv") => ReportFormat::Csv,
        (None, Some(output)) if has_extension(output, "xlsx") => ReportFormat::Xlsx,
        (None, _) => config.report.format,
    };

    let output = args.output.clone().unwrap_or_else(|| {
        config
            .report
            .output
            .with_extension(config.report.format.extension())
    });

    let files = resolve_inputs(&args.inputs)?;
    let documents = files
        .iter()
        .map(|path| SourceDocument::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        documents.len()
    );

    let pb = ProgressBar::new(documents.iter().filter(|d| d.is_xml()).count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = FelInvoiceParser::from_config(&config.extraction);
    let outcome = extract_batch_with_progress(&parser, &documents, continue_on_error, |document| {
        debug!("Extracted {}", document.name);
        pb.inc(1);
    });
    pb.finish_and_clear();
    let outcome = outcome?;

    let rows = build_rows(&outcome.records);
    let writer = writer_for(&config.report);
    save_report(writer.as_ref(), &rows, &output)?;

    println!(
        "{} Wrote {} rows from {} invoices to {}",
        style("✓").green(),
        rows.len(),
        outcome.records.len(),
        output.display()
    );
    println!(
        "   {} skipped, {} failed, done in {:?}",
        style(outcome.skipped.len()).yellow(),
        style(outcome.failures.len()).red(),
        start.elapsed()
    );

    if !outcome.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &outcome.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if !outcome.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &outcome.failures {
            println!("  - {}: {}", failure.name, failure.error);
        }
    }

    Ok(())
}

/// Expand each argument: existing files are taken as-is, anything else is
/// treated as a glob pattern.
fn resolve_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let before = files.len();
        for entry in glob(input)? {
            let entry = entry?;
            if entry.is_file() {
                files.push(entry);
            }
        }

        if files.len() == before {
            warn!("No files match {}", input);
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
