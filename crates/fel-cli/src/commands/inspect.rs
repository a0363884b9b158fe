//! Inspect command - extract a single invoice and show its record.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use fel_core::{FelInvoiceParser, InvoiceParser, InvoiceRecord, ItemPolicy};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Invoice XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Drop items with missing fields instead of failing
    #[arg(long)]
    skip_bad_items: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = super::config::load(config_path)?;

    if args.skip_bad_items {
        config.extraction.item_policy = ItemPolicy::SkipItem;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let parser = FelInvoiceParser::from_config(&config.extraction);
    let result = parser.parse(&data)?;

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result.record)?,
        OutputFormat::Text => format_text(&result.record),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!(
        "Extraction took {}ms, total {:?}",
        result.processing_time_ms,
        start.elapsed()
    );

    Ok(())
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Invoice: {} ({})\n",
        record.invoice_number, record.document_type
    ));
    output.push_str(&format!("Date: {}\n", record.issue_date));
    output.push_str(&format!(
        "Authorization: {} / {}\n",
        record.certification_series, record.certification_number
    ));
    output.push('\n');

    output.push_str("Issuer:\n");
    output.push_str(&format!("  {}\n", record.issuer_name));
    output.push_str(&format!("  NIT: {}\n", record.issuer_tax_id));
    output.push_str(&format!("  Establishment: {}\n", record.establishment_code));
    output.push('\n');

    output.push_str("Receiver:\n");
    output.push_str(&format!("  {}\n", record.receiver_name));
    output.push('\n');

    output.push_str("Items:\n");
    if record.line_items.is_empty() {
        output.push_str("  (none)\n");
    }
    for (i, item) in record.line_items.iter().enumerate() {
        output.push_str(&format!(
            "  {}. [{}] {} x {} @ {} = {}\n",
            i + 1,
            item.kind.label(),
            item.quantity,
            item.description,
            item.unit_price,
            item.line_total
        ));
    }
    output.push('\n');

    output.push_str("Taxes:\n");
    for (category, amount) in record.tax_amounts.iter() {
        output.push_str(&format!("  {}: {}\n", category.short_name(), amount));
    }
    output.push_str(&format!("\nTotal: {}\n", record.grand_total));

    output
}
