//! Batch processing command for a directory of invoices.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use facturas_core::pipeline::{process_document, DocumentRef, FileTextProvider, TextProvider};
use facturas_core::{DocumentSource, InvoiceParser, InvoiceRecord, LocalDirectory, RuleInvoiceParser, Status};

use super::load_config;
use super::report::{write_report, ReportFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory (default: batch.input_dir from config)
    input: Option<PathBuf>,

    /// Report file (default: batch.output from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format (default: from the report file extension)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let input_dir = args.input.unwrap_or(config.batch.input_dir.clone());
    let output = args.output.unwrap_or(config.batch.output.clone());
    let format = args.format.unwrap_or_else(|| ReportFormat::from_path(&output));
    let jobs = args.jobs.unwrap_or(config.batch.jobs);
    if jobs == 0 {
        anyhow::bail!("--jobs must be at least 1");
    }

    if !input_dir.exists() {
        fs::create_dir_all(&input_dir)?;
        println!(
            "{} Created input directory {}",
            style("ℹ").blue(),
            input_dir.display()
        );
        println!("   Add invoice PDFs there and run again.");
        return Ok(());
    }

    let source = LocalDirectory::new(&input_dir, &config.batch.extensions);
    let docs = source.list()?;

    if docs.is_empty() {
        println!(
            "{} No invoices found in {}",
            style("⚠").yellow(),
            input_dir.display()
        );
        println!("   Add at least one invoice PDF and run again.");
        return Ok(());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        docs.len()
    );

    let parser: Arc<dyn InvoiceParser> = Arc::new(RuleInvoiceParser::from_config(&config.extraction));
    let records = process_parallel(docs, parser, jobs).await;

    write_report(&output, format, &records)?;
    debug!("Wrote {} rows to {}", records.len(), output.display());

    print_summary(&records, start);
    println!(
        "{} Report written to {}",
        style("✓").green(),
        output.display()
    );

    Ok(())
}

/// Process documents on blocking worker threads, at most `jobs` at a time.
///
/// Records come back in input order. A worker that dies yields an `ERROR`
/// record for its document.
pub async fn process_parallel(
    docs: Vec<DocumentRef>,
    parser: Arc<dyn InvoiceParser>,
    jobs: usize,
) -> Vec<InvoiceRecord> {
    let provider: Arc<dyn TextProvider> = Arc::new(FileTextProvider::new());

    let pb = ProgressBar::new(docs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let records: Vec<InvoiceRecord> = stream::iter(docs.into_iter().map(|doc| {
        let parser = Arc::clone(&parser);
        let provider = Arc::clone(&provider);
        async move {
            let name = doc.name.clone();
            tokio::task::spawn_blocking(move || {
                process_document(provider.as_ref(), parser.as_ref(), &doc)
            })
            .await
            .unwrap_or_else(|e| {
                warn!("Worker for {} failed: {}", name, e);
                InvoiceRecord::failed(name, format!("Worker failed: {e}"))
            })
        }
    }))
    .buffered(jobs.max(1))
    .inspect(|_| pb.inc(1))
    .collect()
    .await;

    pb.finish_with_message("Complete");
    records
}

/// Print per-status counts and the documents needing attention.
pub fn print_summary(records: &[InvoiceRecord], start: Instant) {
    let count = |status: Status| records.iter().filter(|r| r.status() == status).count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} ok, {} need review, {} failed",
        style(count(Status::Ok)).green(),
        style(count(Status::NeedsReview)).yellow(),
        style(count(Status::Error)).red()
    );

    let failed: Vec<&InvoiceRecord> = records.iter().filter(|r| r.status() == Status::Error).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for record in failed {
            println!("  - {}: {}", record.file_name, record.issues().join(" | "));
        }
    }
}
