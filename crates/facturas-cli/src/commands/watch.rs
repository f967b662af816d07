//! Watch command - periodic processing of new invoices.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Args;
use console::style;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use facturas_core::pipeline::pending;
use facturas_core::{
    DocumentSource, FacturasConfig, InvoiceParser, JsonTrackingStore, LocalDirectory,
    RuleInvoiceParser, TrackingStore,
};

use super::batch::{print_summary, process_parallel};
use super::load_config;
use super::report::{write_report, ReportFormat};

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Hours between cycles (default: batch.interval_hours from config)
    #[arg(long)]
    interval_hours: Option<u64>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

pub async fn run(args: WatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(jobs) = args.jobs {
        config.batch.jobs = jobs;
    }
    if let Some(hours) = args.interval_hours {
        config.batch.interval_hours = hours;
    }
    config.validate()?;

    let store = JsonTrackingStore::new(&config.batch.tracking_file);

    if args.once {
        return run_cycle(&config, &store).await;
    }

    println!(
        "{} Watching {} every {} hours",
        style("ℹ").blue(),
        config.batch.input_dir.display(),
        config.batch.interval_hours
    );

    // The first tick completes immediately; a cycle that overruns the period
    // delays the next one instead of triggering a burst
    let mut interval = tokio::time::interval(cycle_period(config.batch.interval_hours)?);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if let Err(e) = run_cycle(&config, &store).await {
            error!("Cycle failed: {:#}", e);
            eprintln!("{} Cycle failed: {:#}", style("✗").red(), e);
        }
    }
}

fn cycle_period(hours: u64) -> anyhow::Result<Duration> {
    hours
        .checked_mul(60 * 60)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| anyhow::anyhow!("Invalid watch interval: {} hours", hours))
}

/// One pass: process documents not yet tracked, write the report, then
/// record every attempted id.
async fn run_cycle(config: &FacturasConfig, store: &JsonTrackingStore) -> anyhow::Result<()> {
    let start = Instant::now();
    println!(
        "\n{} [{}] Starting cycle",
        style("⏰").cyan(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let input_dir = &config.batch.input_dir;
    if !input_dir.exists() {
        fs::create_dir_all(input_dir)?;
        info!("Created input directory {}", input_dir.display());
    }

    let mut processed = store.load();
    println!("   {} documents already processed", processed.len());

    let source = LocalDirectory::new(input_dir, &config.batch.extensions);
    let docs = pending(source.list()?, &processed);

    if docs.is_empty() {
        println!("{} No new invoices to process.", style("✓").green());
        return Ok(());
    }

    println!("{} {} new invoices found", style("ℹ").blue(), docs.len());

    // Failed documents are tracked too so they are not retried forever
    let ids: Vec<String> = docs.iter().map(|d| d.id.clone()).collect();

    let parser: Arc<dyn InvoiceParser> = Arc::new(RuleInvoiceParser::from_config(&config.extraction));
    let records = process_parallel(docs, parser, config.batch.jobs).await;

    let output = &config.batch.output;
    write_report(output, ReportFormat::from_path(output), &records)?;

    processed.extend(ids);
    store.save(&processed)?;

    print_summary(&records, start);
    println!(
        "{} Report written to {}",
        style("✓").green(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cycle_period() {
        assert_eq!(cycle_period(6).unwrap(), Duration::from_secs(6 * 3600));
        assert!(cycle_period(0).is_err());
        assert!(cycle_period(u64::MAX).is_err());
    }
}
