//! Scan command implementation.
//!
//! Synchronizes the catalog with disk, enriches every record from TMDB and
//! writes the catalog index.

use super::output;
use crate::core::catalog::{Catalog, SyncOptions};
use crate::core::enrich::{EnrichReport, Enricher};
use crate::models::config::Config;
use crate::services::tmdb::TmdbClient;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Scan options from the command line.
#[derive(Debug, Clone, Default)]
pub struct ScanArgs {
    pub rename: bool,
    pub no_enrich: bool,
    pub force: bool,
    pub concurrency: Option<usize>,
}

/// Execute scan command.
pub async fn scan(config: &Config, root: Option<&Path>, args: ScanArgs) -> Result<()> {
    let root = super::resolve_root(root, config)?;

    println!("{}", "[SCAN] Synchronizing catalog...".bold().cyan());
    println!("  Root: {}", root.display());
    println!();

    let mut options = SyncOptions::from(&config.catalog);
    options.rename_folders |= args.rename;

    let (mut catalog, report) = Catalog::scan(&root, options)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    output::print_sync_report(&report);
    println!();

    if args.no_enrich {
        println!("{}", "[WARN] Enrichment skipped".yellow());
    } else if !catalog.is_empty() {
        let concurrency = args.concurrency.unwrap_or(config.catalog.concurrency).max(1);
        match TmdbClient::new(config.tmdb.clone()) {
            Ok(client) => {
                let reports =
                    enrich(&mut catalog, Enricher::new(client), args.force, concurrency).await;
                print_enrich_summary(&reports);
            }
            Err(e) => {
                tracing::warn!("Skipping enrichment: {}", e);
                println!("{} Enrichment skipped: {}", "[WARN]".yellow(), e);
            }
        }
    }

    if let Err(e) = catalog.save_index() {
        tracing::warn!("Failed to save catalog index: {}", e);
    }

    Ok(())
}

async fn enrich(
    catalog: &mut Catalog,
    enricher: Enricher<TmdbClient>,
    force: bool,
    concurrency: usize,
) -> Vec<EnrichReport> {
    let pb = ProgressBar::new(catalog.len() as u64);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("█▓░")),
        Err(e) => tracing::debug!("Default progress style: {}", e),
    }

    let reports = enricher
        .enrich_all_with(catalog.records_mut(), force, concurrency, |report| {
            pb.set_message(report.title.clone());
            pb.inc(1);
        })
        .await;

    pb.finish_with_message("Done!");
    println!();
    reports
}

fn print_enrich_summary(reports: &[EnrichReport]) {
    let changed = reports.iter().filter(|r| r.changed()).count();
    let incomplete: Vec<_> = reports.iter().filter(|r| !r.misses().is_empty()).collect();

    println!("{}", "Enrichment Summary".bold().green());
    println!("  {} {}", "Updated:".bold(), changed);
    println!("  {} {}", "Unchanged:".bold(), reports.len() - changed);
    println!("  {} {}", "Incomplete:".bold(), incomplete.len());

    if !incomplete.is_empty() {
        println!();
        println!("{}", "Missing fields:".bold().yellow());
        for report in incomplete {
            for (step, reason) in report.misses() {
                println!("  {} - {}: {}", report.title, step, reason);
            }
        }
    }
}
