//! List command implementation.

use super::output;
use crate::core::catalog::{Catalog, SyncOptions};
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Print the catalog from its saved index.
pub async fn list(config: &Config, root: Option<&Path>, format: &str) -> Result<()> {
    let root = super::resolve_root(root, config)?;

    let Some(catalog) = Catalog::load_cached(&root, SyncOptions::from(&config.catalog))? else {
        println!(
            "{}",
            format!("[WARN] No catalog index in {}. Run `scan` first.", root.display()).yellow()
        );
        return Ok(());
    };

    let records: Vec<_> = catalog.records().iter().collect();
    output::print_records(&records, format)?;
    Ok(())
}
