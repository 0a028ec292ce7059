//! Filter command implementation.

use super::output;
use crate::core::catalog::{Catalog, SyncOptions};
use crate::core::filter::Filter;
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Filter request from the command line.
#[derive(Debug, Clone)]
pub struct FilterArgs {
    pub field: String,
    pub op: String,
    pub value: String,
    pub cached: bool,
    pub format: String,
}

/// Execute filter command.
pub async fn execute_filter(config: &Config, root: Option<&Path>, args: FilterArgs) -> Result<()> {
    let filter = Filter::new(&args.field, &args.op, &args.value)?;
    let root = super::resolve_root(root, config)?;
    let options = SyncOptions::from(&config.catalog);

    let cached = if args.cached {
        let cached = Catalog::load_cached(&root, options.clone())?;
        if cached.is_none() {
            println!(
                "{}",
                "[WARN] No catalog index found, scanning instead".yellow()
            );
        }
        cached
    } else {
        None
    };
    let catalog = match cached {
        Some(catalog) => catalog,
        None => Catalog::scan(&root, options)?.0,
    };

    let matches = filter.apply(catalog.records());
    output::print_records(&matches, &args.format)?;

    if args.format != "json" {
        println!();
        println!(
            "Filtered: {} of {} records ({} {} '{}')",
            matches.len(),
            catalog.len(),
            filter.field,
            filter.op,
            filter.value
        );
    }
    Ok(())
}
