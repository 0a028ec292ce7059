//! Destructive maintenance commands: reset and clean-images.

use super::output;
use crate::core::catalog::{Catalog, SyncOptions};
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Rebuild every record from its folder name.
pub async fn reset(config: &Config, root: Option<&Path>, confirm: bool) -> Result<()> {
    let root = super::resolve_root(root, config)?;

    if !confirm {
        println!(
            "{}",
            "[WARN] This discards every tags.json and all TMDB data in".yellow()
        );
        println!("  {}", root.display());
        println!("  Use --confirm to proceed");
        return Ok(());
    }

    let mut catalog = Catalog::new(&root, SyncOptions::from(&config.catalog));
    let report = catalog.reset()?;
    output::print_sync_report(&report);

    if let Err(e) = catalog.save_index() {
        tracing::warn!("Failed to save catalog index: {}", e);
    }
    Ok(())
}

/// Delete posters and frame samples from every folder.
pub async fn clean_images(config: &Config, root: Option<&Path>, confirm: bool) -> Result<()> {
    let root = super::resolve_root(root, config)?;

    if !confirm {
        println!(
            "{}",
            "[WARN] This deletes every file in each folder's images directory under".yellow()
        );
        println!("  {}", root.display());
        println!("  Use --confirm to proceed");
        return Ok(());
    }

    let (catalog, _) = Catalog::scan(&root, SyncOptions::from(&config.catalog))?;
    let removed = catalog.remove_images();
    println!(
        "{}",
        format!("Removed {} images from {} folders", removed, catalog.len()).green()
    );
    Ok(())
}
