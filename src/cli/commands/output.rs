//! Shared console output for catalog commands.

use crate::core::catalog::SyncReport;
use crate::models::record::{MovieRecord, SENTINEL};
use anyhow::Result;
use colored::Colorize;

/// Print records in the requested format.
pub fn print_records(records: &[&MovieRecord], format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        "simple" => print_simple(records),
        _ => print_table(records),
    }
    Ok(())
}

fn print_simple(records: &[&MovieRecord]) {
    if records.is_empty() {
        println!("No results found.");
        return;
    }

    for record in records {
        println!(
            "{} ({}) [{}] - {}",
            record.title,
            record.year,
            record.resolution,
            record.director.as_deref().unwrap_or(SENTINEL)
        );
    }
}

fn print_table(records: &[&MovieRecord]) {
    if records.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    println!(
        " {:>4} | {:<7} | {:<40} | {:<10} | {:<24} | {}",
        "#", "Year", "Title", "Resolution", "Director", "Image"
    );
    println!("{}", "-".repeat(100));

    for (i, record) in records.iter().enumerate() {
        let title = truncate(&record.title, 40);
        let director = truncate(record.director.as_deref().unwrap_or(SENTINEL), 24);
        let image = match record.image_path() {
            Some(_) if record.has_poster() => "poster".green().to_string(),
            Some(_) => "frame".to_string(),
            None => "none".red().to_string(),
        };

        println!(
            " {:>4} | {:<7} | {:<40} | {:<10} | {:<24} | {}",
            i + 1,
            record.year.to_string(),
            title,
            record.resolution,
            director,
            image
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        format!("{}...", s.chars().take(width - 3).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Print what a synchronization did.
pub fn print_sync_report(report: &SyncReport) {
    println!("{}", "Catalog Summary".bold().green());
    println!("  {} {}", "Loaded:".bold(), report.loaded);
    println!("  {} {}", "Created:".bold(), report.created);
    if report.relocated > 0 {
        println!("  {} {}", "Relocated:".bold(), report.relocated);
    }
    if report.renamed > 0 {
        println!("  {} {}", "Renamed:".bold(), report.renamed);
    }
    if report.repaired > 0 {
        println!("  {} {}", "Paths repaired:".bold(), report.repaired);
    }
    if !report.removed.is_empty() {
        println!("  {} {}", "Removed:".bold(), report.removed.join(", "));
    }

    if !report.duplicates.is_empty() {
        println!(
            "{} duplicate titles replaced: {}",
            "[WARN]".yellow(),
            report.duplicates.join(", ")
        );
    }
    if !report.unsaved.is_empty() {
        println!(
            "{} records not saved: {}",
            "[WARN]".yellow(),
            report.unsaved.join(", ")
        );
    }
    if !report.conflicts.is_empty() {
        println!("{}", "Conflicts (resolve manually):".bold().red());
        for conflict in &report.conflicts {
            println!("  {}", conflict);
        }
    }
}
