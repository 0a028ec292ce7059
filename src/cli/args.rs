//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie Catalog - Catalog, enrich and filter your movie folders
#[derive(Parser, Debug)]
#[command(name = "movie-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Config file (default: <config dir>/movie_catalog/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize the catalog with disk and enrich it from TMDB
    Scan {
        /// Catalog root (default: catalog.root from config)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Rename new folders to "Title (Year)"
        #[arg(long)]
        rename: bool,

        /// Skip TMDB enrichment
        #[arg(long)]
        no_enrich: bool,

        /// Refetch fields that are already populated
        #[arg(long)]
        force: bool,

        /// Records enriched at the same time
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },

    /// Filter the catalog by attribute
    Filter {
        /// Catalog root (default: catalog.root from config)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Attribute to filter on (e.g., year, resolution, director)
        #[arg(short, long)]
        field: String,

        /// Operator: equals, greater_than, less_than, contains
        #[arg(short, long, default_value = "equals")]
        op: String,

        /// Value to compare against
        #[arg(long)]
        value: String,

        /// Use the saved catalog index instead of scanning
        #[arg(long)]
        cached: bool,

        /// Output format: table, simple, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List the catalog from its saved index
    List {
        /// Catalog root (default: catalog.root from config)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Output format: table, simple, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Rebuild every record from its folder name, dropping TMDB data
    Reset {
        /// Catalog root (default: catalog.root from config)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Confirm the reset
        #[arg(long)]
        confirm: bool,
    },

    /// Delete posters and frame samples from every folder
    CleanImages {
        /// Catalog root (default: catalog.root from config)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Confirm removal
        #[arg(long)]
        confirm: bool,
    },
}
