//! Movie Catalog CLI
//!
//! A command-line tool for cataloging movie folders, enriching them from TMDB
//! and filtering them by attribute.

use clap::Parser;
use movie_catalog::cli::{
    args::{Cli, Commands},
    commands::{filter, list, maintenance, scan},
};
use movie_catalog::models::config::{load_config, load_config_from};
use movie_catalog::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    // Run the appropriate command
    match cli.command {
        Commands::Scan {
            root,
            rename,
            no_enrich,
            force,
            concurrency,
        } => {
            // Only enrichment talks to TMDB; a failed check still syncs.
            let enrich = !no_enrich
                && (cli.skip_preflight || preflight::ready_for_enrichment(&config).await);

            let args = scan::ScanArgs {
                rename,
                no_enrich: !enrich,
                force,
                concurrency,
            };
            scan::scan(&config, root.as_deref(), args).await?;
        }

        Commands::Filter {
            root,
            field,
            op,
            value,
            cached,
            format,
        } => {
            let args = filter::FilterArgs {
                field,
                op,
                value,
                cached,
                format,
            };
            filter::execute_filter(&config, root.as_deref(), args).await?;
        }

        Commands::List { root, format } => {
            list::list(&config, root.as_deref(), &format).await?;
        }

        Commands::Reset { root, confirm } => {
            maintenance::reset(&config, root.as_deref(), confirm).await?;
        }

        Commands::CleanImages { root, confirm } => {
            maintenance::clean_images(&config, root.as_deref(), confirm).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_catalog=debug")
    } else {
        EnvFilter::new("movie_catalog=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
