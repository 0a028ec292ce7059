//! CLI command implementations.

pub mod filter;
pub mod list;
pub mod maintenance;
mod output;
pub mod scan;

use crate::models::config::Config;
use std::path::{Path, PathBuf};

/// Catalog root from the command line, else from the config.
pub fn resolve_root(root: Option<&Path>, config: &Config) -> crate::Result<PathBuf> {
    root.map(Path::to_path_buf)
        .or_else(|| config.catalog.root.clone())
        .ok_or(crate::Error::CatalogRootMissing)
}
