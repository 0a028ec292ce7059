//! Catalog index: an aggregate of every record, written after a scan.
//!
//! The index only speeds up startup. Per-folder `tags.json` files always win
//! over what the index says.

use super::record::MovieRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current index schema version.
pub const INDEX_VERSION: &str = "1.0";

/// Aggregate view of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogIndex {
    /// Schema version
    pub version: String,
    /// Last update timestamp
    pub updated_at: String,
    /// Catalog root when written
    pub root: PathBuf,
    /// All records, in catalog order
    pub records: Vec<MovieRecord>,
}

impl CatalogIndex {
    pub fn new(root: PathBuf, records: Vec<MovieRecord>) -> Self {
        Self {
            version: INDEX_VERSION.to_string(),
            updated_at: chrono::Utc::now().to_rfc3339(),
            root,
            records,
        }
    }
}
