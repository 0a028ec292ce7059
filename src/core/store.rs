//! Record store.
//!
//! One `tags.json` per movie folder, plus an optional catalog index in the
//! root. Saves always write the full record; merging happens in memory
//! before `save_record` is called.

use crate::models::index::CatalogIndex;
use crate::models::record::MovieRecord;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-folder record file name.
pub const RECORD_FILE: &str = "tags.json";

/// Catalog index file name, kept in the catalog root.
pub const INDEX_FILE: &str = ".catalog_index.json";

/// Path of the record file for a folder.
pub fn record_path(folder: &Path) -> PathBuf {
    folder.join(RECORD_FILE)
}

/// Path of the index file for a catalog root.
pub fn index_path(root: &Path) -> PathBuf {
    root.join(INDEX_FILE)
}

/// Load the record stored in `folder`.
///
/// Returns `RecordNotFound` when there is no file and `RecordCorrupt` for
/// anything unreadable or invalid. No other error escapes.
pub fn load_record(folder: &Path) -> Result<MovieRecord> {
    let path = record_path(folder);
    if !path.is_file() {
        return Err(Error::RecordNotFound(folder.display().to_string()));
    }

    let corrupt = |reason: String| Error::RecordCorrupt {
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(&path).map_err(|e| corrupt(e.to_string()))?;
    let record: MovieRecord =
        serde_json::from_str(&content).map_err(|e| corrupt(e.to_string()))?;

    if record.title.is_empty() {
        return Err(corrupt("empty title".to_string()));
    }

    Ok(record)
}

/// Write the full record to its folder, replacing any previous file.
pub fn save_record(record: &MovieRecord) -> Result<()> {
    let path = record_path(&record.path);
    let content = serde_json::to_string_pretty(record)?;
    fs::write(&path, content)?;
    tracing::debug!("Saved record: {}", path.display());
    Ok(())
}

/// Load the catalog index, if one exists and parses.
pub fn load_catalog_index(root: &Path) -> Option<CatalogIndex> {
    let path = index_path(root);
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read catalog index {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(index) => Some(index),
        Err(e) => {
            tracing::warn!("Ignoring invalid catalog index {}: {}", path.display(), e);
            None
        }
    }
}

/// Write the catalog index.
pub fn save_catalog_index(root: &Path, records: &[MovieRecord]) -> Result<()> {
    let path = index_path(root);
    let index = CatalogIndex::new(root.to_path_buf(), records.to_vec());
    let content = serde_json::to_string_pretty(&index)?;
    fs::write(&path, content)?;
    tracing::info!("Catalog index saved to: {}", path.display());
    Ok(())
}

/// Write poster bytes to the record's fixed poster location.
pub fn save_poster(record: &MovieRecord, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(record.images_dir())?;
    let path = record.poster_path();
    fs::write(&path, bytes)?;
    tracing::debug!("Saved poster: {}", path.display());
    Ok(path)
}

/// Delete every file in a folder's image directory. Returns how many were removed.
pub fn remove_images(folder: &Path) -> Result<usize> {
    let images_dir = folder.join(crate::models::record::IMAGES_DIR);
    if !images_dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(&images_dir)? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
