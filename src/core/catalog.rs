//! Catalog synchronizer.
//!
//! Walks the catalog root and reconciles every child folder with its
//! `tags.json`:
//! - folder with a readable record: loaded as-is
//! - loose media file: moved into a folder named after itself, then parsed
//! - folder without a usable record: parsed from its name, optionally renamed
//!   to `"{title} ({year})"`, then saved
//!
//! Folders that disappeared are simply absent from the rebuilt catalog.
//! Only a missing or unreadable root is an error; everything else is
//! recovered locally and listed in the `SyncReport`.

use crate::core::parser;
use crate::core::store;
use crate::models::config::CatalogConfig;
use crate::models::record::MovieRecord;
use crate::utils::fs as fs_utils;
use crate::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Synchronizer options.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Rename newly parsed folders to their canonical name.
    pub rename_folders: bool,
    /// Loose files with these extensions are relocated into folders.
    pub media_extensions: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for SyncOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            rename_folders: config.rename_folders,
            media_extensions: config.media_extensions.clone(),
        }
    }
}

/// What a scan did.
#[derive(Debug, Default, Clone)]
pub struct SyncReport {
    /// Records loaded from existing files.
    pub loaded: usize,
    /// Records derived from folder names.
    pub created: usize,
    /// Loose files moved into their own folder.
    pub relocated: usize,
    /// Folders renamed to their canonical name.
    pub renamed: usize,
    /// Loaded records whose stored path was re-pointed at their folder.
    pub repaired: usize,
    /// Titles dropped because their folder is gone.
    pub removed: Vec<String>,
    /// Rename or relocation conflicts left for manual resolution.
    pub conflicts: Vec<String>,
    /// Records kept in memory whose file could not be written.
    pub unsaved: Vec<String>,
    /// Titles that replaced an earlier record with the same title.
    pub duplicates: Vec<String>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.loaded + self.created
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Keep existing records.
    Incremental,
    /// Ignore existing records and re-derive everything.
    Reset,
}

/// In-memory catalog of one root directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    options: SyncOptions,
    records: Vec<MovieRecord>,
}

impl Catalog {
    /// Empty catalog for `root`; nothing is read until a scan.
    pub fn new(root: &Path, options: SyncOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
            records: Vec::new(),
        }
    }

    /// Scan `root` and build the catalog.
    pub fn scan(root: &Path, options: SyncOptions) -> Result<(Self, SyncReport)> {
        let mut catalog = Self::new(root, options);
        let report = catalog.sync(Mode::Incremental)?;
        Ok((catalog, report))
    }

    /// Rebuild from disk, reporting records whose folder disappeared.
    pub fn rescan(&mut self) -> Result<SyncReport> {
        self.sync(Mode::Incremental)
    }

    /// Discard all persisted records and rebuild every entry from its folder name.
    ///
    /// Provider-derived fields are lost. Poster files stay on disk.
    pub fn reset(&mut self) -> Result<SyncReport> {
        tracing::info!("Resetting catalog at {}", self.root.display());
        self.sync(Mode::Reset)
    }

    /// Build a catalog from the saved index without walking the root.
    ///
    /// Entries whose folder is gone are dropped, and a readable per-folder
    /// record replaces the indexed copy. Returns `None` without an index.
    pub fn load_cached(root: &Path, options: SyncOptions) -> Result<Option<Self>> {
        fs_utils::ensure_directory(root)?;
        let Some(index) = store::load_catalog_index(root) else {
            return Ok(None);
        };

        let mut catalog = Self::new(root, options);
        let mut report = SyncReport::default();

        for entry in index.records {
            if !entry.path.is_dir() {
                tracing::debug!("Dropping indexed '{}': folder is gone", entry.title);
                continue;
            }
            let record = match store::load_record(&entry.path) {
                Ok(mut record) => {
                    record.path = entry.path;
                    record
                }
                Err(_) => entry,
            };
            catalog.insert(record, &mut report);
        }

        tracing::info!(
            "Loaded {} records from catalog index of {}",
            catalog.records.len(),
            root.display()
        );
        Ok(Some(catalog))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Mutable access for enrichment.
    pub fn records_mut(&mut self) -> &mut [MovieRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with the given title.
    pub fn get(&self, title: &str) -> Option<&MovieRecord> {
        self.records.iter().find(|r| r.title == title)
    }

    /// Write the catalog index.
    pub fn save_index(&self) -> Result<()> {
        store::save_catalog_index(&self.root, &self.records)
    }

    /// Delete every image under each folder's image directory.
    pub fn remove_images(&self) -> usize {
        let mut removed = 0;
        for record in &self.records {
            match store::remove_images(&record.path) {
                Ok(n) => removed += n,
                Err(e) => tracing::warn!("Failed to remove images of {}: {}", record.title, e),
            }
        }
        tracing::info!("Removed {} images", removed);
        removed
    }

    fn sync(&mut self, mode: Mode) -> Result<SyncReport> {
        fs_utils::ensure_directory(&self.root)?;
        let children = fs_utils::list_children(&self.root)?;

        let previous = std::mem::take(&mut self.records);
        let mut report = SyncReport::default();

        for child in children {
            if child.is_dir() {
                let record = match mode {
                    Mode::Incremental => self.load_or_derive(&child, &mut report),
                    Mode::Reset => self.derive(&child, false, &mut report),
                };
                self.insert(record, &mut report);
            } else if fs_utils::has_media_extension(&child, &self.options.media_extensions) {
                if let Some(folder) = self.relocate(&child, &mut report) {
                    let record = self.derive(&folder, self.options.rename_folders, &mut report);
                    self.insert(record, &mut report);
                }
            } else {
                tracing::debug!("Ignoring non-media file: {}", child.display());
            }
        }

        let present: HashSet<&Path> = self.records.iter().map(|r| r.path.as_path()).collect();
        report.removed = previous
            .iter()
            .filter(|r| !present.contains(r.path.as_path()))
            .map(|r| r.title.clone())
            .collect();

        tracing::info!(
            "Synchronized {}: {} loaded, {} created, {} relocated, {} renamed, {} removed, {} conflicts",
            self.root.display(),
            report.loaded,
            report.created,
            report.relocated,
            report.renamed,
            report.removed.len(),
            report.conflicts.len()
        );
        Ok(report)
    }

    /// Use the folder's record if it loads, else derive one from the name.
    fn load_or_derive(&self, folder: &Path, report: &mut SyncReport) -> MovieRecord {
        match store::load_record(folder) {
            Ok(mut record) => {
                report.loaded += 1;
                if record.path != folder {
                    tracing::debug!(
                        "Re-pointing '{}' from {} to {}",
                        record.title,
                        record.path.display(),
                        folder.display()
                    );
                    record.path = folder.to_path_buf();
                    report.repaired += 1;
                    self.persist(&record, report);
                }
                record
            }
            Err(e) if e.is_record_unavailable() => {
                tracing::debug!("{}; deriving from folder name", e);
                self.derive(folder, self.options.rename_folders, report)
            }
            Err(e) => {
                tracing::warn!("Cannot load record in {}: {}", folder.display(), e);
                self.derive(folder, self.options.rename_folders, report)
            }
        }
    }

    /// Derive a record from the folder name and save it.
    ///
    /// The folder is renamed first when asked to, so the record's path is
    /// the final one.
    fn derive(&self, folder: &Path, rename: bool, report: &mut SyncReport) -> MovieRecord {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = parser::parse(&name);

        let mut path = folder.to_path_buf();
        if rename {
            if let Some(canonical) = parsed.canonical_folder_name().filter(|c| *c != name) {
                let target = self.root.join(&canonical);
                match fs_utils::move_no_overwrite(folder, &target) {
                    Ok(()) => {
                        tracing::info!("Renamed '{}' -> '{}'", name, canonical);
                        report.renamed += 1;
                        path = target;
                    }
                    Err(e) => {
                        tracing::warn!("Cannot rename '{}' to '{}': {}", name, canonical, e);
                        report
                            .conflicts
                            .push(format!("rename '{}' -> '{}': {}", name, canonical, e));
                    }
                }
            }
        }

        let record = parsed.into_record(path);
        report.created += 1;
        self.persist(&record, report);
        record
    }

    /// Move a loose media file into a new folder named after it.
    fn relocate(&self, file: &Path, report: &mut SyncReport) -> Option<PathBuf> {
        let stem = file.file_stem()?.to_string_lossy().to_string();
        let file_name = file.file_name()?;
        let folder = self.root.join(&stem);

        if folder.exists() {
            tracing::warn!("Cannot relocate {}: {} exists", file.display(), folder.display());
            report.conflicts.push(format!(
                "relocate '{}': '{}' already exists",
                file_name.to_string_lossy(),
                stem
            ));
            return None;
        }

        let moved = std::fs::create_dir(&folder)
            .map_err(crate::Error::from)
            .and_then(|_| fs_utils::move_no_overwrite(file, &folder.join(file_name)));
        match moved {
            Ok(()) => {
                tracing::info!("Relocated {} into {}", file.display(), folder.display());
                report.relocated += 1;
                Some(folder)
            }
            Err(e) => {
                tracing::warn!("Failed to relocate {}: {}", file.display(), e);
                let _ = std::fs::remove_dir(&folder);
                report.conflicts.push(format!(
                    "relocate '{}': {}",
                    file_name.to_string_lossy(),
                    e
                ));
                None
            }
        }
    }

    fn persist(&self, record: &MovieRecord, report: &mut SyncReport) {
        if let Err(e) = store::save_record(record) {
            tracing::warn!("Failed to save record for '{}': {}", record.title, e);
            report.unsaved.push(record.title.clone());
        }
    }

    /// Insert keyed by title; a duplicate title replaces the earlier record.
    fn insert(&mut self, record: MovieRecord, report: &mut SyncReport) {
        match self.records.iter_mut().find(|r| r.title == record.title) {
            Some(existing) => {
                tracing::warn!(
                    "Duplicate title '{}': {} replaces {}",
                    record.title,
                    record.path.display(),
                    existing.path.display()
                );
                report.duplicates.push(record.title.clone());
                *existing = record;
            }
            None => self.records.push(record),
        }
    }
}
