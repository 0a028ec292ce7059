//! Integration tests for the enrichment pipeline.
//!
//! Tests cover:
//! - Full enrichment against a scripted provider
//! - Skipping populated fields and forced refetches
//! - Misses that leave other steps and records untouched

use async_trait::async_trait;
use movie_catalog::core::catalog::{Catalog, SyncOptions};
use movie_catalog::core::enrich::{Enricher, StepOutcome};
use movie_catalog::core::store;
use movie_catalog::models::record::{Gender, MovieRecord, Year};
use movie_catalog::services::provider::{
    CastCredit, Credits, CrewCredit, MetadataProvider, MovieCandidate,
};
use movie_catalog::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Provider answering from fixed tables and counting every call.
#[derive(Default)]
struct ScriptedProvider {
    movies: HashMap<(String, u16), MovieCandidate>,
    credits: HashMap<u64, Credits>,
    imdb_ids: HashMap<u64, String>,
    poster: Option<Vec<u8>>,
    failing_credits: bool,
    searches: AtomicUsize,
    credit_calls: AtomicUsize,
    poster_calls: AtomicUsize,
    external_calls: AtomicUsize,
}

impl ScriptedProvider {
    fn ringu() -> Self {
        let mut provider = Self::default();
        provider.movies.insert(
            ("Ringu".to_string(), 1998),
            MovieCandidate {
                id: 2671,
                title: "Ringu".to_string(),
                release_date: Some("1998-01-31".to_string()),
                genre_ids: vec![27, 9648],
                poster_path: Some("/ringu.jpg".to_string()),
            },
        );
        provider.credits.insert(
            2671,
            Credits {
                cast: vec![
                    CastCredit {
                        name: "Hiroyuki Sanada".to_string(),
                        character: Some("Ryuji Takayama".to_string()),
                        order: Some(1),
                        gender: Some(2),
                    },
                    CastCredit {
                        name: "Nanako Matsushima".to_string(),
                        character: Some("Reiko Asakawa".to_string()),
                        order: Some(0),
                        gender: Some(1),
                    },
                ],
                crew: vec![
                    CrewCredit {
                        name: "Hideo Nakata".to_string(),
                        job: "Director".to_string(),
                    },
                    CrewCredit {
                        name: "Hiroshi Takahashi".to_string(),
                        job: "Screenplay".to_string(),
                    },
                ],
            },
        );
        provider
            .imdb_ids
            .insert(2671, "tt0178868".to_string());
        provider.poster = Some(b"poster bytes".to_vec());
        provider
    }

    fn calls(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
            + self.credit_calls.load(Ordering::SeqCst)
            + self.poster_calls.load(Ordering::SeqCst)
            + self.external_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for ScriptedProvider {
    async fn search_movie(&self, title: &str, year: Year) -> Result<Option<MovieCandidate>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let Some(year) = year.value() else {
            return Ok(None);
        };
        Ok(self.movies.get(&(title.to_string(), year)).cloned())
    }

    async fn get_credits(&self, movie_id: u64) -> Result<Credits> {
        self.credit_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_credits {
            return Err(Error::ProviderStatus {
                status: 503,
                what: format!("credits for {}", movie_id),
            });
        }
        Ok(self.credits.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn get_poster(&self, _poster_path: &str) -> Result<Option<Vec<u8>>> {
        self.poster_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.poster.clone())
    }

    async fn get_external_id(&self, movie_id: u64) -> Result<Option<String>> {
        self.external_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.imdb_ids.get(&movie_id).cloned())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn ringu_record(temp_dir: &TempDir) -> MovieRecord {
    let folder = temp_dir.path().join("Ringu (1998) [720p]");
    fs::create_dir(&folder).unwrap();
    let record = MovieRecord::new("Ringu", Year::Known(1998), "720p", folder);
    store::save_record(&record).unwrap();
    record
}

#[tokio::test]
async fn test_full_enrichment() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = ringu_record(&temp_dir);
    let enricher = Enricher::new(ScriptedProvider::ringu());

    let report = enricher.enrich(&mut record, false).await;

    assert!(report.misses().is_empty());
    assert!(report.changed());
    assert_eq!(record.director.as_deref(), Some("Hideo Nakata"));
    assert_eq!(
        record.screenplay,
        Some(vec!["Hiroshi Takahashi".to_string()])
    );

    let cast = record.cast.as_ref().unwrap();
    assert_eq!(cast[0].name, "Nanako Matsushima");
    assert_eq!(cast[0].gender, Gender::Female);
    assert_eq!(cast[1].gender, Gender::Male);

    let metadata = record.provider_metadata.as_ref().unwrap();
    assert_eq!(metadata.id, 2671);
    assert_eq!(metadata.imdb_id.as_deref(), Some("tt0178868"));
    assert!(record.has_poster());
    assert_eq!(fs::read(record.poster_path()).unwrap(), b"poster bytes");

    // Everything is on disk too.
    assert_eq!(store::load_record(&record.path).unwrap(), record);
}

#[tokio::test]
async fn test_second_pass_makes_no_calls() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = ringu_record(&temp_dir);
    let enricher = Enricher::new(ScriptedProvider::ringu());

    enricher.enrich(&mut record, false).await;
    let calls = enricher.provider().calls();
    let before = record.clone();

    let report = enricher.enrich(&mut record, false).await;

    assert_eq!(enricher.provider().calls(), calls);
    assert!(!report.changed());
    assert_eq!(report.search, StepOutcome::Skipped);
    assert_eq!(report.credits, StepOutcome::Skipped);
    assert_eq!(report.poster, StepOutcome::Skipped);
    assert_eq!(report.external_id, StepOutcome::Skipped);
    assert_eq!(record, before);
}

#[tokio::test]
async fn test_credits_skipped_when_director_present() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = ringu_record(&temp_dir);
    let enricher = Enricher::new(ScriptedProvider::ringu());

    enricher.search_step(&mut record, false).await;
    record.director = Some("Someone Else".to_string());

    let outcome = enricher.credits_step(&mut record, false).await;

    assert_eq!(outcome, StepOutcome::Skipped);
    assert_eq!(enricher.provider().credit_calls.load(Ordering::SeqCst), 0);
    assert_eq!(record.director.as_deref(), Some("Someone Else"));
}

#[tokio::test]
async fn test_force_refetches_populated_fields() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = ringu_record(&temp_dir);
    let enricher = Enricher::new(ScriptedProvider::ringu());

    enricher.search_step(&mut record, false).await;
    record.director = Some("Someone Else".to_string());

    let outcome = enricher.credits_step(&mut record, true).await;

    assert_eq!(outcome, StepOutcome::Updated);
    assert_eq!(record.director.as_deref(), Some("Hideo Nakata"));
}

#[tokio::test]
async fn test_search_miss_leaves_record_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("Unknown Film");
    fs::create_dir(&folder).unwrap();
    let mut record = MovieRecord::new("Unknown Film", Year::Unknown, "-", folder);
    store::save_record(&record).unwrap();
    let before = record.clone();

    let enricher = Enricher::new(ScriptedProvider::ringu());
    let report = enricher.enrich(&mut record, false).await;

    assert!(report.search.is_missed());
    assert!(report.credits.is_missed());
    assert!(report.poster.is_missed());
    assert!(report.external_id.is_missed());
    assert!(!report.changed());
    assert_eq!(record, before);
    assert_eq!(store::load_record(&record.path).unwrap(), before);
}

#[tokio::test]
async fn test_failed_step_does_not_stop_later_steps() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = ringu_record(&temp_dir);
    let provider = ScriptedProvider {
        failing_credits: true,
        ..ScriptedProvider::ringu()
    };
    let enricher = Enricher::new(provider);

    let report = enricher.enrich(&mut record, false).await;

    assert_eq!(report.search, StepOutcome::Updated);
    assert!(report.credits.is_missed());
    assert_eq!(report.poster, StepOutcome::Updated);
    assert_eq!(report.external_id, StepOutcome::Updated);
    assert!(record.director.is_none());
    assert!(record.cast.is_none());
}

#[tokio::test]
async fn test_missing_poster_is_a_miss() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = ringu_record(&temp_dir);
    let provider = ScriptedProvider {
        poster: None,
        ..ScriptedProvider::ringu()
    };
    let enricher = Enricher::new(provider);

    let report = enricher.enrich(&mut record, false).await;

    assert!(report.poster.is_missed());
    assert!(!record.has_poster());
    assert_eq!(report.misses().len(), 1);
}

#[tokio::test]
async fn test_enrich_all_over_catalog() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("Ringu (1998) [720p]")).unwrap();
    fs::create_dir(temp_dir.path().join("Audition (1999)")).unwrap();

    let (mut catalog, _) = Catalog::scan(temp_dir.path(), SyncOptions::default()).unwrap();
    let enricher = Enricher::new(ScriptedProvider::ringu());

    let reports = enricher.enrich_all(catalog.records_mut(), false, 2).await;

    // Reports follow catalog order: "Audition (1999)" sorts first.
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].title, "Audition");
    assert!(reports[0].search.is_missed());
    assert_eq!(reports[1].title, "Ringu");
    assert!(reports[1].misses().is_empty());

    let (rescanned, _) = Catalog::scan(temp_dir.path(), SyncOptions::default()).unwrap();
    assert_eq!(
        rescanned.get("Ringu").unwrap().director.as_deref(),
        Some("Hideo Nakata")
    );
    assert!(rescanned.get("Audition").unwrap().director.is_none());
}
