//! Enrichment pipeline.
//!
//! Fills record fields from a `MetadataProvider` in four steps: search,
//! credits, poster and external id. Each step is skipped when its field is
//! already populated unless `force` is set. A step works on a copy of the
//! record and only commits it once the per-folder save succeeded, so a
//! failure leaves the record exactly as it was.

use crate::core::store;
use crate::models::record::{CastMember, Gender, MovieRecord, ProviderMetadata};
use crate::services::provider::{Credits, MetadataProvider};
use futures::StreamExt;

/// Cast entries kept per record.
pub const MAX_CAST: usize = 5;

/// Crew jobs merged into the screenplay list.
const SCREENPLAY_JOBS: &[&str] = &["Screenplay", "Dialogue"];

/// Outcome of one enrichment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Field already present.
    Skipped,
    /// Field filled and persisted.
    Updated,
    /// Field left unset; the reason is for reporting only.
    Missed(String),
}

impl StepOutcome {
    pub fn is_missed(&self) -> bool {
        matches!(self, StepOutcome::Missed(_))
    }
}

/// Per-record enrichment summary.
#[derive(Debug, Clone)]
pub struct EnrichReport {
    pub title: String,
    pub search: StepOutcome,
    pub credits: StepOutcome,
    pub poster: StepOutcome,
    pub external_id: StepOutcome,
}

impl EnrichReport {
    /// Steps that missed, with their reasons.
    pub fn misses(&self) -> Vec<(&'static str, &str)> {
        [
            ("search", &self.search),
            ("credits", &self.credits),
            ("poster", &self.poster),
            ("external id", &self.external_id),
        ]
        .into_iter()
        .filter_map(|(step, outcome)| match outcome {
            StepOutcome::Missed(reason) => Some((step, reason.as_str())),
            _ => None,
        })
        .collect()
    }

    /// Whether any step changed the record or its files.
    pub fn changed(&self) -> bool {
        [&self.search, &self.credits, &self.poster, &self.external_id]
            .iter()
            .any(|o| **o == StepOutcome::Updated)
    }
}

/// Credits reduced to what a record stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditSummary {
    pub director: Option<String>,
    pub screenplay: Vec<String>,
    pub cast: Vec<CastMember>,
}

/// Classify provider credits.
///
/// The first `Director` wins. `Screenplay` and `Dialogue` entries merge into
/// a list without duplicates. Cast is cut to the first five by billing order.
pub fn summarize_credits(credits: Credits) -> CreditSummary {
    let mut summary = CreditSummary::default();

    for person in credits.crew {
        if person.job == "Director" && summary.director.is_none() {
            summary.director = Some(person.name.clone());
        }
        if SCREENPLAY_JOBS.contains(&person.job.as_str()) && !summary.screenplay.contains(&person.name) {
            summary.screenplay.push(person.name);
        }
    }

    let mut cast = credits.cast;
    // Stable: entries without an order keep provider order, after the billed ones.
    cast.sort_by_key(|c| c.order.unwrap_or(u32::MAX));
    summary.cast = cast
        .into_iter()
        .take(MAX_CAST)
        .map(|c| CastMember {
            name: c.name,
            role: c.character.unwrap_or_default(),
            gender: Gender::from_provider_code(c.gender),
        })
        .collect();

    summary
}

/// Runs the enrichment steps against a provider.
pub struct Enricher<P> {
    provider: P,
}

impl<P: MetadataProvider> Enricher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run every step for one record. Never fails; misses are reported.
    pub async fn enrich(&self, record: &mut MovieRecord, force: bool) -> EnrichReport {
        let search = self.search_step(record, force).await;
        let credits = self.credits_step(record, force).await;
        let poster = self.poster_step(record, force).await;
        let external_id = self.external_id_step(record, force).await;

        let report = EnrichReport {
            title: record.title.clone(),
            search,
            credits,
            poster,
            external_id,
        };
        for (step, reason) in report.misses() {
            tracing::warn!("{}: {} step missed: {}", report.title, step, reason);
        }
        report
    }

    /// Enrich every record, reporting each one to `on_done` as it finishes.
    ///
    /// With `concurrency > 1` several records are in flight at once; reports
    /// still come back in record order.
    pub async fn enrich_all_with<F>(
        &self,
        records: &mut [MovieRecord],
        force: bool,
        concurrency: usize,
        on_done: F,
    ) -> Vec<EnrichReport>
    where
        F: Fn(&EnrichReport),
    {
        if concurrency <= 1 {
            let mut reports = Vec::with_capacity(records.len());
            for record in records.iter_mut() {
                let report = self.enrich(record, force).await;
                on_done(&report);
                reports.push(report);
            }
            return reports;
        }

        futures::stream::iter(records.iter_mut().map(|record| self.enrich(record, force)))
            .buffered(concurrency)
            .inspect(|report| on_done(report))
            .collect()
            .await
    }

    /// Enrich every record.
    pub async fn enrich_all(
        &self,
        records: &mut [MovieRecord],
        force: bool,
        concurrency: usize,
    ) -> Vec<EnrichReport> {
        self.enrich_all_with(records, force, concurrency, |_| {}).await
    }

    /// Match the record against the provider by title and year.
    pub async fn search_step(&self, record: &mut MovieRecord, force: bool) -> StepOutcome {
        if record.provider_metadata.is_some() && !force {
            return StepOutcome::Skipped;
        }

        let candidate = match self.provider.search_movie(&record.title, record.year).await {
            Ok(Some(c)) => c,
            Ok(None) => {
                return StepOutcome::Missed(format!(
                    "no {} match for '{}' ({})",
                    self.provider.name(),
                    record.title,
                    record.year
                ))
            }
            Err(e) => return StepOutcome::Missed(e.to_string()),
        };

        // A re-match to the same movie keeps its cross-reference id.
        let imdb_id = record
            .provider_metadata
            .as_ref()
            .filter(|m| m.id == candidate.id)
            .and_then(|m| m.imdb_id.clone());

        let mut updated = record.clone();
        updated.provider_metadata = Some(ProviderMetadata {
            id: candidate.id,
            genre_ids: candidate.genre_ids,
            poster_path: candidate.poster_path,
            imdb_id,
        });
        commit(record, updated)
    }

    /// Fill director, screenplay and cast from the provider's credits.
    pub async fn credits_step(&self, record: &mut MovieRecord, force: bool) -> StepOutcome {
        if record.director.is_some() && !force {
            return StepOutcome::Skipped;
        }
        let Some(id) = record.provider_id() else {
            return StepOutcome::Missed("no provider id".to_string());
        };

        let credits = match self.provider.get_credits(id).await {
            Ok(c) => c,
            Err(e) => return StepOutcome::Missed(e.to_string()),
        };
        let summary = summarize_credits(credits);
        let found_director = summary.director.is_some();

        let mut updated = record.clone();
        if found_director {
            updated.director = summary.director;
        }
        updated.screenplay = Some(summary.screenplay);
        updated.cast = Some(summary.cast);

        match commit(record, updated) {
            StepOutcome::Updated if !found_director => {
                StepOutcome::Missed("credits list no director".to_string())
            }
            outcome => outcome,
        }
    }

    /// Download the poster into the folder's image directory.
    pub async fn poster_step(&self, record: &MovieRecord, force: bool) -> StepOutcome {
        if record.has_poster() && !force {
            return StepOutcome::Skipped;
        }
        let Some(poster_path) = record
            .provider_metadata
            .as_ref()
            .and_then(|m| m.poster_path.clone())
        else {
            return StepOutcome::Missed("no poster reference".to_string());
        };

        match self.provider.get_poster(&poster_path).await {
            Ok(Some(bytes)) => match store::save_poster(record, &bytes) {
                Ok(_) => StepOutcome::Updated,
                Err(e) => StepOutcome::Missed(format!("poster not saved: {}", e)),
            },
            Ok(None) => StepOutcome::Missed(format!("poster {} unavailable", poster_path)),
            Err(e) => StepOutcome::Missed(e.to_string()),
        }
    }

    /// Fetch the external cross-reference id once.
    pub async fn external_id_step(&self, record: &mut MovieRecord, force: bool) -> StepOutcome {
        let Some(metadata) = record.provider_metadata.as_ref() else {
            return StepOutcome::Missed("no provider id".to_string());
        };
        if metadata.imdb_id.is_some() && !force {
            return StepOutcome::Skipped;
        }

        let imdb_id = match self.provider.get_external_id(metadata.id).await {
            Ok(Some(id)) => id,
            Ok(None) => return StepOutcome::Missed("no external id".to_string()),
            Err(e) => return StepOutcome::Missed(e.to_string()),
        };

        let mut updated = record.clone();
        if let Some(m) = updated.provider_metadata.as_mut() {
            m.imdb_id = Some(imdb_id);
        }
        commit(record, updated)
    }
}

/// Persist `updated` and only then replace `record` with it.
fn commit(record: &mut MovieRecord, updated: MovieRecord) -> StepOutcome {
    match store::save_record(&updated) {
        Ok(()) => {
            *record = updated;
            StepOutcome::Updated
        }
        Err(e) => StepOutcome::Missed(format!("record not saved: {}", e)),
    }
}
