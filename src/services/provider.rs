//! Metadata provider seam.
//!
//! The enrichment pipeline only talks to this trait. Every call is fallible
//! on its own; a failure in one never implies anything about the others.

use crate::models::record::Year;
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// A search match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieCandidate {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieCandidate {
    /// Release year string as the provider reports it (`"1998"` from `"1998-01-31"`).
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
    }
}

/// Movie credits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastCredit>,
    #[serde(default)]
    pub crew: Vec<CrewCredit>,
}

/// Cast entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CastCredit {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
    /// Provider gender code.
    #[serde(default)]
    pub gender: Option<u8>,
}

/// Crew entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CrewCredit {
    pub name: String,
    pub job: String,
}

/// External metadata source.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Find the movie matching `title` released in `year`.
    async fn search_movie(&self, title: &str, year: Year) -> Result<Option<MovieCandidate>>;

    /// Cast and crew for a provider id.
    async fn get_credits(&self, movie_id: u64) -> Result<Credits>;

    /// Poster image bytes for a poster reference.
    async fn get_poster(&self, poster_path: &str) -> Result<Option<Vec<u8>>>;

    /// External cross-reference (IMDB) id for a provider id.
    async fn get_external_id(&self, movie_id: u64) -> Result<Option<String>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// First candidate whose release year equals `year` exactly.
///
/// An unknown year never matches.
pub fn select_by_year(candidates: Vec<MovieCandidate>, year: Year) -> Option<MovieCandidate> {
    let wanted = year.value()?.to_string();
    candidates
        .into_iter()
        .find(|c| c.release_year() == Some(wanted.as_str()))
}
