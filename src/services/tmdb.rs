//! TMDB API client.

use crate::models::config::TmdbConfig;
use crate::models::record::Year;
use crate::services::provider::{select_by_year, Credits, MetadataProvider, MovieCandidate};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// TMDB API client.
pub struct TmdbClient {
    api_key: String,
    /// Whether to use Bearer token authentication (API v4 style)
    use_bearer: bool,
    config: TmdbConfig,
    client: reqwest::Client,
}

/// Movie search result.
#[derive(Debug, Deserialize)]
struct MovieSearchResult {
    results: Vec<MovieCandidate>,
}

/// External ids of a movie.
#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}

impl TmdbClient {
    /// Create a new TMDB client.
    ///
    /// Fails when no API key is configured.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.trim().to_string();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");
        Ok(Self {
            api_key,
            use_bearer,
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if self.use_bearer {
            format!(
                "{}/{}?language={}{}",
                base, path, self.config.language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                base, path, self.api_key, self.config.language, extra_params
            )
        }
    }

    /// Full image URL for a poster reference.
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.config.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = self.build_url("authentication", "");
        match self.build_request(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// GET a JSON document, mapping non-success statuses to errors.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let resp = self.build_request(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::ProviderStatus {
                status: status.as_u16(),
                what: what.to_string(),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn search_movie(&self, title: &str, year: Year) -> Result<Option<MovieCandidate>> {
        let url = self.build_url(
            "search/movie",
            &format!(
                "&include_adult={}&query={}",
                self.config.include_adult,
                urlencoding::encode(title)
            ),
        );
        let resp: MovieSearchResult = self
            .get_json(&url, &format!("search '{}'", title))
            .await?;
        tracing::debug!("TMDB returned {} candidates for '{}'", resp.results.len(), title);
        Ok(select_by_year(resp.results, year))
    }

    async fn get_credits(&self, movie_id: u64) -> Result<Credits> {
        let url = self.build_url(&format!("movie/{}/credits", movie_id), "");
        self.get_json(&url, &format!("credits for {}", movie_id)).await
    }

    async fn get_poster(&self, poster_path: &str) -> Result<Option<Vec<u8>>> {
        let url = self.poster_url(poster_path);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            tracing::debug!("Poster {} returned {}", poster_path, resp.status());
            return Ok(None);
        }
        let bytes = resp.bytes().await?;
        Ok(Some(bytes.to_vec()))
    }

    async fn get_external_id(&self, movie_id: u64) -> Result<Option<String>> {
        let url = self.build_url(&format!("movie/{}/external_ids", movie_id), "");
        let ids: ExternalIds = self
            .get_json(&url, &format!("external ids for {}", movie_id))
            .await?;
        Ok(ids.imdb_id.filter(|id| !id.is_empty()))
    }

    fn name(&self) -> &'static str {
        "TMDB"
    }
}
