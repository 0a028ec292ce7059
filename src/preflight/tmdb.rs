//! TMDB reachability and credential check.

use super::{ProviderCheck, ProviderStatus};
use crate::models::config::TmdbConfig;
use crate::services::tmdb::TmdbClient;

const PROVIDER: &str = "TMDB API";

/// Verify that a key is configured and that TMDB accepts it.
pub async fn check(config: &TmdbConfig) -> ProviderCheck {
    let status = match TmdbClient::new(config.clone()) {
        Err(_) => ProviderStatus::Unavailable {
            reason: "API key not configured".to_string(),
            hint: "Set TMDB_API_KEY or tmdb.api_key in config.toml",
        },
        Ok(client) => match client.verify_api_key().await {
            Ok(true) => ProviderStatus::Ready(format!("key accepted by {}", config.base_url)),
            Ok(false) => ProviderStatus::Unavailable {
                reason: "key rejected or TMDB unreachable".to_string(),
                hint: "Check tmdb.api_key, tmdb.base_url and your network connection",
            },
            Err(e) => ProviderStatus::Unavailable {
                reason: e.to_string(),
                hint: "Check your network connection",
            },
        },
    };

    ProviderCheck {
        provider: PROVIDER,
        status,
    }
}
