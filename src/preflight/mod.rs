//! Checks run before a scan enriches from a metadata provider.
//!
//! A failed check never stops a scan: the catalog is still synchronized and
//! indexed, only enrichment is skipped.

mod tmdb;

use crate::models::config::Config;
use colored::Colorize;

/// Whether a provider can be used for enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ready(String),
    Unavailable { reason: String, hint: &'static str },
}

/// Outcome of checking one provider.
#[derive(Debug, Clone)]
pub struct ProviderCheck {
    pub provider: &'static str,
    pub status: ProviderStatus,
}

impl ProviderCheck {
    pub fn is_ready(&self) -> bool {
        matches!(self.status, ProviderStatus::Ready(_))
    }

    /// One `[OK]`/`[FAIL]` line, plus a hint for failures.
    pub fn print(&self) {
        match &self.status {
            ProviderStatus::Ready(detail) => {
                println!("{} {}: {}", "[OK]".green(), self.provider.bold(), detail)
            }
            ProviderStatus::Unavailable { reason, hint } => {
                println!("{} {}: {}", "[FAIL]".red(), self.provider.bold(), reason);
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check every provider enrichment needs.
pub async fn check_providers(config: &Config) -> Vec<ProviderCheck> {
    vec![tmdb::check(&config.tmdb).await]
}

/// Run and print the provider checks; `true` when enrichment can go ahead.
pub async fn ready_for_enrichment(config: &Config) -> bool {
    println!("{}", "Checking metadata providers...".bold());

    let checks = check_providers(config).await;
    for check in &checks {
        check.print();
    }
    println!();

    let ready = checks.iter().all(ProviderCheck::is_ready);
    if !ready {
        tracing::warn!("Metadata provider unavailable, enrichment will be skipped");
    }
    ready
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_key() -> Config {
        let mut config = Config::default();
        config.tmdb.api_key = None;
        config
    }

    #[tokio::test]
    async fn test_missing_key_is_unavailable_without_network() {
        let checks = check_providers(&config_without_key()).await;

        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].provider, "TMDB API");
        assert!(matches!(
            &checks[0].status,
            ProviderStatus::Unavailable { reason, .. } if reason == "API key not configured"
        ));
    }

    #[tokio::test]
    async fn test_missing_key_blocks_enrichment() {
        assert!(!ready_for_enrichment(&config_without_key()).await);
    }
}
