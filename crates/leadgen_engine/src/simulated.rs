use std::time::Duration;

use leadgen_core::{EmailRecord, FilterCriteria, SearchQuery, WebsiteId};
use pipeline_logging::pipeline_debug;
use sha2::{Digest, Sha256};

use crate::{BackendError, EmailExtractor, WebsiteFilter, WebsiteSource};

/// Mailbox names the simulated extractor draws from.
pub const MAILBOXES: [&str; 5] = ["info", "contact", "support", "hello", "admin"];

#[derive(Debug, Clone)]
pub struct SimulatedSettings {
    /// Delay applied to every call, to exercise the busy state.
    pub latency: Duration,
    pub max_emails_per_site: usize,
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            max_emails_per_site: 3,
        }
    }
}

/// Offline stand-in for a lead-gen backend. Deterministic: the same input always
/// yields the same output.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    settings: SimulatedSettings,
}

impl SimulatedBackend {
    pub fn new(settings: SimulatedSettings) -> Self {
        Self { settings }
    }

    async fn pause(&self) {
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }
    }

    fn emails_for(&self, website: &str) -> Vec<String> {
        let digest = Sha256::digest(website.as_bytes());
        let choices = self.settings.max_emails_per_site.saturating_add(1);
        let count = usize::from(digest[0]) % choices;
        let offset = usize::from(digest[1]);
        (0..count)
            .map(|i| format!("{}@{website}", MAILBOXES[(offset + i) % MAILBOXES.len()]))
            .collect()
    }
}

#[async_trait::async_trait]
impl WebsiteSource for SimulatedBackend {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<WebsiteId>, BackendError> {
        self.pause().await;
        let stem: String = query
            .keyword
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let region: String = query
            .country
            .as_deref()
            .map(|country| country.to_lowercase().chars().take(2).collect())
            .unwrap_or_default();
        Ok((1..=query.count)
            .map(|i| format!("{stem}{region}{i}.com"))
            .collect())
    }
}

#[async_trait::async_trait]
impl WebsiteFilter for SimulatedBackend {
    async fn filter(
        &self,
        websites: &[WebsiteId],
        criteria: &FilterCriteria,
    ) -> Result<Vec<WebsiteId>, BackendError> {
        self.pause().await;
        if criteria.has_checks() {
            // No probe data offline: every enabled check is treated as passing.
            pipeline_debug!(
                "simulated filter: domain_active={} shopify={} load_time={} assumed to pass",
                criteria.domain_active,
                criteria.is_shopify,
                criteria.load_time_check
            );
        }
        Ok(websites
            .iter()
            .filter(|site| !criteria.excludes(site))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl EmailExtractor for SimulatedBackend {
    async fn extract(&self, websites: &[WebsiteId]) -> Result<Vec<EmailRecord>, BackendError> {
        self.pause().await;
        Ok(websites
            .iter()
            .map(|site| EmailRecord::new(site.clone(), self.emails_for(site)))
            .collect())
    }
}
