use std::sync::Arc;

use leadgen_core::{EmailRecord, FilterCriteria, SearchQuery, WebsiteId};

use crate::BackendError;

/// Finds candidate websites for a query. `count` results when satisfiable;
/// no results is an empty list, not an error.
#[async_trait::async_trait]
pub trait WebsiteSource: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<WebsiteId>, BackendError>;
}

/// Keeps the websites passing every enabled check and matching no exclusion,
/// in their original order.
#[async_trait::async_trait]
pub trait WebsiteFilter: Send + Sync {
    async fn filter(
        &self,
        websites: &[WebsiteId],
        criteria: &FilterCriteria,
    ) -> Result<Vec<WebsiteId>, BackendError>;
}

/// Produces exactly one record per input website, same order, duplicates kept.
#[async_trait::async_trait]
pub trait EmailExtractor: Send + Sync {
    async fn extract(&self, websites: &[WebsiteId]) -> Result<Vec<EmailRecord>, BackendError>;
}

#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn WebsiteSource>,
    pub filter: Arc<dyn WebsiteFilter>,
    pub extractor: Arc<dyn EmailExtractor>,
}

impl Collaborators {
    /// Uses one backend for all three stages.
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: WebsiteSource + WebsiteFilter + EmailExtractor + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            source: backend.clone(),
            filter: backend.clone(),
            extractor: backend,
        }
    }
}
