use std::time::Duration;

use leadgen_core::{EmailRecord, FilterCriteria, SearchQuery, WebsiteId};
use pipeline_logging::pipeline_debug;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{BackendError, BackendErrorKind, EmailExtractor, WebsiteFilter, WebsiteSource};

const SEARCH_PATH: &str = "websites/search";
const FILTER_PATH: &str = "websites/filter";
const EXTRACT_PATH: &str = "emails/extract";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Delegates all three stages to a remote lead-gen service speaking JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    keyword: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    count: u32,
}

#[derive(Serialize)]
struct FilterRequest<'a> {
    websites: &'a [WebsiteId],
    filters: FilterFlags<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterFlags<'a> {
    is_domain_active: bool,
    is_shopify: bool,
    load_time_check: bool,
    excluded_websites: &'a [String],
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    websites: &'a [WebsiteId],
}

#[derive(Deserialize)]
struct WebsitesResponse {
    websites: Vec<WebsiteId>,
}

#[derive(Deserialize)]
struct ExtractResponse {
    results: Vec<WireEmailRecord>,
}

#[derive(Deserialize)]
struct WireEmailRecord {
    website: WebsiteId,
    #[serde(default)]
    emails: Vec<String>,
}

impl HttpBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let mut base = settings.base_url.trim().to_string();
        // `Url::join` drops the last path segment unless the base ends in '/'.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|err| BackendError::new(BackendErrorKind::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::new(BackendErrorKind::Network, err.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| BackendError::new(BackendErrorKind::InvalidUrl, err.to_string()))?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| BackendError::new(BackendErrorKind::Decode, err.to_string()))?;
        pipeline_debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .client
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                BackendErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| BackendError::new(BackendErrorKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl WebsiteSource for HttpBackend {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<WebsiteId>, BackendError> {
        let request = SearchRequest {
            keyword: &query.keyword,
            country: query.country.as_deref(),
            location: query.locality.as_deref(),
            count: query.count,
        };
        let response: WebsitesResponse = self.post(SEARCH_PATH, &request).await?;
        Ok(response.websites)
    }
}

#[async_trait::async_trait]
impl WebsiteFilter for HttpBackend {
    async fn filter(
        &self,
        websites: &[WebsiteId],
        criteria: &FilterCriteria,
    ) -> Result<Vec<WebsiteId>, BackendError> {
        let request = FilterRequest {
            websites,
            filters: FilterFlags {
                is_domain_active: criteria.domain_active,
                is_shopify: criteria.is_shopify,
                load_time_check: criteria.load_time_check,
                excluded_websites: &criteria.excluded_substrings,
            },
        };
        let response: WebsitesResponse = self.post(FILTER_PATH, &request).await?;
        Ok(response.websites)
    }
}

#[async_trait::async_trait]
impl EmailExtractor for HttpBackend {
    async fn extract(&self, websites: &[WebsiteId]) -> Result<Vec<EmailRecord>, BackendError> {
        let response: ExtractResponse = self
            .post(EXTRACT_PATH, &ExtractRequest { websites })
            .await?;
        Ok(response
            .results
            .into_iter()
            .map(|record| EmailRecord::new(record.website, record.emails))
            .collect())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(BackendErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(BackendErrorKind::Decode, err.to_string());
    }
    BackendError::new(BackendErrorKind::Network, err.to_string())
}
