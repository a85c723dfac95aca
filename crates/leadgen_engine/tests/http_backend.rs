use std::time::Duration;

use leadgen_core::{FilterCriteria, SearchQuery};
use leadgen_engine::{
    BackendErrorKind, BackendSettings, EmailExtractor, HttpBackend, WebsiteFilter, WebsiteSource,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(BackendSettings {
        base_url: format!("{}/api", server.uri()),
        ..BackendSettings::default()
    })
    .expect("backend")
}

#[tokio::test]
async fn search_posts_query_and_returns_websites() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/websites/search"))
        .and(body_json(json!({
            "keyword": "bakery",
            "country": "US",
            "count": 2
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "websites": ["a-bakery.com", "b-bakery.com"] })),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let query = SearchQuery::new("bakery").with_country("US").with_count(2);

    let sites = backend.fetch(&query).await.expect("fetch ok");
    assert_eq!(sites, vec!["a-bakery.com", "b-bakery.com"]);
}

#[tokio::test]
async fn filter_sends_flags_in_backend_naming() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/websites/filter"))
        .and(body_json(json!({
            "websites": ["a.com", "b.com"],
            "filters": {
                "isDomainActive": true,
                "isShopify": false,
                "loadTimeCheck": true,
                "excludedWebsites": ["b"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "websites": ["a.com"] })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let criteria = FilterCriteria {
        domain_active: true,
        load_time_check: true,
        ..FilterCriteria::default()
    }
    .with_exclusions("b");

    let sites = backend
        .filter(&["a.com".to_string(), "b.com".to_string()], &criteria)
        .await
        .expect("filter ok");
    assert_eq!(sites, vec!["a.com"]);
}

#[tokio::test]
async fn extract_defaults_missing_emails_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/emails/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "website": "a.com", "emails": ["info@a.com"] },
                { "website": "b.com" }
            ]
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let records = backend
        .extract(&["a.com".to_string(), "b.com".to_string()])
        .await
        .expect("extract ok");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].emails, vec!["info@a.com"]);
    assert!(records[1].emails.is_empty());
}

#[tokio::test]
async fn http_status_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/websites/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .fetch(&SearchQuery::new("bakery"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, BackendErrorKind::HttpStatus(503));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/websites/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .fetch(&SearchQuery::new("bakery"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, BackendErrorKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/emails/extract"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "results": [] })),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(BackendSettings {
        base_url: format!("{}/api", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::default()
    })
    .unwrap();

    let err = backend.extract(&[]).await.unwrap_err();
    assert_eq!(err.kind, BackendErrorKind::Timeout);
}
