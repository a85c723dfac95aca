use std::sync::Arc;

use async_trait::async_trait;
use leadgen_core::{
    EmailRecord, FilterCriteria, PipelineError, SearchQuery, Stage, ValidationError, WebsiteId,
};
use leadgen_engine::{
    BackendError, Collaborators, EmailExtractor, EngineConfig, Pipeline, SimulatedBackend,
    SimulatedSettings, WebsiteFilter, WebsiteSource,
};
use pretty_assertions::assert_eq;

fn pipeline(dir: &std::path::Path) -> Pipeline {
    Pipeline::new(EngineConfig::simulated_with_output(dir))
}

#[tokio::test]
async fn fetch_yields_requested_count_and_advances_to_filter() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = pipeline(temp.path());

    let sites = pipeline
        .run_fetch(SearchQuery::new("bakery").with_count(3))
        .await
        .unwrap();

    assert_eq!(sites, vec!["bakery1.com", "bakery2.com", "bakery3.com"]);
    assert_eq!(pipeline.state().active_stage(), Stage::Filter);
    assert!(!pipeline.state().is_busy());
}

#[tokio::test]
async fn fetch_with_empty_keyword_fails_validation() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = pipeline(temp.path());

    let err = pipeline.run_fetch(SearchQuery::new("")).await.unwrap_err();

    assert_eq!(err, PipelineError::Validation(ValidationError::EmptyKeyword));
    assert_eq!(pipeline.state().active_stage(), Stage::Fetch);
    assert!(pipeline.state().fetched_websites().is_empty());
}

#[tokio::test]
async fn filter_drops_excluded_substrings() {
    let temp = tempfile::TempDir::new().unwrap();
    let csv = temp.path().join("sites.csv");
    std::fs::write(&csv, "a.com\nb.com\n").unwrap();
    let mut pipeline = pipeline(temp.path());

    let count = pipeline
        .upload_csv(Stage::Filter, csv.display().to_string())
        .await
        .unwrap();
    assert_eq!(count, 2);

    let filtered = pipeline
        .run_filter(FilterCriteria::default().with_exclusions("b"))
        .await
        .unwrap();

    assert_eq!(filtered, vec!["a.com"]);
    assert_eq!(pipeline.state().active_stage(), Stage::Email);
}

#[tokio::test]
async fn filter_without_checks_or_exclusions_is_identity() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = pipeline(temp.path());
    let fetched = pipeline
        .run_fetch(SearchQuery::new("eyeglasses store").with_country("Norway").with_count(5))
        .await
        .unwrap();

    let filtered = pipeline.run_filter(FilterCriteria::default()).await.unwrap();

    assert_eq!(filtered, fetched);
    assert_eq!(fetched[0], "eyeglassesstoreno1.com");
}

#[tokio::test]
async fn extract_on_fresh_session_fails_validation_without_state_change() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = pipeline(temp.path());

    let err = pipeline.run_extract().await.unwrap_err();

    assert!(matches!(err, PipelineError::Validation(_)));
    assert!(pipeline.state().email_results().is_empty());
    assert_eq!(pipeline.state().active_stage(), Stage::Fetch);
}

#[tokio::test]
async fn full_run_extracts_one_record_per_site_and_exports() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = Pipeline::new(EngineConfig::new(
        Collaborators::from_backend(SimulatedBackend::new(SimulatedSettings {
            max_emails_per_site: 2,
            ..SimulatedSettings::default()
        })),
        temp.path(),
    ));

    pipeline
        .run_fetch(SearchQuery::new("florist").with_count(6))
        .await
        .unwrap();
    let filtered = pipeline.run_filter(FilterCriteria::default()).await.unwrap();
    let records = pipeline.run_extract().await.unwrap();

    let websites: Vec<_> = records.iter().map(|r| r.website.clone()).collect();
    assert_eq!(websites, filtered);
    assert!(records.iter().all(|r| r.emails.len() <= 2));

    let text = pipeline.export_results();
    assert_eq!(text, pipeline.export_results());
    assert!(text.starts_with("Website,Email\n"));

    let path = pipeline.save_export().await.unwrap();
    assert_eq!(path.file_name().unwrap(), "email_results.csv");
    assert_eq!(std::fs::read_to_string(path).unwrap(), text);
}

#[tokio::test]
async fn export_without_results_is_rejected() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = pipeline(temp.path());

    let err = pipeline.save_export().await.unwrap_err();
    assert_eq!(err, PipelineError::Validation(ValidationError::NoResults));
}

struct Broken;

#[async_trait]
impl WebsiteSource for Broken {
    async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<WebsiteId>, BackendError> {
        Ok(vec!["a.com".to_string(), "b.com".to_string()])
    }
}

#[async_trait]
impl WebsiteFilter for Broken {
    async fn filter(
        &self,
        _websites: &[WebsiteId],
        _criteria: &FilterCriteria,
    ) -> Result<Vec<WebsiteId>, BackendError> {
        Ok(vec!["intruder.com".to_string()])
    }
}

#[async_trait]
impl EmailExtractor for Broken {
    async fn extract(&self, _websites: &[WebsiteId]) -> Result<Vec<EmailRecord>, BackendError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn contract_violation_is_an_operation_error_and_discards_output() {
    let temp = tempfile::TempDir::new().unwrap();
    let collaborators = Collaborators {
        source: Arc::new(Broken),
        filter: Arc::new(Broken),
        extractor: Arc::new(SimulatedBackend::default()),
    };
    let mut pipeline = Pipeline::new(EngineConfig::new(collaborators, temp.path()));
    pipeline.run_fetch(SearchQuery::new("x")).await.unwrap();

    let err = pipeline.run_filter(FilterCriteria::default()).await.unwrap_err();

    match err {
        PipelineError::Operation(op) => {
            assert_eq!(op.stage, Stage::Filter);
            assert!(op.message.contains("contract violation"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(pipeline.state().filtered_websites().is_empty());
    assert_eq!(pipeline.state().active_stage(), Stage::Filter);
    assert!(!pipeline.state().is_busy());
}

#[tokio::test]
async fn missing_csv_upload_reports_operation_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut pipeline = pipeline(temp.path());

    let missing = temp.path().join("missing.csv");
    let err = pipeline
        .upload_csv(Stage::Email, missing.display().to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Operation(_)));
    assert!(!pipeline.state().can_run(Stage::Email));
    let notes = pipeline.take_notifications();
    assert!(notes[0].message.starts_with("Failed to read missing.csv"));
}
