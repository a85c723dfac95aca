use leadgen_core::{
    update, Effect, FilterCriteria, Msg, PipelineError, PipelineState, Stage, ValidationError,
};

fn upload(state: PipelineState, stage: Stage, websites: &[&str]) -> PipelineState {
    let (state, effects) = update(
        state,
        Msg::CsvUploadRequested {
            stage,
            path: "leads.csv".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ImportCsv {
            stage,
            path: "leads.csv".to_string(),
        }]
    );
    let (state, _) = update(
        state,
        Msg::CsvImported {
            stage,
            source_name: "leads.csv".to_string(),
            websites: websites.iter().map(|s| s.to_string()).collect(),
        },
    );
    state
}

#[test]
fn upload_bypasses_stage_gate() {
    let state = PipelineState::new();
    assert!(!state.can_run(Stage::Filter));

    let mut state = upload(state, Stage::Filter, &["x.com", "y.com"]);
    assert!(state.can_run(Stage::Filter));
    assert_eq!(state.active_stage(), Stage::Fetch);

    let notes = state.take_notifications();
    assert_eq!(notes[0].title, "CSV Uploaded");
    assert_eq!(notes[0].message, "leads.csv uploaded successfully. Ready to filter.");

    let (state, effects) = update(state, Msg::FilterRequested(FilterCriteria::default()));
    assert!(matches!(
        effects.as_slice(),
        [Effect::FilterWebsites { websites, .. }] if websites == &["x.com".to_string(), "y.com".to_string()]
    ));
    assert_eq!(state.in_flight().map(|f| f.stage), Some(Stage::Filter));
}

#[test]
fn in_memory_sites_take_precedence_over_upload() {
    let (state, effects) = update(
        PipelineState::new(),
        Msg::FetchRequested(leadgen_core::SearchQuery::new("bakery")),
    );
    let request_id = match &effects[0] {
        Effect::FetchWebsites { request_id, .. } => *request_id,
        other => panic!("unexpected effect {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::WebsitesFetched {
            request_id,
            result: Ok(vec!["fetched.com".to_string()]),
        },
    );
    let state = upload(state, Stage::Filter, &["uploaded.com"]);

    let (_state, effects) = update(state, Msg::FilterRequested(FilterCriteria::default()));
    assert!(matches!(
        effects.as_slice(),
        [Effect::FilterWebsites { websites, .. }] if websites == &["fetched.com".to_string()]
    ));
}

#[test]
fn email_upload_enables_extraction_from_a_fresh_session() {
    let mut state = upload(PipelineState::new(), Stage::Email, &["a.com", "a.com"]);
    assert_eq!(state.take_notifications()[0].title, "File uploaded");

    let (state, effects) = update(state, Msg::ExtractRequested);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ExtractEmails { websites, .. }] if websites.len() == 2
    ));
    assert!(state.is_busy());
}

#[test]
fn empty_upload_still_fails_validation() {
    let state = upload(PipelineState::new(), Stage::Email, &[]);

    let (state, effects) = update(state, Msg::ExtractRequested);
    assert!(effects.is_empty());
    assert_eq!(
        state.last_error(),
        Some(&PipelineError::Validation(ValidationError::NoInput(Stage::Email)))
    );
}

#[test]
fn fetch_stage_refuses_uploads() {
    let (state, effects) = update(
        PipelineState::new(),
        Msg::CsvUploadRequested {
            stage: Stage::Fetch,
            path: "x.csv".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.last_error(),
        Some(&PipelineError::Validation(ValidationError::UploadNotSupported(Stage::Fetch)))
    );
}

#[test]
fn failed_import_leaves_gate_closed() {
    let (mut state, _) = update(
        PipelineState::new(),
        Msg::CsvImportFailed {
            stage: Stage::Filter,
            source_name: "broken.csv".to_string(),
            message: "no such file".to_string(),
        },
    );
    assert!(!state.can_run(Stage::Filter));
    assert_eq!(
        state.take_notifications()[0].message,
        "Failed to read broken.csv: no such file"
    );
}
