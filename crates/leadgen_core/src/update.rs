use crate::state::{CsvUpload, Notification};
use crate::{
    export_results, Effect, Msg, OperationError, PipelineError, PipelineState, SearchQuery, Stage,
    ValidationError, MAX_FETCH_COUNT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PipelineState, msg: Msg) -> (PipelineState, Vec<Effect>) {
    let effects = match msg {
        Msg::FetchRequested(query) => match request_fetch(&mut state, query) {
            Ok(effect) => vec![effect],
            Err(err) => reject(&mut state, err),
        },
        Msg::FilterRequested(criteria) => {
            match guard(&state, Stage::Filter).and_then(|()| state.stage_input(Stage::Filter)) {
                Ok(websites) => {
                    let request_id = state.begin(Stage::Filter);
                    vec![Effect::FilterWebsites {
                        request_id,
                        websites,
                        criteria,
                    }]
                }
                Err(err) => reject(&mut state, err),
            }
        }
        Msg::ExtractRequested => {
            match guard(&state, Stage::Email).and_then(|()| state.stage_input(Stage::Email)) {
                Ok(websites) => {
                    let request_id = state.begin(Stage::Email);
                    vec![Effect::ExtractEmails {
                        request_id,
                        websites,
                    }]
                }
                Err(err) => reject(&mut state, err),
            }
        }
        Msg::ExportRequested => {
            if state.email_results().is_empty() {
                reject(&mut state, ValidationError::NoResults)
            } else {
                state.clear_error();
                vec![Effect::WriteExport {
                    contents: export_results(state.email_results()),
                }]
            }
        }
        Msg::CsvUploadRequested { stage, path } => {
            if stage.accepts_upload() {
                vec![Effect::ImportCsv { stage, path }]
            } else {
                reject(&mut state, ValidationError::UploadNotSupported(stage))
            }
        }
        Msg::CsvImported {
            stage,
            source_name,
            websites,
        } => {
            if stage.accepts_upload() {
                let notification = match stage {
                    Stage::Filter => Notification::info(
                        "CSV Uploaded",
                        format!("{source_name} uploaded successfully. Ready to filter."),
                    ),
                    _ => Notification::info(
                        "File uploaded",
                        format!("{source_name} is ready for processing."),
                    ),
                };
                state.set_upload(
                    stage,
                    CsvUpload {
                        source_name,
                        websites,
                    },
                );
                state.notify(notification);
            }
            Vec::new()
        }
        Msg::CsvImportFailed {
            source_name,
            message,
            ..
        } => {
            state.notify(Notification::error(
                "Error",
                format!("Failed to read {source_name}: {message}"),
            ));
            Vec::new()
        }
        Msg::WebsitesFetched { request_id, result } => {
            if state.finish(Stage::Fetch, request_id) {
                match result {
                    Ok(websites) => {
                        let count = websites.len();
                        state.set_fetched(websites);
                        state.notify(Notification::info(
                            "Websites fetched successfully",
                            format!("Found {count} websites matching your criteria."),
                        ));
                    }
                    Err(err) => fail(&mut state, err, "Failed to fetch websites."),
                }
            }
            Vec::new()
        }
        Msg::WebsitesFiltered { request_id, result } => {
            if state.finish(Stage::Filter, request_id) {
                match result {
                    Ok(websites) => {
                        let count = websites.len();
                        state.set_filtered(websites);
                        state.notify(Notification::info(
                            "Websites filtered successfully",
                            format!("{count} websites remain after filtering."),
                        ));
                    }
                    Err(err) => fail(&mut state, err, "Failed to filter websites."),
                }
            }
            Vec::new()
        }
        Msg::EmailsExtracted { request_id, result } => {
            if state.finish(Stage::Email, request_id) {
                match result {
                    Ok(results) => {
                        let count = results.len();
                        state.set_email_results(results);
                        state.notify(Notification::info(
                            "Email extraction complete",
                            format!("Extracted emails from {count} websites."),
                        ));
                    }
                    Err(err) => fail(&mut state, err, "Failed to extract emails."),
                }
            }
            Vec::new()
        }
        Msg::ExportWritten { result } => {
            match result {
                Ok(path) => state.notify(Notification::info(
                    "Export complete",
                    format!("Results saved to {path}."),
                )),
                Err(reason) => state.notify(Notification::error(
                    "Error",
                    format!("Failed to export results: {reason}"),
                )),
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn request_fetch(state: &mut PipelineState, query: SearchQuery) -> Result<Effect, ValidationError> {
    guard(state, Stage::Fetch)?;
    let query = query.normalized();
    if query.keyword.is_empty() {
        return Err(ValidationError::EmptyKeyword);
    }
    if query.count == 0 || query.count > MAX_FETCH_COUNT {
        return Err(ValidationError::InvalidCount {
            actual: query.count,
            max: MAX_FETCH_COUNT,
        });
    }
    let request_id = state.begin(Stage::Fetch);
    Ok(Effect::FetchWebsites { request_id, query })
}

fn guard(state: &PipelineState, stage: Stage) -> Result<(), ValidationError> {
    if state.can_run(stage) {
        Ok(())
    } else {
        Err(ValidationError::StageLocked(stage))
    }
}

fn reject(state: &mut PipelineState, err: ValidationError) -> Vec<Effect> {
    state.notify(Notification::error("Error", err.to_string()));
    state.record_error(err.into());
    Vec::new()
}

fn fail(state: &mut PipelineState, err: OperationError, summary: &str) {
    state.notify(Notification::error(
        "Error",
        format!("{summary} Please try again. ({})", err.message),
    ));
    state.record_error(PipelineError::Operation(err));
}
