use std::path::PathBuf;

use leadgen_core::{
    export_results, update, Effect, EmailRecord, FilterCriteria, Msg, Notification, OperationError,
    PipelineError, PipelineState, SearchQuery, Stage, WebsiteId,
};

use crate::runner::{execute, EngineConfig};
use crate::EngineEvent;

/// Awaitable front end over the pure state machine.
///
/// Each call feeds the request through `update`, runs the resulting effect
/// inline and feeds the completion back. `&mut self` keeps at most one stage
/// operation in flight.
pub struct Pipeline {
    state: PipelineState,
    config: EngineConfig,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: PipelineState::new(),
            config,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.state.take_notifications()
    }

    pub async fn run_fetch(&mut self, query: SearchQuery) -> Result<Vec<WebsiteId>, PipelineError> {
        self.run_stage(Msg::FetchRequested(query)).await?;
        Ok(self.state.fetched_websites().to_vec())
    }

    pub async fn run_filter(
        &mut self,
        criteria: FilterCriteria,
    ) -> Result<Vec<WebsiteId>, PipelineError> {
        self.run_stage(Msg::FilterRequested(criteria)).await?;
        Ok(self.state.filtered_websites().to_vec())
    }

    pub async fn run_extract(&mut self) -> Result<Vec<EmailRecord>, PipelineError> {
        self.run_stage(Msg::ExtractRequested).await?;
        Ok(self.state.email_results().to_vec())
    }

    /// Imports a CSV file as input for `stage`; returns the number of websites read.
    pub async fn upload_csv(
        &mut self,
        stage: Stage,
        path: impl Into<String>,
    ) -> Result<usize, PipelineError> {
        let msg = Msg::CsvUploadRequested {
            stage,
            path: path.into(),
        };
        let mut outcome: Option<Result<usize, PipelineError>> = None;
        for effect in self.dispatch(msg) {
            let event = execute(effect, &self.config).await;
            outcome = Some(match &event {
                EngineEvent::CsvImported { result: Ok(sites), .. } => Ok(sites.len()),
                EngineEvent::CsvImported { result: Err(err), .. } => {
                    Err(OperationError::new(stage, err.to_string()).into())
                }
                other => Err(OperationError::new(stage, format!("unexpected event {other:?}")).into()),
            });
            self.dispatch(event.into());
        }
        outcome.unwrap_or_else(|| Err(self.rejection()))
    }

    /// Current results as CSV text.
    pub fn export_results(&self) -> String {
        export_results(self.state.email_results())
    }

    /// Writes the export file into the configured directory.
    pub async fn save_export(&mut self) -> Result<PathBuf, PipelineError> {
        let mut outcome: Option<Result<PathBuf, PipelineError>> = None;
        for effect in self.dispatch(Msg::ExportRequested) {
            let event = execute(effect, &self.config).await;
            outcome = Some(match &event {
                EngineEvent::ExportWritten { result: Ok(path) } => Ok(path.clone()),
                EngineEvent::ExportWritten { result: Err(err) } => {
                    Err(OperationError::new(Stage::Email, err.to_string()).into())
                }
                other => {
                    Err(OperationError::new(Stage::Email, format!("unexpected event {other:?}"))
                        .into())
                }
            });
            self.dispatch(event.into());
        }
        outcome.unwrap_or_else(|| Err(self.rejection()))
    }

    async fn run_stage(&mut self, msg: Msg) -> Result<(), PipelineError> {
        let effects = self.dispatch(msg);
        if effects.is_empty() {
            return Err(self.rejection());
        }
        for effect in effects {
            let event = execute(effect, &self.config).await;
            self.dispatch(event.into());
        }
        match self.state.last_error() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    fn rejection(&self) -> PipelineError {
        self.state.last_error().cloned().unwrap_or_else(|| {
            PipelineError::Operation(OperationError::new(
                self.state.active_stage(),
                "request produced no work",
            ))
        })
    }
}
