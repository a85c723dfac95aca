use std::fmt;

use crate::view_model::{PipelineViewModel, StageControls, UploadSummary};
use crate::{EmailRecord, PipelineError, ValidationError, WebsiteId};

/// Correlates a dispatched stage effect with its completion message.
pub type RequestId = u64;

/// Pipeline stages in the order they become actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    Fetch,
    Filter,
    Email,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Fetch, Stage::Filter, Stage::Email];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Filter => "filter",
            Stage::Email => "email",
        }
    }

    /// Only the filter and email stages take a list of websites as input.
    pub fn accepts_upload(self) -> bool {
        !matches!(self, Stage::Fetch)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub stage: Stage,
    pub request_id: RequestId,
}

/// Websites imported from a CSV file for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUpload {
    pub source_name: String,
    pub websites: Vec<WebsiteId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient user-visible message (a toast in a graphical front end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Session state owned by the front end and mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineState {
    fetched_websites: Vec<WebsiteId>,
    filtered_websites: Vec<WebsiteId>,
    email_results: Vec<EmailRecord>,
    active_stage: Stage,
    in_flight: Option<InFlight>,
    filter_upload: Option<CsvUpload>,
    email_upload: Option<CsvUpload>,
    notifications: Vec<Notification>,
    last_error: Option<PipelineError>,
    next_request_id: RequestId,
    dirty: bool,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PipelineViewModel {
        PipelineViewModel {
            active_stage: self.active_stage,
            busy: self.in_flight.map(|in_flight| in_flight.stage),
            controls: StageControls {
                fetch: self.can_run(Stage::Fetch),
                filter: self.can_run(Stage::Filter),
                email: self.can_run(Stage::Email),
            },
            fetched_websites: self.fetched_websites.clone(),
            filtered_websites: self.filtered_websites.clone(),
            email_results: self.email_results.clone(),
            filter_upload: self.filter_upload.as_ref().map(UploadSummary::from),
            email_upload: self.email_upload.as_ref().map(UploadSummary::from),
            dirty: self.dirty,
        }
    }

    pub fn fetched_websites(&self) -> &[WebsiteId] {
        &self.fetched_websites
    }

    pub fn filtered_websites(&self) -> &[WebsiteId] {
        &self.filtered_websites
    }

    pub fn email_results(&self) -> &[EmailRecord] {
        &self.email_results
    }

    pub fn active_stage(&self) -> Stage {
        self.active_stage
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub fn upload(&self, stage: Stage) -> Option<&CsvUpload> {
        match stage {
            Stage::Fetch => None,
            Stage::Filter => self.filter_upload.as_ref(),
            Stage::Email => self.email_upload.as_ref(),
        }
    }

    /// Error recorded by the most recent rejected request or failed operation.
    /// Cleared whenever a new request is accepted.
    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    /// Stage gate: nothing in flight, and the stage is the active one or has
    /// a CSV upload supplying its input.
    pub fn can_run(&self, stage: Stage) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.active_stage == stage || self.upload(stage).is_some()
    }

    /// Drain pending notifications for display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// In-memory list for `stage` when non-empty, else the stage's CSV upload.
    pub(crate) fn stage_input(&self, stage: Stage) -> Result<Vec<WebsiteId>, ValidationError> {
        let in_memory = match stage {
            Stage::Fetch => return Err(ValidationError::NoInput(stage)),
            Stage::Filter => &self.fetched_websites,
            Stage::Email => &self.filtered_websites,
        };
        if !in_memory.is_empty() {
            return Ok(in_memory.clone());
        }
        match self.upload(stage) {
            Some(upload) if !upload.websites.is_empty() => Ok(upload.websites.clone()),
            _ => Err(ValidationError::NoInput(stage)),
        }
    }

    pub(crate) fn begin(&mut self, stage: Stage) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(InFlight { stage, request_id });
        self.last_error = None;
        self.mark_dirty();
        request_id
    }

    /// Clears the in-flight marker if `request_id` is the outstanding `stage` call.
    pub(crate) fn finish(&mut self, stage: Stage, request_id: RequestId) -> bool {
        match self.in_flight {
            Some(in_flight) if in_flight.stage == stage && in_flight.request_id == request_id => {
                self.in_flight = None;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_fetched(&mut self, websites: Vec<WebsiteId>) {
        self.fetched_websites = websites;
        self.advance_to(Stage::Filter);
        self.mark_dirty();
    }

    pub(crate) fn set_filtered(&mut self, websites: Vec<WebsiteId>) {
        self.filtered_websites = websites;
        self.advance_to(Stage::Email);
        self.mark_dirty();
    }

    pub(crate) fn set_email_results(&mut self, results: Vec<EmailRecord>) {
        self.email_results = results;
        self.mark_dirty();
    }

    pub(crate) fn set_upload(&mut self, stage: Stage, upload: CsvUpload) {
        match stage {
            Stage::Fetch => return,
            Stage::Filter => self.filter_upload = Some(upload),
            Stage::Email => self.email_upload = Some(upload),
        }
        self.mark_dirty();
    }

    pub(crate) fn record_error(&mut self, error: PipelineError) {
        self.last_error = Some(error);
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
        self.mark_dirty();
    }

    // Monotonic: a completed stage never moves the pipeline backwards.
    fn advance_to(&mut self, stage: Stage) {
        self.active_stage = self.active_stage.max(stage);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
