use crate::state::CsvUpload;
use crate::{EmailRecord, Stage, WebsiteId};

/// Which stage actions a front end should offer right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageControls {
    pub fetch: bool,
    pub filter: bool,
    pub email: bool,
}

impl StageControls {
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Fetch => self.fetch,
            Stage::Filter => self.filter,
            Stage::Email => self.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub source_name: String,
    pub website_count: usize,
}

impl From<&CsvUpload> for UploadSummary {
    fn from(upload: &CsvUpload) -> Self {
        Self {
            source_name: upload.source_name.clone(),
            website_count: upload.websites.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineViewModel {
    pub active_stage: Stage,
    pub busy: Option<Stage>,
    pub controls: StageControls,
    pub fetched_websites: Vec<WebsiteId>,
    pub filtered_websites: Vec<WebsiteId>,
    pub email_results: Vec<EmailRecord>,
    pub filter_upload: Option<UploadSummary>,
    pub email_upload: Option<UploadSummary>,
    pub dirty: bool,
}

impl PipelineViewModel {
    pub fn email_count(&self) -> usize {
        self.email_results.iter().map(|record| record.emails.len()).sum()
    }
}
