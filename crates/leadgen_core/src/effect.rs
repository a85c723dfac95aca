use crate::{FilterCriteria, RequestId, SearchQuery, Stage, WebsiteId};

/// Work `update` asks the front end to perform; completions come back as `Msg`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchWebsites {
        request_id: RequestId,
        query: SearchQuery,
    },
    FilterWebsites {
        request_id: RequestId,
        websites: Vec<WebsiteId>,
        criteria: FilterCriteria,
    },
    ExtractEmails {
        request_id: RequestId,
        websites: Vec<WebsiteId>,
    },
    ImportCsv { stage: Stage, path: String },
    /// Replace the export file with `contents`.
    WriteExport { contents: String },
}
