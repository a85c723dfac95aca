use crate::{EmailRecord, FilterCriteria, OperationError, RequestId, SearchQuery, Stage, WebsiteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked the fetch stage to search for websites.
    FetchRequested(SearchQuery),
    /// User applied filters to the fetched (or uploaded) websites.
    FilterRequested(FilterCriteria),
    /// User asked for emails from the filtered (or uploaded) websites.
    ExtractRequested,
    /// User asked to download the email results.
    ExportRequested,
    /// User picked a CSV file as input for a stage.
    CsvUploadRequested { stage: Stage, path: String },
    /// CSV bridge finished reading an uploaded file.
    CsvImported {
        stage: Stage,
        source_name: String,
        websites: Vec<WebsiteId>,
    },
    /// CSV bridge could not read an uploaded file.
    CsvImportFailed {
        stage: Stage,
        source_name: String,
        message: String,
    },
    /// Website source completed.
    WebsitesFetched {
        request_id: RequestId,
        result: Result<Vec<WebsiteId>, OperationError>,
    },
    /// Website filter completed.
    WebsitesFiltered {
        request_id: RequestId,
        result: Result<Vec<WebsiteId>, OperationError>,
    },
    /// Email extractor completed.
    EmailsExtracted {
        request_id: RequestId,
        result: Result<Vec<EmailRecord>, OperationError>,
    },
    /// Export file written (path) or failed (reason).
    ExportWritten { result: Result<String, String> },
}
