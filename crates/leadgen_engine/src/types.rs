use std::fmt;
use std::path::PathBuf;

use leadgen_core::{EmailRecord, Msg, OperationError, RequestId, Stage, WebsiteId};

use crate::csv_bridge::CsvImportError;
use crate::persist::PersistError;

/// Completion of one effect, delivered to an `EventSink`.
#[derive(Debug)]
pub enum EngineEvent {
    WebsitesFetched {
        request_id: RequestId,
        result: Result<Vec<WebsiteId>, BackendError>,
    },
    WebsitesFiltered {
        request_id: RequestId,
        result: Result<Vec<WebsiteId>, BackendError>,
    },
    EmailsExtracted {
        request_id: RequestId,
        result: Result<Vec<EmailRecord>, BackendError>,
    },
    CsvImported {
        stage: Stage,
        source_name: String,
        result: Result<Vec<WebsiteId>, CsvImportError>,
    },
    ExportWritten {
        result: Result<PathBuf, PersistError>,
    },
}

impl From<EngineEvent> for Msg {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::WebsitesFetched { request_id, result } => Msg::WebsitesFetched {
                request_id,
                result: result.map_err(|err| err.into_operation(Stage::Fetch)),
            },
            EngineEvent::WebsitesFiltered { request_id, result } => Msg::WebsitesFiltered {
                request_id,
                result: result.map_err(|err| err.into_operation(Stage::Filter)),
            },
            EngineEvent::EmailsExtracted { request_id, result } => Msg::EmailsExtracted {
                request_id,
                result: result.map_err(|err| err.into_operation(Stage::Email)),
            },
            EngineEvent::CsvImported {
                stage,
                source_name,
                result,
            } => match result {
                Ok(websites) => Msg::CsvImported {
                    stage,
                    source_name,
                    websites,
                },
                Err(err) => Msg::CsvImportFailed {
                    stage,
                    source_name,
                    message: err.to_string(),
                },
            },
            EngineEvent::ExportWritten { result } => Msg::ExportWritten {
                result: result
                    .map(|path| path.display().to_string())
                    .map_err(|err| err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn into_operation(self, stage: Stage) -> OperationError {
        OperationError::new(stage, self.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    ContractViolation,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendErrorKind::InvalidUrl => write!(f, "invalid backend url"),
            BackendErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            BackendErrorKind::Timeout => write!(f, "timeout"),
            BackendErrorKind::Network => write!(f, "network error"),
            BackendErrorKind::Decode => write!(f, "malformed response"),
            BackendErrorKind::ContractViolation => write!(f, "contract violation"),
        }
    }
}
