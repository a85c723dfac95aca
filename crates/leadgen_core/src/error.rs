use thiserror::Error;

use crate::Stage;

/// Required input is missing; the request never reaches a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an industry keyword")]
    EmptyKeyword,
    #[error("count must be between 1 and {max}, got {actual}")]
    InvalidCount { actual: u32, max: u32 },
    #[error("no websites to process for the {0} stage; run the previous stage or upload a CSV file")]
    NoInput(Stage),
    #[error("no email results to export")]
    NoResults,
    #[error("the {0} stage is not available right now")]
    StageLocked(Stage),
    #[error("the {0} stage does not accept CSV uploads")]
    UploadNotSupported(Stage),
}

/// A collaborator call failed or returned something the contract forbids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} stage failed: {message}")]
pub struct OperationError {
    pub stage: Stage,
    pub message: String,
}

impl OperationError {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}
