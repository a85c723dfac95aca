//! Lead-gen core: pure pipeline state machine, data model and view-model helpers.
mod effect;
mod error;
mod export;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{OperationError, PipelineError, ValidationError};
pub use export::{export_results, EXPORT_FILENAME, EXPORT_HEADER};
pub use model::{
    EmailRecord, FilterCriteria, SearchQuery, WebsiteId, DEFAULT_FETCH_COUNT, MAX_FETCH_COUNT,
};
pub use msg::Msg;
pub use state::{CsvUpload, InFlight, Notification, NotificationLevel, PipelineState, RequestId, Stage};
pub use update::update;
pub use view_model::{PipelineViewModel, StageControls, UploadSummary};
