//! Lead-gen engine: stage collaborators, CSV bridge and effect execution.
mod collaborators;
mod contract;
mod csv_bridge;
mod engine;
mod http;
mod persist;
mod pipeline;
mod runner;
mod simulated;
mod types;

pub use collaborators::{Collaborators, EmailExtractor, WebsiteFilter, WebsiteSource};
pub use contract::{ensure_one_record_per_site, ensure_subsequence};
pub use csv_bridge::{import_websites, read_websites, source_name, CsvImportError};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use http::{BackendSettings, HttpBackend};
pub use persist::{write_export, PersistError};
pub use pipeline::Pipeline;
pub use runner::{execute, EngineConfig};
pub use simulated::{SimulatedBackend, SimulatedSettings, MAILBOXES};
pub use types::{BackendError, BackendErrorKind, EngineEvent};
