use std::path::{Path, PathBuf};

use leadgen_core::Effect;
use pipeline_logging::{pipeline_info, pipeline_warn};

use crate::contract::{ensure_one_record_per_site, ensure_subsequence};
use crate::csv_bridge::{import_websites, source_name};
use crate::persist::write_export;
use crate::{Collaborators, EngineEvent, SimulatedBackend};

/// Everything needed to execute effects.
#[derive(Clone)]
pub struct EngineConfig {
    pub collaborators: Collaborators,
    pub export_dir: PathBuf,
}

impl EngineConfig {
    pub fn new(collaborators: Collaborators, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            collaborators,
            export_dir: export_dir.into(),
        }
    }

    /// Offline configuration backed by `SimulatedBackend` defaults.
    pub fn simulated_with_output(export_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Collaborators::from_backend(SimulatedBackend::default()),
            export_dir,
        )
    }
}

/// Runs one effect to completion and reports the outcome.
pub async fn execute(effect: Effect, config: &EngineConfig) -> EngineEvent {
    match effect {
        Effect::FetchWebsites { request_id, query } => {
            pipeline_info!(
                "Fetch request_id={} keyword={:?} country={:?} locality={:?} count={}",
                request_id,
                query.keyword,
                query.country,
                query.locality,
                query.count
            );
            let result = config.collaborators.source.fetch(&query).await;
            log_outcome("fetch", request_id, result.as_ref().map(Vec::len));
            EngineEvent::WebsitesFetched { request_id, result }
        }
        Effect::FilterWebsites {
            request_id,
            websites,
            criteria,
        } => {
            pipeline_info!(
                "Filter request_id={} websites={} criteria={:?}",
                request_id,
                websites.len(),
                criteria
            );
            let result = config
                .collaborators
                .filter
                .filter(&websites, &criteria)
                .await
                .and_then(|output| ensure_subsequence(&websites, output));
            log_outcome("filter", request_id, result.as_ref().map(Vec::len));
            EngineEvent::WebsitesFiltered { request_id, result }
        }
        Effect::ExtractEmails {
            request_id,
            websites,
        } => {
            pipeline_info!(
                "Extract request_id={} websites={}",
                request_id,
                websites.len()
            );
            let result = config
                .collaborators
                .extractor
                .extract(&websites)
                .await
                .and_then(|output| ensure_one_record_per_site(&websites, output));
            log_outcome("extract", request_id, result.as_ref().map(Vec::len));
            EngineEvent::EmailsExtracted { request_id, result }
        }
        Effect::ImportCsv { stage, path } => {
            let path = Path::new(&path);
            let result = import_websites(path);
            if let Err(err) = &result {
                pipeline_warn!("CSV import for {} stage from {:?} failed: {}", stage, path, err);
            }
            EngineEvent::CsvImported {
                stage,
                source_name: source_name(path),
                result,
            }
        }
        Effect::WriteExport { contents } => {
            let result = write_export(&config.export_dir, &contents);
            match &result {
                Ok(path) => pipeline_info!("Export written to {:?}", path),
                Err(err) => pipeline_warn!("Export failed: {}", err),
            }
            EngineEvent::ExportWritten { result }
        }
    }
}

fn log_outcome<E: std::fmt::Display>(operation: &str, request_id: u64, outcome: Result<usize, &E>) {
    match outcome {
        Ok(count) => pipeline_info!("{} request_id={} done, {} items", operation, request_id, count),
        Err(err) => pipeline_warn!("{} request_id={} failed: {}", operation, request_id, err),
    }
}
