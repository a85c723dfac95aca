use std::sync::{mpsc, Arc};

use leadgen_core::{Effect, Msg};
use leadgen_engine::{EngineConfig, EngineEvent, EngineHandle, EventSink};
use pipeline_logging::{pipeline_debug, pipeline_warn};

use super::app::ConsoleEvent;

/// Forwards effects to the engine worker; completions come back as `ConsoleEvent::Engine`.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, tx: mpsc::Sender<ConsoleEvent>) -> std::io::Result<Self> {
        let engine = EngineHandle::new(config, Arc::new(ConsoleSink { tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            log_effect(&effect);
            if !self.engine.submit(effect) {
                pipeline_warn!("Engine worker stopped; effect dropped");
            }
        }
    }
}

fn log_effect(effect: &Effect) {
    match effect {
        Effect::FetchWebsites { request_id, query } => pipeline_debug!(
            "FetchWebsites request_id={} keyword={:?} count={}",
            request_id,
            query.keyword,
            query.count
        ),
        Effect::FilterWebsites {
            request_id,
            websites,
            ..
        } => pipeline_debug!(
            "FilterWebsites request_id={} websites={}",
            request_id,
            websites.len()
        ),
        Effect::ExtractEmails {
            request_id,
            websites,
        } => pipeline_debug!(
            "ExtractEmails request_id={} websites={}",
            request_id,
            websites.len()
        ),
        Effect::ImportCsv { stage, path } => {
            pipeline_debug!("ImportCsv stage={} path={}", stage, path)
        }
        Effect::WriteExport { contents } => {
            pipeline_debug!("WriteExport bytes={}", contents.len())
        }
    }
}

struct ConsoleSink {
    tx: mpsc::Sender<ConsoleEvent>,
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: EngineEvent) {
        let msg: Msg = event.into();
        if self.tx.send(ConsoleEvent::Engine(msg)).is_err() {
            pipeline_warn!("Console closed before engine completion arrived");
        }
    }
}
