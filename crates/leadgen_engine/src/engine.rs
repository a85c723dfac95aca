use std::sync::{mpsc, Arc};
use std::thread;

use leadgen_core::Effect;
use pipeline_logging::pipeline_warn;

use crate::runner::{execute, EngineConfig};
use crate::EngineEvent;

/// Receives effect completions from the engine worker.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        if self.tx.send(event).is_err() {
            pipeline_warn!("Engine event dropped: receiver gone");
        }
    }
}

/// Owns a worker thread with a tokio runtime that executes submitted effects.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Effect>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("leadgen-engine")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<Effect>();
        let config = Arc::new(config);

        thread::Builder::new()
            .name("leadgen-dispatch".to_string())
            .spawn(move || {
                while let Ok(effect) = cmd_rx.recv() {
                    let config = config.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        let event = execute(effect, &config).await;
                        sink.emit(event);
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    /// Queue an effect; returns false once the worker has shut down.
    pub fn submit(&self, effect: Effect) -> bool {
        self.cmd_tx.send(effect).is_ok()
    }
}
