//! Settings file for the console and batch front ends.
//!
//! Read from `leadgen.ron` in the current working directory unless `--config`
//! says otherwise. Command line flags override file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use leadgen_engine::{
    BackendError, BackendSettings, Collaborators, EngineConfig, HttpBackend, SimulatedBackend,
    SimulatedSettings,
};
use pipeline_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

pub const SETTINGS_FILENAME: &str = "leadgen.ron";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("{path} already exists")]
    AlreadyExists { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendChoice {
    /// Offline deterministic stand-in.
    Simulated {
        latency_ms: u64,
        max_emails_per_site: usize,
    },
    /// Remote lead-gen service.
    Http { base_url: String, timeout_secs: u64 },
}

impl Default for BackendChoice {
    fn default() -> Self {
        BackendChoice::Simulated {
            latency_ms: 750,
            max_emails_per_site: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub backend: BackendChoice,
    pub export_dir: PathBuf,
    pub log: LogTarget,
    pub verbose: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend: BackendChoice::default(),
            export_dir: PathBuf::from("."),
            log: LogTarget::default(),
            verbose: false,
        }
    }
}

impl AppSettings {
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.backend_url {
            let timeout_secs = match &self.backend {
                BackendChoice::Http { timeout_secs, .. } => *timeout_secs,
                BackendChoice::Simulated { .. } => DEFAULT_HTTP_TIMEOUT_SECS,
            };
            self.backend = BackendChoice::Http {
                base_url: base_url.clone(),
                timeout_secs,
            };
        }
        if let Some(dir) = &cli.export_dir {
            self.export_dir = dir.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self.verbose |= cli.verbose;
    }

    pub fn engine_config(&self) -> Result<EngineConfig, BackendError> {
        let collaborators = match &self.backend {
            BackendChoice::Simulated {
                latency_ms,
                max_emails_per_site,
            } => Collaborators::from_backend(SimulatedBackend::new(SimulatedSettings {
                latency: Duration::from_millis(*latency_ms),
                max_emails_per_site: *max_emails_per_site,
            })),
            BackendChoice::Http {
                base_url,
                timeout_secs,
            } => Collaborators::from_backend(HttpBackend::new(BackendSettings {
                base_url: base_url.clone(),
                request_timeout: Duration::from_secs(*timeout_secs),
                ..BackendSettings::default()
            })?),
        };
        Ok(EngineConfig::new(collaborators, self.export_dir.clone()))
    }
}

/// Missing file yields defaults; an unreadable or malformed file is an error.
pub fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppSettings::default()),
        Err(err) => return Err(err.into()),
    };
    Ok(ron::from_str(&content)?)
}

/// Writes default settings to `path`, refusing to overwrite an existing file.
pub fn write_default(path: &Path) -> Result<(), SettingsError> {
    if path.exists() {
        return Err(SettingsError::AlreadyExists {
            path: path.display().to_string(),
        });
    }
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&AppSettings::default(), pretty)?;
    fs::write(path, content)?;
    Ok(())
}
