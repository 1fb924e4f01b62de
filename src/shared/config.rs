//! Application configuration. Storage location, capture timeout, speech output, reply seed.

use crate::domain::DomainError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// How long one capture waits for input before reporting a timeout.
pub const DEFAULT_CAPTURE_TIMEOUT_SECS: u64 = 5;

/// Directory holding `assistant_data.db` when none is configured.
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory for the SQLite file. Read from ASSISTANT_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Seconds to wait for an utterance. Read from ASSISTANT_CAPTURE_TIMEOUT_SECS.
    #[serde(default)]
    pub capture_timeout_secs: Option<u64>,

    /// External TTS program, called as `<program> <text>`. Read from ASSISTANT_SPEECH_COMMAND.
    #[serde(default)]
    pub speech_command: Option<String>,

    /// Seed for reply selection; unset means fresh randomness. Read from ASSISTANT_RNG_SEED.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Keep records in memory only. Read from ASSISTANT_IN_MEMORY.
    #[serde(default)]
    pub in_memory: Option<bool>,
}

impl AppConfig {
    /// Environment (ASSISTANT_*) plus an optional file named by ASSISTANT_CONFIG.
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("ASSISTANT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("ASSISTANT").try_parsing(true));
        Self::from_builder(c)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, DomainError> {
        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    /// Capture timeout. Zero is treated as unset.
    pub fn capture_timeout_or_default(&self) -> Duration {
        let secs = self
            .capture_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_CAPTURE_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn in_memory_or_default(&self) -> bool {
        self.in_memory.unwrap_or(false)
    }
}
