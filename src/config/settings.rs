//! Settings structures for InkInSpot configuration

use crate::search::TimeoutPolicy;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub stores: StoreSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (INKINSPOT_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("INKINSPOT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("INKINSPOT_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("INKINSPOT_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.search.request_timeout_ms = ms;
            }
        }
        if let Some(val) = var("INKINSPOT_VECTOR_STORE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.search.vector_store_timeout_ms = ms;
            }
        }
        if let Some(val) = var("INKINSPOT_IMAGE_STORE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.search.image_store_timeout_ms = ms;
            }
        }
        if let Some(val) = var("INKINSPOT_SEED_PATH") {
            self.stores.seed_path = Some(PathBuf::from(val));
        }
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        let timeouts = [
            ("search.request_timeout_ms", self.search.request_timeout_ms),
            ("search.vector_store_timeout_ms", self.search.vector_store_timeout_ms),
            ("search.image_store_timeout_ms", self.search.image_store_timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                bail!("{} must be greater than zero", name);
            }
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Search time budgets, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Overall budget for one /search request
    pub request_timeout_ms: u64,
    /// Ceiling for the vector store call
    pub vector_store_timeout_ms: u64,
    /// Ceiling for the image store call
    pub image_store_timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            request_timeout_ms: 300,
            vector_store_timeout_ms: 200,
            image_store_timeout_ms: 200,
        }
    }
}

impl SearchSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn timeout_policy(&self) -> TimeoutPolicy {
        TimeoutPolicy {
            vector_store: Duration::from_millis(self.vector_store_timeout_ms),
            image_store: Duration::from_millis(self.image_store_timeout_ms),
        }
    }
}

/// Store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// YAML file with the tattoos to load into the in-memory stores
    pub seed_path: Option<PathBuf>,
}
