use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DelegatorError, Result};

/// Main configuration struct for the delegator
///
/// This structure holds all settings the delegation cycle needs: the
/// task-source endpoint, the locations of the two local stores, the
/// request timeout, the capability-match acceptance threshold, and the
/// per-cycle task cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegatorConfig {
    /// Base URL of the Nervix task-source API
    pub api_url: String,
    /// Path to the fleet status snapshot (shared with the health reporter)
    pub fleet_file: PathBuf,
    /// Path to the assignment history log (owned by this tool)
    pub assignments_file: PathBuf,
    /// Timeout applied to every remote call, in seconds
    pub request_timeout_secs: u64,
    /// Minimum match score a candidate agent must strictly exceed
    pub match_threshold: f64,
    /// Maximum number of tasks considered per delegation cycle
    pub max_tasks_per_cycle: usize,
}

impl DelegatorConfig {
    /// Creates a configuration pointing at the given API endpoint, with
    /// default store locations and limits
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from the default config file location
    ///
    /// If the config file doesn't exist, returns the default configuration.
    /// The config file is expected to be in TOML format.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DelegatorError::Config("Could not find config directory".into()))?;
        let config_path = config_dir.join("nervix-delegator").join("delegator.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| DelegatorError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| DelegatorError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Returns the remote-call timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates the configuration values before a cycle runs
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(DelegatorError::Config("api_url is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(DelegatorError::Config(format!(
                "match_threshold {} outside [0.0, 1.0]",
                self.match_threshold
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(DelegatorError::Config("request_timeout_secs is zero".into()));
        }
        Ok(())
    }
}

impl Default for DelegatorConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001/v1".to_string(),
            fleet_file: PathBuf::from("fleet_status.json"),
            assignments_file: PathBuf::from("task_assignments.json"),
            request_timeout_secs: 5,
            match_threshold: 0.3,
            max_tasks_per_cycle: 10,
        }
    }
}
