//! Runtime configuration loaded from the process environment.
//!
//! The binary layers command line overrides on top of this snapshot.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Remote location the classifier artifact is fetched from when it is not cached locally.
pub const DEFAULT_MODEL_URL: &str =
    "https://drive.google.com/uc?id=1rVbvV7R-aHT8ScnuV0QRWwegwma-XZ5h";

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug)]
pub struct AppCfg {
    pub data_root: PathBuf,
    pub model_file: String,
    pub features_file: String,
    pub model_url: String,
    pub fetch_timeout_secs: u64,
    pub bind: String,
    pub log_level: String,
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup. `load` passes the environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            data_root: PathBuf::from(env_or("RISKDASH_DATA_ROOT", "./data")),
            model_file: env_or("RISKDASH_MODEL_FILE", "model.json"),
            features_file: env_or("RISKDASH_FEATURES_FILE", "features.json"),
            model_url: env_or("RISKDASH_MODEL_URL", DEFAULT_MODEL_URL),
            fetch_timeout_secs: env_or("RISKDASH_FETCH_TIMEOUT_SECS", "120")
                .parse()
                .unwrap_or(120),
            bind: env_or("RISKDASH_BIND", "127.0.0.1:8501"),
            log_level: env_or("RISKDASH_LOG", "info"),
        }
    }

    /// Location of the cached model artifact.
    pub fn model_path(&self) -> PathBuf {
        self.data_root.join(&self.model_file)
    }

    /// Location of the feature-list artifact.
    pub fn features_path(&self) -> PathBuf {
        self.data_root.join(&self.features_file)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for AppCfg {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
