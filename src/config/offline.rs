//! Offline asset service configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the offline service process. Overridable through the
/// `WAVECREST_*` environment, nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineConfig {
    /// Origin that hosts the player UI and its static assets.
    pub upstream: String,
    /// Local address the interception boundary listens on.
    pub bind: String,
    /// Cache root override; defaults to the per-user cache directory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            upstream: "http://127.0.0.1:8080".to_string(),
            bind: "127.0.0.1:4680".to_string(),
            cache_dir: None,
        }
    }
}

impl OfflineConfig {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upstream: std::env::var("WAVECREST_UPSTREAM").unwrap_or(defaults.upstream),
            bind: std::env::var("WAVECREST_BIND").unwrap_or(defaults.bind),
            cache_dir: std::env::var("WAVECREST_CACHE_DIR")
                .ok()
                .map(PathBuf::from),
        }
    }

    /// Resolved cache root for this configuration.
    pub fn cache_root(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wavecrest")
                .join("offline"),
        }
    }
}
