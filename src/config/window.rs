//! Display configuration for the primary window.

use serde::{Deserialize, Serialize};

/// Geometry and chrome of the primary player window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Wavecrest".to_string(),
            width: 1200.0,
            height: 800.0,
        }
    }
}
