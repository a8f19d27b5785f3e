//! Central error types for Wavecrest.
//!
//! All errors implement `Serialize` for Tauri IPC compatibility.

use serde::Serialize;
use thiserror::Error;

/// Main error type for Wavecrest operations.
#[derive(Error, Debug)]
pub enum WavecrestError {
    /// Window creation or manipulation failed
    #[error("Window error: {0}")]
    WindowError(String),

    /// Global shortcut registration/teardown failed
    #[error("Shortcut error: {0}")]
    ShortcutError(String),

    /// Cache store I/O failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Upstream fetch failed (connectivity, DNS, malformed URL)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Offline install could not populate a manifest asset
    #[error("Install failed on asset {asset}: {reason}")]
    InstallError { asset: String, reason: String },

    /// Worker lifecycle operation called from the wrong phase
    #[error("Worker phase error: expected {expected}, was {actual}")]
    PhaseError { expected: String, actual: String },

    /// Tauri runtime error
    #[error("Tauri error: {0}")]
    TauriError(#[from] tauri::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Implement Serialize for Tauri IPC compatibility.
/// Tauri requires errors to be serializable to send to the frontend.
impl Serialize for WavecrestError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for WavecrestError {
    fn from(err: reqwest::Error) -> Self {
        WavecrestError::NetworkError(err.to_string())
    }
}

impl From<String> for WavecrestError {
    fn from(msg: String) -> Self {
        WavecrestError::Other(msg)
    }
}

impl From<&str> for WavecrestError {
    fn from(msg: &str) -> Self {
        WavecrestError::Other(msg.to_string())
    }
}

/// Type alias for Results using WavecrestError.
pub type WavecrestResult<T> = Result<T, WavecrestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WavecrestError::WindowError("no main window".to_string());
        assert_eq!(err.to_string(), "Window error: no main window");
    }

    #[test]
    fn test_install_error_display() {
        let err = WavecrestError::InstallError {
            asset: "/css/base.css".to_string(),
            reason: "status 404".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Install failed on asset /css/base.css: status 404"
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = WavecrestError::NetworkError("connection refused".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("connection refused"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WavecrestError = io_err.into();
        assert!(matches!(err, WavecrestError::StorageError(_)));
    }

    #[test]
    fn test_from_string() {
        let err: WavecrestError = "boom".into();
        assert!(matches!(err, WavecrestError::Other(_)));
    }
}
