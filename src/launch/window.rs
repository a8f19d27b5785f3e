//! Primary window creation.

use tauri::{AppHandle, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::config::WindowConfig;
use crate::error::WavecrestResult;

/// Create the primary player window. Called once at setup; the
/// single-instance lock guarantees no second primary window for the
/// process lifetime.
pub fn create(app: &AppHandle) -> WavecrestResult<WebviewWindow> {
    let config = WindowConfig::default();
    let window = WebviewWindowBuilder::new(app, super::MAIN_WINDOW, WebviewUrl::default())
        .title(config.title.as_str())
        .inner_size(config.width, config.height)
        .build()?;
    log::debug!(
        "[Launch] created window {} ({}x{})",
        super::MAIN_WINDOW,
        config.width,
        config.height
    );
    Ok(window)
}
