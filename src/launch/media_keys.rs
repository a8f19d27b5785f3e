//! Global hardware media-key bindings.
//!
//! Registered once after window creation; every press forwards a
//! `media-control` event to the window. Teardown runs on every exit path
//! so OS-level key grabs never leak.

use tauri::AppHandle;
use tauri_plugin_global_shortcut::{Code, GlobalShortcutExt, Modifiers, Shortcut, ShortcutState};

use crate::error::{WavecrestError, WavecrestResult};
use crate::launch::{self, MediaControl};

const MEDIA_KEYS: [(Code, MediaControl); 3] = [
    (Code::MediaPlayPause, MediaControl::PlayPause),
    (Code::MediaTrackNext, MediaControl::Next),
    (Code::MediaTrackPrevious, MediaControl::Prev),
];

fn control_for(shortcut: &Shortcut) -> Option<MediaControl> {
    MEDIA_KEYS
        .iter()
        .find(|(code, _)| shortcut.matches(Modifiers::empty(), code))
        .map(|(_, control)| *control)
}

/// Register the three hardware media keys.
pub fn register(app: &AppHandle) -> WavecrestResult<()> {
    let shortcuts = MEDIA_KEYS.map(|(code, _)| Shortcut::new(None, code));
    app.global_shortcut()
        .on_shortcuts(shortcuts, |app, shortcut, event| {
            if event.state == ShortcutState::Pressed {
                if let Some(control) = control_for(shortcut) {
                    launch::emit_media_control(app, control);
                }
            }
        })
        .map_err(|err| WavecrestError::ShortcutError(err.to_string()))?;
    log::debug!("[MediaKeys] registered {} media keys", MEDIA_KEYS.len());
    Ok(())
}

/// Unregister every global shortcut. Must run on every process-exit path.
pub fn teardown(app: &AppHandle) {
    if let Err(err) = app.global_shortcut().unregister_all() {
        log::warn!("[MediaKeys] teardown failed: {}", err);
    } else {
        log::debug!("[MediaKeys] unregistered all media keys");
    }
}
