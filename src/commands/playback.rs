//! Playback-state commands invoked by the player UI.

use tauri::AppHandle;

/// The UI reports a playback-state change; refresh the transport widget
/// to match.
#[tauri::command]
pub fn update_thumbar(app: AppHandle, is_playing: bool) {
    log::debug!("[Transport] update_thumbar({})", is_playing);
    #[cfg(desktop)]
    crate::launch::transport::update(&app, is_playing);
    #[cfg(not(desktop))]
    let _ = (app, is_playing);
}
