//! Launch coordination and platform integration.
//!
//! - `coordinator`: pure signal/effect decision core
//! - `args`: startup and relaunch argument filtering
//! - `window`: primary window creation
//! - `media_keys`: global hardware media-key bindings
//! - `transport`: tray transport widget (previous / play-pause / next)

use parking_lot::Mutex;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};

pub mod args;
pub mod coordinator;
pub mod window;

#[cfg(desktop)]
pub mod media_keys;
#[cfg(desktop)]
pub mod transport;

pub use coordinator::{LaunchCoordinator, LaunchEffect, LaunchSignal};

/// Label of the single primary window.
pub const MAIN_WINDOW: &str = "main";

/// Push channel carrying ordered file-path batches to the UI.
pub const OPEN_FILES_EVENT: &str = "open-files";

/// Push channel carrying transport control events to the UI.
pub const MEDIA_CONTROL_EVENT: &str = "media-control";

/// One transport control, as carried on the `media-control` channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaControl {
    PlayPause,
    Next,
    Prev,
}

/// Coordinator state managed by the Tauri app; every OS callback funnels
/// through [`dispatch`], so the state is only ever touched one handler at
/// a time.
#[derive(Default)]
pub struct CoordinatorState(Mutex<LaunchCoordinator>);

impl CoordinatorState {
    fn lock(&self) -> parking_lot::MutexGuard<'_, LaunchCoordinator> {
        self.0.lock()
    }
}

/// Reduce one signal against the managed coordinator state and perform the
/// resulting effects.
pub fn dispatch(app: &AppHandle, signal: LaunchSignal) {
    let effects = app.state::<CoordinatorState>().lock().handle(signal);
    apply_effects(app, effects);
}

/// Startup argv or an OS open-file event produced file paths.
pub fn handle_files_opened(app: &AppHandle, paths: Vec<String>) {
    dispatch(app, LaunchSignal::FilesOpened { paths });
}

/// A second instance relayed its argv before terminating.
pub fn handle_second_instance(app: &AppHandle, argv: Vec<String>) {
    let paths = args::file_args(argv);
    dispatch(app, LaunchSignal::SecondInstance { paths });
}

/// The primary window finished loading its page.
pub fn handle_window_ready(app: &AppHandle) {
    log::debug!("[Launch] window ready");
    dispatch(app, LaunchSignal::WindowReady);
}

fn apply_effects(app: &AppHandle, effects: Vec<LaunchEffect>) {
    for effect in effects {
        match effect {
            LaunchEffect::DeliverFiles(paths) => {
                log::info!("[Launch] delivering {} file(s) to the UI", paths.len());
                match app.get_webview_window(MAIN_WINDOW) {
                    Some(window) => {
                        if let Err(err) = window.emit(OPEN_FILES_EVENT, &paths) {
                            log::error!("[Launch] open-files delivery failed: {}", err);
                        }
                    }
                    None => log::warn!("[Launch] no window to deliver files to"),
                }
            }
            LaunchEffect::FocusWindow => {
                if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
                    if window.is_minimized().unwrap_or(false) {
                        let _ = window.unminimize();
                    }
                    let _ = window.set_focus();
                }
            }
        }
    }
}

/// Forward a transport control to the UI over the `media-control` channel.
pub fn emit_media_control(app: &AppHandle, control: MediaControl) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        if let Err(err) = window.emit(MEDIA_CONTROL_EVENT, control) {
            log::error!("[Launch] media-control emit failed: {}", err);
        }
    }
}
