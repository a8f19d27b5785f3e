//! Tray transport widget: previous / play-or-pause / next.
//!
//! The menu is rebuilt on every playback-state change so tooltips and
//! icons track `is_playing`; item activation forwards the matching
//! `media-control` event to the window.

use parking_lot::Mutex;
use tauri::{
    image::Image,
    menu::{IconMenuItem, Menu},
    tray::{TrayIcon, TrayIconBuilder},
    AppHandle, Manager, Wry,
};

use crate::error::WavecrestResult;
use crate::launch::{self, MediaControl};

const PREV_ID: &str = "transport-prev";
const TOGGLE_ID: &str = "transport-toggle";
const NEXT_ID: &str = "transport-next";

/// Holds the tray icon so later updates can swap its menu.
pub struct TransportState {
    tray: TrayIcon<Wry>,
}

/// Button texts for one playback state.
#[derive(Debug, PartialEq, Eq)]
struct TransportLabels {
    prev: &'static str,
    toggle: &'static str,
    next: &'static str,
}

impl TransportLabels {
    fn for_playing(is_playing: bool) -> Self {
        Self {
            prev: "Previous Track",
            toggle: if is_playing { "Pause" } else { "Play" },
            next: "Next Track",
        }
    }
}

fn tooltip_for(is_playing: bool) -> &'static str {
    if is_playing {
        "Wavecrest - Playing"
    } else {
        "Wavecrest - Paused"
    }
}

/// Build the transport widget in its initial paused state and register it
/// with the app.
pub fn init(app: &AppHandle) -> WavecrestResult<()> {
    let menu = build_menu(app, false)?;
    let icon = Image::from_bytes(include_bytes!("../../icons/32x32.png"))?;

    let tray = TrayIconBuilder::new()
        .icon(icon)
        .menu(&menu)
        .tooltip(tooltip_for(false))
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match event.id.as_ref() {
            PREV_ID => launch::emit_media_control(app, MediaControl::Prev),
            TOGGLE_ID => launch::emit_media_control(app, MediaControl::PlayPause),
            NEXT_ID => launch::emit_media_control(app, MediaControl::Next),
            _ => {}
        })
        .on_tray_icon_event(|tray, event| {
            if let tauri::tray::TrayIconEvent::Click {
                button: tauri::tray::MouseButton::Left,
                button_state: tauri::tray::MouseButtonState::Up,
                ..
            } = event
            {
                let app = tray.app_handle();
                if let Some(window) = app.get_webview_window(launch::MAIN_WINDOW) {
                    let _ = window.show();
                    let _ = window.set_focus();
                }
            }
        })
        .build(app)?;

    app.manage(Mutex::new(TransportState { tray }));
    log::debug!("[Transport] widget initialized (paused)");
    Ok(())
}

/// Rebuild the widget for the given playback state. Safe to call before
/// [`init`] has run; it is a no-op then.
pub fn update(app: &AppHandle, is_playing: bool) {
    let Some(state) = app.try_state::<Mutex<TransportState>>() else {
        log::debug!("[Transport] update before init; ignoring");
        return;
    };

    match build_menu(app, is_playing) {
        Ok(menu) => {
            let state = state.lock();
            if let Err(err) = state.tray.set_menu(Some(menu)) {
                log::error!("[Transport] menu rebuild failed: {}", err);
            }
            let _ = state.tray.set_tooltip(Some(tooltip_for(is_playing)));
        }
        Err(err) => log::error!("[Transport] menu build failed: {}", err),
    }
}

fn build_menu(app: &AppHandle, is_playing: bool) -> WavecrestResult<Menu<Wry>> {
    let labels = TransportLabels::for_playing(is_playing);

    let prev_icon = Image::from_bytes(include_bytes!("../../icons/prev.png"))?;
    let toggle_icon = if is_playing {
        Image::from_bytes(include_bytes!("../../icons/pause.png"))?
    } else {
        Image::from_bytes(include_bytes!("../../icons/play.png"))?
    };
    let next_icon = Image::from_bytes(include_bytes!("../../icons/next.png"))?;

    let prev = IconMenuItem::with_id(app, PREV_ID, labels.prev, true, Some(prev_icon), None::<&str>)?;
    let toggle = IconMenuItem::with_id(
        app,
        TOGGLE_ID,
        labels.toggle,
        true,
        Some(toggle_icon),
        None::<&str>,
    )?;
    let next = IconMenuItem::with_id(app, NEXT_ID, labels.next, true, Some(next_icon), None::<&str>)?;

    let menu = Menu::with_items(app, &[&prev, &toggle, &next])?;
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_label_tracks_playback_state() {
        let paused = TransportLabels::for_playing(false);
        assert_eq!(paused.toggle, "Play");

        let playing = TransportLabels::for_playing(true);
        assert_eq!(playing.toggle, "Pause");

        // Outer buttons are state-independent.
        assert_eq!(paused.prev, playing.prev);
        assert_eq!(paused.next, playing.next);
    }

    #[test]
    fn test_tooltip_tracks_playback_state() {
        assert_eq!(tooltip_for(true), "Wavecrest - Playing");
        assert_eq!(tooltip_for(false), "Wavecrest - Paused");
    }
}
