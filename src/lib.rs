//! Wavecrest desktop shell.
//!
//! Routes OS file-open signals into the player UI, exposes hardware media
//! keys and a tray transport widget, and keeps exactly one instance
//! running. The offline asset service for the web-hosted variant lives in
//! [`offline`] and ships as its own binary.

use tauri::Manager;

pub mod commands;
pub mod config;
pub mod error;
pub mod launch;
pub mod offline;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Files handed over on "open with" at startup.
    let startup_files = launch::args::file_args(std::env::args());

    // The single-instance lock must be the first plugin: a second process
    // relays its argv here and terminates without creating a window.
    #[allow(unused_mut)]
    let mut builder = tauri::Builder::default().plugin(tauri_plugin_single_instance::init(
        |app, argv, _cwd| {
            log::info!("[Launch] second instance relaunch ({} args)", argv.len());
            launch::handle_second_instance(app, argv);
        },
    ));

    #[cfg(desktop)]
    {
        builder = builder.plugin(tauri_plugin_global_shortcut::Builder::new().build());
    }

    let app = builder
        .manage(launch::CoordinatorState::default())
        .invoke_handler(tauri::generate_handler![commands::playback::update_thumbar])
        .on_page_load(|webview, payload| {
            if webview.label() == launch::MAIN_WINDOW
                && matches!(payload.event(), tauri::webview::PageLoadEvent::Finished)
            {
                launch::handle_window_ready(webview.app_handle());
            }
        })
        .setup(move |app| {
            launch::window::create(app.handle())?;

            #[cfg(desktop)]
            {
                launch::transport::init(app.handle())?;
                launch::media_keys::register(app.handle())?;
            }

            if !startup_files.is_empty() {
                launch::handle_files_opened(app.handle(), startup_files);
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| match event {
        // Files dropped on the app icon while running.
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        tauri::RunEvent::Opened { urls } => {
            let paths = urls
                .iter()
                .filter_map(|url| url.to_file_path().ok())
                .map(|path| path.to_string_lossy().into_owned())
                .collect();
            launch::handle_files_opened(app_handle, paths);
        }
        tauri::RunEvent::ExitRequested { code, api, .. } => {
            // macOS convention: closing the last window keeps the app in
            // the dock.
            if cfg!(target_os = "macos") && code.is_none() {
                api.prevent_exit();
            }
        }
        tauri::RunEvent::Exit => {
            #[cfg(desktop)]
            launch::media_keys::teardown(app_handle);
        }
        _ => {}
    });
}
