use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, exit_events, logging, main_window, startup_task,
    BackendState, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    logging::init_logger();
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::desktop_log_path().display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _args, _cwd| {
            append_desktop_log("second launch detected; focusing existing window");
            main_window::focus_main_window(app_handle, append_desktop_log);
        }))
        .manage(BackendState::default())
        .on_window_event(|window, event| {
            if is_main_window_destroyed(window.label(), event) {
                exit_events::handle_main_window_destroyed(window.app_handle());
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();

            if let Err(error) = startup_task::launch_backend(&app_handle, append_startup_log) {
                show_startup_error(&app_handle, &error);
                return Ok(());
            }

            if let Err(error) = main_window::create_main_window(&app_handle) {
                show_startup_error(&app_handle, &error);
                return Ok(());
            }

            startup_task::spawn_readiness_task(app_handle, append_startup_log);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                exit_events::handle_exit_event(app_handle);
            }
        });
}

fn is_main_window_destroyed(label: &str, event: &WindowEvent) -> bool {
    label == MAIN_WINDOW_LABEL && matches!(event, WindowEvent::Destroyed)
}

fn show_startup_error(app_handle: &AppHandle, message: &str) {
    append_startup_log(&format!("clrkio startup failed: {message}"));
    eprintln!("clrkio startup failed: {message}");
    app_handle.exit(1);
}

#[cfg(test)]
mod tests {
    use tauri::WindowEvent;

    use super::is_main_window_destroyed;

    #[test]
    fn only_main_window_destruction_triggers_shutdown() {
        assert!(is_main_window_destroyed("main", &WindowEvent::Destroyed));
        assert!(!is_main_window_destroyed("settings", &WindowEvent::Destroyed));
        assert!(!is_main_window_destroyed("main", &WindowEvent::Focused(true)));
    }
}
