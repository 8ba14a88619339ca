use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE, MAIN_WINDOW_WIDTH, PLACEHOLDER_PAGE,
};

pub(crate) fn create_main_window(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(PLACEHOLDER_PAGE.into()),
    )
    .title(MAIN_WINDOW_TITLE)
    .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
    .visible(true)
    .build()
    .map_err(|error| format!("Failed to create main window: {error}"))
}

pub(crate) fn navigation_script(backend_url: &str) -> String {
    format!(
        "window.location.replace({});",
        serde_json::to_string(backend_url).unwrap_or_else(|_| "\"/\"".to_string())
    )
}

pub(crate) fn navigate_main_window_to_backend(
    app_handle: &AppHandle,
    backend_url: &str,
) -> Result<(), String> {
    let window = app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "Main window is unavailable; it was probably closed.".to_string())?;
    window
        .eval(navigation_script(backend_url).as_str())
        .map_err(|error| format!("Failed to navigate to backend: {error}"))
}

pub(crate) fn focus_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("focus_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}
