use tauri::{AppHandle, Manager};

use crate::{
    append_shutdown_log,
    backend_process_lifecycle::{InterruptOutcome, ReapOutcome},
    BackendState,
};

/// Moves the launcher to `Terminated` and interrupts the backend. Only the
/// first call does anything; later triggers find the launcher terminated.
pub(crate) fn terminate_launcher<F>(state: &BackendState, reason: &str, log: F) -> bool
where
    F: Fn(&str),
{
    if !state.mark_terminated() {
        return false;
    }

    log(&format!("{reason}; interrupting backend"));
    match state.interrupt_backend() {
        Ok(InterruptOutcome::Interrupted { pid }) => {
            log(&format!("sent interrupt to backend process {pid}"));
        }
        Ok(InterruptOutcome::AlreadyExited(status)) => {
            log(&format!("backend process had already exited: {status}"));
        }
        Ok(InterruptOutcome::NotRunning) => log("no backend process to interrupt"),
        Err(error) => log(&format!("failed to interrupt backend: {error}")),
    }
    true
}

pub(crate) fn finish_backend_shutdown<F>(state: &BackendState, log: F)
where
    F: Fn(&str),
{
    match state.reap_backend() {
        Ok(ReapOutcome::NothingToReap) => {}
        Ok(ReapOutcome::Exited(status)) => log(&format!("backend process exited: {status}")),
        Ok(ReapOutcome::ForceKilled(status)) => log(&format!(
            "backend did not stop within {}ms; force killed ({})",
            state.stop_timeout.as_millis(),
            status
                .map(|status| status.to_string())
                .unwrap_or_else(|| "status unknown".to_string())
        )),
        Err(error) => log(&format!("failed to reap backend: {error}")),
    }
}

pub(crate) fn handle_main_window_destroyed(app_handle: &AppHandle) {
    let state = app_handle.state::<BackendState>();
    terminate_launcher(&state, "main window closed", append_shutdown_log);
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<BackendState>();
    terminate_launcher(&state, "application exiting", append_shutdown_log);
    finish_backend_shutdown(&state, append_shutdown_log);
}
