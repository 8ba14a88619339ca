use std::{thread, time::Duration};

use tauri::{AppHandle, Manager};
use url::Url;

use crate::{
    append_backend_error_log, append_backend_log, backend_launch, backend_output,
    backend_readiness::{BackendProbe, HttpProbe, PollOutcome, ReadinessPoller},
    launch_plan, main_window, BackendState,
};

/// Resolves the launch plan, spawns the backend and starts forwarding its
/// output. Must run before the main window is created.
pub(crate) fn launch_backend<F>(app_handle: &AppHandle, log: F) -> Result<(), String>
where
    F: Fn(&str),
{
    let state = app_handle.state::<BackendState>();
    let plan = launch_plan::resolve_launch_plan()?;
    log(&format!(
        "launching backend: command={:?} cwd={}",
        backend_launch::build_debug_command(&plan),
        plan.cwd.display()
    ));

    let pipes = state.start_backend_process(&plan)?;
    log(&format!("backend process spawned with pid {}", pipes.pid));

    if let Some(stdout) = pipes.stdout {
        if let Err(error) =
            backend_output::spawn_forwarder(stdout, backend_output::STDOUT_LABEL, append_backend_log)
        {
            log(&format!("failed to start backend stdout forwarder: {error}"));
        }
    }
    if let Some(stderr) = pipes.stderr {
        if let Err(error) = backend_output::spawn_forwarder(
            stderr,
            backend_output::STDERR_LABEL,
            append_backend_error_log,
        ) {
            log(&format!("failed to start backend stderr forwarder: {error}"));
        }
    }
    Ok(())
}

pub(crate) fn spawn_readiness_task<F>(app_handle: AppHandle, log: F)
where
    F: Fn(&str) + Send + Copy + 'static,
{
    let spawn_result = thread::Builder::new()
        .name("backend-readiness".to_string())
        .spawn(move || run_readiness_task(&app_handle, log));
    if let Err(error) = spawn_result {
        log(&format!("failed to spawn readiness task: {error}"));
    }
}

fn run_readiness_task<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let state = app_handle.state::<BackendState>();
    let probe = match HttpProbe::new() {
        Ok(probe) => probe,
        Err(error) => {
            log(&error);
            return;
        }
    };

    let navigate =
        |address: &str| main_window::navigate_main_window_to_backend(app_handle, address);
    if let Err(error) = wait_then_navigate(&state, &probe, thread::sleep, navigate, log) {
        log(&error);
    }
}

/// Polls until the backend answers, then navigates exactly once. Nothing is
/// navigated when the launcher terminates first.
fn wait_then_navigate<P, S, N, F>(
    state: &BackendState,
    probe: &P,
    sleep: S,
    navigate: N,
    log: F,
) -> Result<PollOutcome, String>
where
    P: BackendProbe,
    S: FnMut(Duration),
    N: FnOnce(&str) -> Result<(), String>,
    F: Fn(&str) + Copy,
{
    let address = Url::parse(&state.backend_url)
        .map_err(|error| format!("invalid backend url {}: {error}", state.backend_url))?;

    let mut poller = ReadinessPoller::new(address, state.poll_interval);
    log(&format!(
        "waiting for backend at {} (interval {}ms)",
        poller.address(),
        state.poll_interval.as_millis()
    ));

    let outcome = poller.run(probe, sleep, || state.is_terminated(), log);
    match outcome {
        PollOutcome::Ready { attempts } => {
            log(&format!(
                "backend ready after {attempts} check(s); navigating main window"
            ));
            navigate(poller.address().as_str())?;
        }
        PollOutcome::Cancelled { attempts } => {
            log(&format!(
                "stopped waiting for backend after {attempts} check(s): launcher is shutting down"
            ));
        }
    }
    Ok(outcome)
}
