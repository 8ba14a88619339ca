use std::{path::PathBuf, process::Child, sync::Mutex, time::Duration};

use crate::{backend_config, exit_state::LauncherLifecycle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchPlan {
    pub(crate) cmd: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: PathBuf,
}

#[derive(Debug)]
pub(crate) struct BackendState {
    pub(crate) child: Mutex<Option<Child>>,
    /// Child that has been interrupted and is waiting to be reaped at exit.
    pub(crate) stopping: Mutex<Option<Child>>,
    pub(crate) backend_url: String,
    pub(crate) poll_interval: Duration,
    pub(crate) stop_timeout: Duration,
    pub(crate) lifecycle: Mutex<LauncherLifecycle>,
}

impl BackendState {
    pub(crate) fn new(backend_url: String, poll_interval: Duration, stop_timeout: Duration) -> Self {
        Self {
            child: Mutex::new(None),
            stopping: Mutex::new(None),
            backend_url,
            poll_interval,
            stop_timeout,
            lifecycle: Mutex::new(LauncherLifecycle::default()),
        }
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.lifecycle
            .lock()
            .map(|guard| guard.is_terminated())
            .unwrap_or(true)
    }

    /// Returns `true` only for the call that moved the launcher out of `Running`.
    pub(crate) fn mark_terminated(&self) -> bool {
        match self.lifecycle.lock() {
            Ok(mut guard) => guard.terminate(),
            Err(_) => false,
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new(
            backend_config::resolve_backend_url(),
            backend_config::resolve_poll_interval(),
            backend_config::resolve_stop_timeout(),
        )
    }
}
