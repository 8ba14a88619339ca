use std::{
    env, fs,
    process::{ChildStderr, ChildStdout, Command, Stdio},
};

use crate::{BackendState, LaunchPlan};

/// Output pipes of a freshly spawned backend, handed to the log forwarders.
#[derive(Debug)]
pub(crate) struct BackendPipes {
    pub(crate) pid: u32,
    pub(crate) stdout: Option<ChildStdout>,
    pub(crate) stderr: Option<ChildStderr>,
}

pub(crate) fn build_debug_command(plan: &LaunchPlan) -> Vec<String> {
    let mut parts = vec![plan.cmd.clone()];
    parts.extend(plan.args.clone());
    parts
}

pub(crate) fn build_backend_command(plan: &LaunchPlan) -> Command {
    let mut command = Command::new(&plan.cmd);
    command
        .args(&plan.args)
        .current_dir(&plan.cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env("PYTHONUNBUFFERED", "1")
        .env(
            "PYTHONIOENCODING",
            env::var("PYTHONIOENCODING").unwrap_or_else(|_| "utf-8".to_string()),
        );
    command
}

impl BackendState {
    pub(crate) fn start_backend_process(&self, plan: &LaunchPlan) -> Result<BackendPipes, String> {
        if self.is_terminated() {
            return Err("Launcher is shutting down; refusing to spawn backend.".to_string());
        }

        let mut child_guard = self
            .child
            .lock()
            .map_err(|_| "Backend process lock poisoned.".to_string())?;
        if child_guard.is_some() {
            return Err("Backend process is already running.".to_string());
        }

        if !plan.cwd.is_dir() {
            fs::create_dir_all(&plan.cwd).map_err(|error| {
                format!(
                    "Failed to create backend cwd {}: {}",
                    plan.cwd.display(),
                    error
                )
            })?;
        }

        let mut child = build_backend_command(plan).spawn().map_err(|error| {
            format!(
                "Failed to spawn backend process with command {:?}: {}",
                build_debug_command(plan),
                error
            )
        })?;

        let pipes = BackendPipes {
            pid: child.id(),
            stdout: child.stdout.take(),
            stderr: child.stderr.take(),
        };
        *child_guard = Some(child);
        Ok(pipes)
    }
}
