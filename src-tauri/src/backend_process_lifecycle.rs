use std::process::ExitStatus;

use crate::{process_control, BackendState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InterruptOutcome {
    NotRunning,
    AlreadyExited(ExitStatus),
    Interrupted { pid: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReapOutcome {
    NothingToReap,
    Exited(ExitStatus),
    ForceKilled(Option<ExitStatus>),
}

impl BackendState {
    /// Takes the live child out of the state and interrupts it once.
    ///
    /// The handle moves to `stopping`, so repeated calls find nothing to
    /// signal. A child that already exited is not signaled.
    pub(crate) fn interrupt_backend(&self) -> Result<InterruptOutcome, String> {
        let child = self
            .child
            .lock()
            .map_err(|_| "Backend process lock poisoned.".to_string())?
            .take();
        let Some(mut child) = child else {
            return Ok(InterruptOutcome::NotRunning);
        };

        let pid = child.id();
        let outcome = match child.try_wait() {
            Ok(Some(status)) => Ok(InterruptOutcome::AlreadyExited(status)),
            Ok(None) => process_control::send_interrupt(pid)
                .map(|()| InterruptOutcome::Interrupted { pid }),
            Err(error) => Err(format!(
                "Failed to poll backend process {pid} before interrupt: {error}"
            )),
        };

        // Keep the handle for reaping even if the signal could not be sent.
        *self
            .stopping
            .lock()
            .map_err(|_| "Backend process lock poisoned.".to_string())? = Some(child);
        outcome
    }

    /// Waits up to `stop_timeout` for an interrupted child, then kills it.
    pub(crate) fn reap_backend(&self) -> Result<ReapOutcome, String> {
        let child = self
            .stopping
            .lock()
            .map_err(|_| "Backend process lock poisoned.".to_string())?
            .take();
        let Some(mut child) = child else {
            return Ok(ReapOutcome::NothingToReap);
        };

        match process_control::wait_for_exit(&mut child, self.stop_timeout) {
            Ok(Some(status)) => Ok(ReapOutcome::Exited(status)),
            Ok(None) | Err(_) => Ok(ReapOutcome::ForceKilled(process_control::force_kill(
                &mut child,
            ))),
        }
    }
}
