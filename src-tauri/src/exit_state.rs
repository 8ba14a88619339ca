#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LauncherPhase {
    #[default]
    Running,
    Terminated,
}

/// Running until the main window goes away; there is no way back.
#[derive(Debug, Default)]
pub(crate) struct LauncherLifecycle {
    phase: LauncherPhase,
}

impl LauncherLifecycle {
    pub(crate) fn is_terminated(&self) -> bool {
        self.phase == LauncherPhase::Terminated
    }

    pub(crate) fn terminate(&mut self) -> bool {
        if self.is_terminated() {
            return false;
        }
        self.phase = LauncherPhase::Terminated;
        true
    }
}
