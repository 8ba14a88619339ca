use std::{
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Sends the Ctrl+C equivalent to `pid`.
#[cfg(not(target_os = "windows"))]
pub(crate) fn send_interrupt(pid: u32) -> Result<(), String> {
    let status = Command::new("kill")
        .args(["-INT", &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|error| format!("Failed to run 'kill' for pid {pid}: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("'kill -INT {pid}' exited with {status}"))
    }
}

#[cfg(target_os = "windows")]
pub(crate) fn send_interrupt(pid: u32) -> Result<(), String> {
    // Without /F taskkill asks the process tree to close instead of terminating it.
    let status = Command::new("taskkill")
        .args(["/pid", &pid.to_string(), "/t"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|error| format!("Failed to run 'taskkill' for pid {pid}: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("'taskkill /pid {pid} /t' exited with {status}"))
    }
}

pub(crate) fn wait_for_exit(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>, String> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {}
            Err(error) => return Err(format!("Failed to poll backend process status: {error}")),
        }
        if started.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(EXIT_POLL_INTERVAL);
    }
}

pub(crate) fn force_kill(child: &mut Child) -> Option<ExitStatus> {
    #[cfg(target_os = "windows")]
    {
        let _ = Command::new("taskkill")
            .args(["/pid", &child.id().to_string(), "/t", "/f"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .status();
    }

    let _ = child.kill();
    child.wait().ok()
}
