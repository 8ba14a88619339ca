pub(crate) const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/";
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub(crate) const DEFAULT_BACKEND_STOP_TIMEOUT_MS: u64 = 5_000;
pub(crate) const DEFAULT_BACKEND_SCRIPT: &str = "run.py";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "clrkio";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 800.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 600.0;
pub(crate) const PLACEHOLDER_PAGE: &str = "pre_index.html";

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";

pub(crate) const BACKEND_URL_ENV: &str = "CLRKIO_BACKEND_URL";
pub(crate) const POLL_INTERVAL_ENV: &str = "CLRKIO_POLL_INTERVAL_MS";
pub(crate) const BACKEND_CMD_ENV: &str = "CLRKIO_BACKEND_CMD";
pub(crate) const PYTHON_ENV: &str = "CLRKIO_PYTHON";
pub(crate) const BACKEND_SCRIPT_ENV: &str = "CLRKIO_BACKEND_SCRIPT";
pub(crate) const BACKEND_CWD_ENV: &str = "CLRKIO_BACKEND_CWD";
pub(crate) const BACKEND_STOP_TIMEOUT_ENV: &str = "CLRKIO_BACKEND_STOP_TIMEOUT_MS";
pub(crate) const LOG_DIR_ENV: &str = "CLRKIO_LOG_DIR";

#[cfg(target_os = "windows")]
pub(crate) const PYTHON_CANDIDATES: &[&str] = &["python", "python3"];
#[cfg(not(target_os = "windows"))]
pub(crate) const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];
