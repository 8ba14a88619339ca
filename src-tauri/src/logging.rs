use chrono::{DateTime, Local};
use log::Level;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::{backend_config, runtime_paths, DESKTOP_LOG_FILE, LOG_DIR_ENV};

static DESKTOP_LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    if let Some(log_dir) = backend_config::env_non_empty(LOG_DIR_ENV) {
        return PathBuf::from(log_dir).join(file_name);
    }

    root_dir
        .map(|root| root.join("logs"))
        .unwrap_or_else(std::env::temp_dir)
        .join(file_name)
}

pub(crate) fn desktop_log_path() -> &'static Path {
    DESKTOP_LOG_PATH.get_or_init(|| {
        resolve_desktop_log_path(runtime_paths::default_root_dir(), DESKTOP_LOG_FILE)
    })
}

pub(crate) fn format_log_line(category: &str, message: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "{} [{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        category,
        message
    )
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

fn append_log(level: Level, category: &str, message: &str) {
    log::log!(level, "[{category}] {message}");
    let line = format_log_line(category, message, Local::now());
    let _ = append_line(desktop_log_path(), &line);
}

pub(crate) fn append_desktop_log(message: &str) {
    append_log(Level::Info, "desktop", message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_log(Level::Info, "startup", message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_log(Level::Info, "shutdown", message);
}

pub(crate) fn append_backend_log(message: &str) {
    append_log(Level::Info, "backend", message);
}

pub(crate) fn append_backend_error_log(message: &str) {
    append_log(Level::Warn, "backend", message);
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use std::fs;

    use super::{append_line, format_log_line};

    #[test]
    fn format_log_line_includes_timestamp_and_category() {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid local timestamp");
        let line = format_log_line("startup", "desktop process starting", timestamp);
        assert_eq!(
            line,
            "2024-03-09 14:05:07.000 [startup] desktop process starting"
        );
    }

    #[test]
    fn append_line_creates_parent_and_appends() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join("logs").join("desktop.log");

        append_line(&path, "first").expect("append first line");
        append_line(&path, "second").expect("append second line");

        let contents = fs::read_to_string(&path).expect("read log file");
        assert_eq!(contents, "first\nsecond\n");
    }
}
