use std::{env, time::Duration};

use url::Url;

use crate::{
    BACKEND_STOP_TIMEOUT_ENV, BACKEND_URL_ENV, DEFAULT_BACKEND_STOP_TIMEOUT_MS,
    DEFAULT_BACKEND_URL, DEFAULT_POLL_INTERVAL_MS, POLL_INTERVAL_ENV,
};

pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Only plain `http` is accepted: the readiness client is built without TLS.
pub(crate) fn normalize_backend_url(raw: &str, default_backend_url: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_backend_url.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if parsed.scheme() == "http" && parsed.has_host() => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed.to_string()
        }
        _ => default_backend_url.to_string(),
    }
}

pub(crate) fn parse_duration_ms(raw: Option<&str>, default_ms: u64) -> Duration {
    let millis = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(millis)
}

pub(crate) fn resolve_backend_url() -> String {
    normalize_backend_url(
        &env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
        DEFAULT_BACKEND_URL,
    )
}

pub(crate) fn resolve_poll_interval() -> Duration {
    parse_duration_ms(
        env_non_empty(POLL_INTERVAL_ENV).as_deref(),
        DEFAULT_POLL_INTERVAL_MS,
    )
}

pub(crate) fn resolve_stop_timeout() -> Duration {
    parse_duration_ms(
        env_non_empty(BACKEND_STOP_TIMEOUT_ENV).as_deref(),
        DEFAULT_BACKEND_STOP_TIMEOUT_MS,
    )
}
