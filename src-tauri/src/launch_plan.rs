use std::{
    env,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use crate::{
    backend_config::env_non_empty, runtime_paths, LaunchPlan, BACKEND_CMD_ENV, BACKEND_CWD_ENV,
    BACKEND_SCRIPT_ENV, DEFAULT_BACKEND_SCRIPT, PYTHON_CANDIDATES, PYTHON_ENV,
};

/// Launch settings taken from the environment.
#[derive(Debug, Default, Clone)]
pub(crate) struct LaunchOverrides {
    pub(crate) custom_cmd: Option<String>,
    pub(crate) python: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) cwd: Option<PathBuf>,
}

impl LaunchOverrides {
    pub(crate) fn from_env() -> Self {
        Self {
            custom_cmd: env_non_empty(BACKEND_CMD_ENV),
            python: env_non_empty(PYTHON_ENV),
            script: env_non_empty(BACKEND_SCRIPT_ENV),
            cwd: env_non_empty(BACKEND_CWD_ENV).map(PathBuf::from),
        }
    }
}

pub(crate) fn resolve_launch_plan() -> Result<LaunchPlan, String> {
    let overrides = LaunchOverrides::from_env();
    let search_dirs = runtime_paths::script_search_dirs()?;
    let path_var = env::var_os("PATH");

    plan_from_overrides(&overrides, &search_dirs, path_var.as_deref())
}

/// A custom command wins; otherwise an interpreter runs the backend script.
pub(crate) fn plan_from_overrides(
    overrides: &LaunchOverrides,
    search_dirs: &[PathBuf],
    path_var: Option<&OsStr>,
) -> Result<LaunchPlan, String> {
    if let Some(custom_cmd) = &overrides.custom_cmd {
        return resolve_custom_launch(custom_cmd, overrides.cwd.clone(), search_dirs);
    }

    resolve_interpreter_launch(overrides, search_dirs, path_var)
}

fn resolve_custom_launch(
    custom_cmd: &str,
    cwd: Option<PathBuf>,
    search_dirs: &[PathBuf],
) -> Result<LaunchPlan, String> {
    let mut pieces = shlex::split(custom_cmd)
        .ok_or_else(|| format!("Invalid {BACKEND_CMD_ENV}: {custom_cmd}"))?;
    if pieces.is_empty() {
        return Err(format!("{BACKEND_CMD_ENV} is empty."));
    }

    let cmd = pieces.remove(0);
    let cwd = cwd
        .or_else(|| search_dirs.first().cloned())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(LaunchPlan {
        cmd,
        args: pieces,
        cwd,
    })
}

fn resolve_interpreter_launch(
    overrides: &LaunchOverrides,
    search_dirs: &[PathBuf],
    path_var: Option<&OsStr>,
) -> Result<LaunchPlan, String> {
    let interpreter = resolve_interpreter(overrides.python.as_deref(), path_var)?;
    let script_path = resolve_backend_script(
        overrides.script.as_deref().unwrap_or(DEFAULT_BACKEND_SCRIPT),
        search_dirs,
    )?;
    let cwd = overrides.cwd.clone().unwrap_or_else(|| {
        script_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    Ok(LaunchPlan {
        cmd: interpreter.to_string_lossy().to_string(),
        args: vec![script_path.to_string_lossy().to_string()],
        cwd,
    })
}

pub(crate) fn resolve_interpreter(
    explicit: Option<&str>,
    path_var: Option<&OsStr>,
) -> Result<PathBuf, String> {
    if let Some(explicit) = explicit {
        let candidate = PathBuf::from(explicit);
        if candidate.components().count() > 1 || candidate.is_absolute() {
            if candidate.is_file() {
                return Ok(candidate);
            }
            return Err(format!(
                "Configured python interpreter does not exist: {}",
                candidate.display()
            ));
        }
        return find_on_path(explicit, path_var).ok_or_else(|| {
            format!("Configured python interpreter '{explicit}' was not found on PATH.")
        });
    }

    PYTHON_CANDIDATES
        .iter()
        .find_map(|program| find_on_path(program, path_var))
        .ok_or_else(|| {
            format!(
                "Cannot locate a python interpreter on PATH (tried {}). Set {PYTHON_ENV}.",
                PYTHON_CANDIDATES.join(", ")
            )
        })
}

pub(crate) fn find_on_path(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    let file_names: Vec<OsString> = if cfg!(target_os = "windows") {
        vec![
            OsString::from(format!("{program}.exe")),
            OsString::from(program),
        ]
    } else {
        vec![OsString::from(program)]
    };

    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| {
            file_names
                .iter()
                .map(move |file_name| dir.join(file_name))
        })
        .find(|candidate| candidate.is_file())
}

fn resolve_backend_script(script: &str, search_dirs: &[PathBuf]) -> Result<PathBuf, String> {
    let script_path = PathBuf::from(script);
    if script_path.is_absolute() {
        if script_path.is_file() {
            return Ok(script_path);
        }
        return Err(format!(
            "Backend script does not exist: {}",
            script_path.display()
        ));
    }

    search_dirs
        .iter()
        .map(|dir| dir.join(&script_path))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            let searched = search_dirs
                .iter()
                .map(|dir| dir.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("Cannot locate backend script '{script}' (searched: {searched}). Set {BACKEND_SCRIPT_ENV}.")
        })
}
