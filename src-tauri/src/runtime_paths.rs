use std::{env, path::PathBuf};

pub(crate) fn default_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".clrkio"))
}

pub(crate) fn workspace_root_dir() -> PathBuf {
    let candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
    candidate.canonicalize().unwrap_or(candidate)
}

pub(crate) fn launcher_dir() -> Result<PathBuf, String> {
    let exe_path = env::current_exe()
        .map_err(|error| format!("Failed to resolve launcher executable path: {error}"))?;
    exe_path
        .parent()
        .map(|parent| parent.to_path_buf())
        .ok_or_else(|| format!("Launcher executable has no parent: {}", exe_path.display()))
}

/// Directories searched, in order, for a relative backend script.
pub(crate) fn script_search_dirs() -> Result<Vec<PathBuf>, String> {
    let mut dirs = vec![launcher_dir()?];
    if cfg!(debug_assertions) {
        dirs.push(workspace_root_dir());
    }
    Ok(dirs)
}
