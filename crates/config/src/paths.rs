use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use once_cell::sync::Lazy;

/// Name of the per-workspace state directory.
const WORKSPACE_DIR_NAME: &str = ".openwork";

static DATA_DIR_OVERRIDE: Lazy<RwLock<Option<PathBuf>>> = Lazy::new(|| RwLock::new(None));

/// Override the machine-global data directory (CLI flag, tests).
pub fn set_data_dir(dir: PathBuf) {
    if let Ok(mut guard) = DATA_DIR_OVERRIDE.write() {
        *guard = Some(dir);
    }
}

/// Clear a previously set data directory override.
pub fn clear_data_dir() {
    if let Ok(mut guard) = DATA_DIR_OVERRIDE.write() {
        *guard = None;
    }
}

/// Machine-global data directory, `~/.openwork` by default.
pub fn data_dir() -> PathBuf {
    if let Ok(guard) = DATA_DIR_OVERRIDE.read()
        && let Some(dir) = guard.as_ref()
    {
        return dir.clone();
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(WORKSPACE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(WORKSPACE_DIR_NAME))
}

/// Directory holding the skills bundled with the application.
pub fn builtin_skills_dir() -> PathBuf {
    data_dir().join("builtin-skills")
}

/// Per-workspace state directory: `<workdir>/.openwork`.
pub fn workspace_dir(workdir: &Path) -> PathBuf {
    workdir.join(WORKSPACE_DIR_NAME)
}

/// Root directory for user skills: `<workdir>/.openwork/skills`.
pub fn workspace_skills_dir(workdir: &Path) -> PathBuf {
    workspace_dir(workdir).join("skills")
}

/// Enablement store file, kept outside any skill directory so content
/// edits and enablement toggles stay independent.
pub fn enablement_store_path(workdir: &Path) -> PathBuf {
    workspace_dir(workdir).join("skills-enabled.json")
}
