use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a skill was discovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillSource {
    /// Created or installed by the user under the workspace skills root.
    User,
    /// Bundled with the application; read-only for this subsystem.
    BuiltIn,
}

/// A skill surfaced by the discovery primitive, before enablement lookup.
#[derive(Debug, Clone)]
pub struct SkillCandidate {
    /// Skill name, taken from the directory basename.
    pub name: String,
    /// Description from frontmatter; empty when absent or unparseable.
    pub description: String,
    /// Path to the skill directory.
    pub path: PathBuf,
    pub source: SkillSource,
}

/// Normalized descriptor returned to the UI layer and agent runtime.
#[derive(Debug, Clone, Serialize)]
pub struct SkillDescriptor {
    /// Skill name — lowercase, hyphen-separated, matches the directory name.
    pub name: String,
    /// Short human-readable description from frontmatter.
    pub description: String,
    /// Absolute forward-slash path to the skill's `SKILL.md`.
    pub path: String,
    pub source: SkillSource,
    /// Enablement flag from the store; the agent runtime gates loading on it.
    pub enabled: bool,
}

/// Render a path absolute with forward slashes for the UI boundary.
pub(crate) fn slash_path(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute.to_string_lossy().replace('\\', "/")
}
