use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    parse,
    types::{SkillCandidate, SkillSource},
};

/// Lists installed skill candidates across built-in and user locations.
///
/// The manager treats the returned order as opaque and imposes no
/// ordering of its own.
pub trait SkillDiscoverer: Send + Sync {
    fn discover(&self) -> Result<Vec<SkillCandidate>>;
}

/// Default filesystem-based skill discoverer.
pub struct FsSkillDiscoverer {
    /// (path, source) pairs to scan, in priority order.
    search_paths: Vec<(PathBuf, SkillSource)>,
}

impl FsSkillDiscoverer {
    pub fn new(search_paths: Vec<(PathBuf, SkillSource)>) -> Self {
        Self { search_paths }
    }

    /// Default search paths: bundled built-in skills, then the user root.
    pub fn default_paths(user_root: &Path) -> Vec<(PathBuf, SkillSource)> {
        vec![
            (openwork_config::builtin_skills_dir(), SkillSource::BuiltIn),
            (user_root.to_path_buf(), SkillSource::User),
        ]
    }
}

impl SkillDiscoverer for FsSkillDiscoverer {
    fn discover(&self) -> Result<Vec<SkillCandidate>> {
        let mut candidates = Vec::new();
        for (base_path, source) in &self.search_paths {
            if !base_path.is_dir() {
                continue;
            }
            discover_flat(base_path, *source, &mut candidates);
        }
        Ok(candidates)
    }
}

/// Scan one level deep for directories containing SKILL.md.
///
/// The candidate name is the directory basename; a divergent `name:` in
/// the frontmatter is not read back.
fn discover_flat(base_path: &Path, source: SkillSource, out: &mut Vec<SkillCandidate>) {
    let entries = match std::fs::read_dir(base_path) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(?base_path, %e, "failed to read skills directory");
            return;
        },
    };

    for entry in entries.flatten() {
        let skill_dir = entry.path();
        if !skill_dir.is_dir() {
            continue;
        }
        let skill_md = skill_dir.join("SKILL.md");
        if !skill_md.is_file() {
            continue;
        }
        let Some(name) = skill_dir.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(?skill_dir, "skipping skill directory with non-UTF-8 name");
            continue;
        };
        out.push(SkillCandidate {
            name: name.to_string(),
            description: parse::read_description(&skill_md),
            path: skill_dir.clone(),
            source,
        });
    }
}
