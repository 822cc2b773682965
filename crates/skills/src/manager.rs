use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{
    discover::{FsSkillDiscoverer, SkillDiscoverer},
    error::{Error, Result},
    parse,
    store::EnablementStore,
    types::{SkillDescriptor, SkillSource, slash_path},
};

const SKILL_FILE: &str = "SKILL.md";

/// The authoritative gateway over the workspace skills root.
///
/// All mutations of user skills go through this type. Built-in skills
/// only surface through discovery and are never written. Operations are
/// synchronous and blocking; there is no locking and no rollback — a
/// failed multi-step operation can leave a partial directory behind for
/// the next `delete` to clean up.
pub struct SkillManager {
    root: PathBuf,
    store: EnablementStore,
    discoverer: Box<dyn SkillDiscoverer>,
}

impl SkillManager {
    /// Build a manager over an explicit root and enablement store, with
    /// the default filesystem discoverer over built-in + user locations.
    pub fn new(root: PathBuf, store: EnablementStore) -> Self {
        let discoverer = FsSkillDiscoverer::new(FsSkillDiscoverer::default_paths(&root));
        Self {
            root,
            store,
            discoverer: Box::new(discoverer),
        }
    }

    /// Wire the default workspace layout under `<workdir>/.openwork`.
    pub fn for_workspace(workdir: &Path) -> Self {
        Self::new(
            openwork_config::workspace_skills_dir(workdir),
            EnablementStore::new(openwork_config::enablement_store_path(workdir)),
        )
    }

    /// Replace the discovery primitive (tests, alternative scanners).
    #[must_use]
    pub fn with_discoverer(mut self, discoverer: Box<dyn SkillDiscoverer>) -> Self {
        self.discoverer = discoverer;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if missing. Idempotent.
    fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// List all discovered skills with their enablement state, in
    /// discovery order.
    pub fn list(&self) -> Result<Vec<SkillDescriptor>> {
        self.ensure_root()?;
        let mut skills = Vec::new();
        for candidate in self.discoverer.discover()? {
            let enabled = self.store.is_enabled(&candidate.name)?;
            skills.push(SkillDescriptor {
                path: slash_path(&candidate.path.join(SKILL_FILE)),
                name: candidate.name,
                description: candidate.description,
                source: candidate.source,
                enabled,
            });
        }
        Ok(skills)
    }

    /// Create a new skill under the root.
    ///
    /// `content`, when non-empty after trimming, is written verbatim;
    /// otherwise a SKILL.md template embedding `name` and `description`
    /// is synthesized.
    pub fn create(
        &self,
        name: &str,
        description: &str,
        content: Option<&str>,
    ) -> Result<SkillDescriptor> {
        parse::validate_name(name)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        self.ensure_root()?;
        let skill_dir = self.root.join(name);
        if skill_dir.exists() {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        std::fs::create_dir_all(&skill_dir)?;

        let file_contents = match content {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => scaffold(name, description),
        };
        let skill_md = skill_dir.join(SKILL_FILE);
        std::fs::write(&skill_md, file_contents)?;
        tracing::info!(%name, "created skill");

        Ok(SkillDescriptor {
            name: name.to_string(),
            description: description.to_string(),
            path: slash_path(&skill_md),
            source: SkillSource::User,
            enabled: true,
        })
    }

    /// Install a skill by copying a local folder into the root.
    ///
    /// `input_path` may be the skill directory itself or its `SKILL.md`
    /// file. The installed name is the source directory's basename; the
    /// frontmatter `name:` is deliberately not consulted. The returned
    /// description is re-derived from the copied file so the descriptor
    /// reflects on-disk truth.
    pub fn install_from_path(&self, input_path: &Path) -> Result<SkillDescriptor> {
        let source_dir = resolve_source_dir(input_path)?;
        let name = source_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "cannot derive a skill name from {}",
                    input_path.display()
                ))
            })?
            .to_string();

        self.ensure_root()?;
        let target = self.root.join(&name);
        if target.exists() {
            return Err(Error::AlreadyExists(name));
        }
        copy_dir_recursive(&source_dir, &target)?;

        let skill_md = target.join(SKILL_FILE);
        let description = parse::read_description(&skill_md);
        tracing::info!(%name, source = %source_dir.display(), "installed skill");

        Ok(SkillDescriptor {
            name,
            description,
            path: slash_path(&skill_md),
            source: SkillSource::User,
            enabled: true,
        })
    }

    /// Delete a skill and purge its enablement record.
    ///
    /// Succeeds silently when the directory is already gone, so repeated
    /// delete requests are safe.
    pub fn delete(&self, name: &str) -> Result<()> {
        let skill_dir = self.root.join(name);
        if !skill_dir.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(&skill_dir)?;
        self.store.remove(name)?;
        tracing::info!(%name, "deleted skill");
        Ok(())
    }

    /// Raw SKILL.md text for a skill. No descriptor re-derivation.
    pub fn get_content(&self, name: &str) -> Result<String> {
        let skill_md = self.root.join(name).join(SKILL_FILE);
        if !skill_md.is_file() {
            return Err(Error::NotFound(format!("skill '{name}' not found")));
        }
        Ok(std::fs::read_to_string(&skill_md)?)
    }

    /// Overwrite a skill's SKILL.md verbatim and re-derive its
    /// description. The enabled flag is read from the store, not changed.
    pub fn save_content(&self, name: &str, content: &str) -> Result<SkillDescriptor> {
        let skill_dir = self.root.join(name);
        if !skill_dir.is_dir() {
            return Err(Error::NotFound(format!("skill '{name}' not found")));
        }
        let skill_md = skill_dir.join(SKILL_FILE);
        std::fs::write(&skill_md, content)?;
        tracing::info!(%name, "saved skill content");

        Ok(SkillDescriptor {
            name: name.to_string(),
            description: parse::read_description(&skill_md),
            path: slash_path(&skill_md),
            source: SkillSource::User,
            enabled: self.store.is_enabled(name)?,
        })
    }

    /// Toggle a skill's enablement flag and return a refreshed
    /// descriptor with the description re-derived from disk.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<SkillDescriptor> {
        let skill_md = self.root.join(name).join(SKILL_FILE);
        if !skill_md.is_file() {
            return Err(Error::NotFound(format!("skill '{name}' not found")));
        }
        self.store.set_enabled(name, enabled)?;
        tracing::info!(%name, enabled, "toggled skill");

        Ok(SkillDescriptor {
            name: name.to_string(),
            description: parse::read_description(&skill_md),
            path: slash_path(&skill_md),
            source: SkillSource::User,
            enabled,
        })
    }
}

/// Synthesize the SKILL.md template for a newly created skill.
fn scaffold(name: &str, description: &str) -> String {
    format!(
        r#"---
name: {name}
description: {description}
---

# {name}

Describe when and how the agent should use this skill.
"#
    )
}

/// Resolve an install input to the skill's source directory.
///
/// A file input must itself be named `SKILL.md` (case-insensitive) and
/// resolves to its parent; a directory input must directly contain one.
fn resolve_source_dir(input: &Path) -> Result<PathBuf> {
    let metadata = match std::fs::metadata(input) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(format!(
                "no skill found at {}",
                input.display()
            )));
        },
        Err(e) => return Err(e.into()),
    };

    if metadata.is_file() {
        let named_skill_md = input
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(SKILL_FILE));
        if !named_skill_md {
            return Err(Error::NotFound(format!(
                "{} is not a SKILL.md file",
                input.display()
            )));
        }
        return input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                Error::NotFound(format!("{} has no parent directory", input.display()))
            });
    }

    if !input.join(SKILL_FILE).is_file() {
        return Err(Error::NotFound(format!(
            "no SKILL.md found in {}",
            input.display()
        )));
    }
    Ok(input.to_path_buf())
}

/// Recursively copy a skill directory tree.
fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let dest = to.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    /// Manager over temp dirs, discovering only the user root so that
    /// machine-global built-in skills cannot leak into tests.
    fn manager_in(tmp: &tempfile::TempDir) -> SkillManager {
        let root = tmp.path().join("skills");
        SkillManager::new(
            root.clone(),
            EnablementStore::new(tmp.path().join("skills-enabled.json")),
        )
        .with_discoverer(Box::new(FsSkillDiscoverer::new(vec![(
            root,
            SkillSource::User,
        )])))
    }

    #[test]
    fn test_create_then_get_content() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        let skill = manager
            .create("pdf-report", "Generates PDF reports", None)
            .unwrap();
        assert_eq!(skill.name, "pdf-report");
        assert_eq!(skill.description, "Generates PDF reports");
        assert_eq!(skill.source, SkillSource::User);
        assert!(skill.enabled);
        assert!(skill.path.ends_with("skills/pdf-report/SKILL.md"));

        let content = manager.get_content("pdf-report").unwrap();
        assert!(content.contains("description: Generates PDF reports"));
        assert!(content.contains("# pdf-report"));
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        assert!(matches!(
            manager.create("", "desc", None),
            Err(Error::EmptyName)
        ));
        assert!(matches!(
            manager.create("Bad--Name", "desc", None),
            Err(Error::InvalidName(_))
        ));
        assert!(matches!(
            manager.create("fine", "   ", None),
            Err(Error::EmptyDescription)
        ));
    }

    #[test]
    fn test_create_duplicate_fails_and_keeps_original() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        manager.create("dup", "first", None).unwrap();
        let original = manager.get_content("dup").unwrap();

        assert!(matches!(
            manager.create("dup", "second", None),
            Err(Error::AlreadyExists(_))
        ));
        assert_eq!(manager.get_content("dup").unwrap(), original);
    }

    #[test]
    fn test_create_with_verbatim_content() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        let content = "---\ndescription: custom\n---\n\nExact body.\n";
        manager.create("custom", "ignored by file", Some(content)).unwrap();
        assert_eq!(manager.get_content("custom").unwrap(), content);
    }

    #[test]
    fn test_create_with_blank_content_falls_back_to_template() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        manager.create("blank", "A description", Some("   \n  ")).unwrap();
        let content = manager.get_content("blank").unwrap();
        assert!(content.contains("description: A description"));
    }

    #[test]
    fn test_install_from_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        let source = tmp.path().join("my-skill");
        std::fs::create_dir_all(source.join("references")).unwrap();
        std::fs::write(
            source.join("SKILL.md"),
            "---\nname: whatever\ndescription: Custom tool\n---\nbody\n",
        )
        .unwrap();
        std::fs::write(source.join("references/notes.md"), "extra file").unwrap();

        let skill = manager.install_from_path(&source).unwrap();
        assert_eq!(skill.name, "my-skill");
        assert_eq!(skill.description, "Custom tool");
        assert_eq!(skill.source, SkillSource::User);
        assert!(skill.enabled);

        // The whole tree is copied, not just SKILL.md.
        assert!(
            manager
                .root()
                .join("my-skill/references/notes.md")
                .is_file()
        );
    }

    #[test]
    fn test_install_from_skill_md_file_path() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        let source = tmp.path().join("from-file");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(
            source.join("SKILL.md"),
            "---\ndescription: via file path\n---\nbody\n",
        )
        .unwrap();

        let skill = manager.install_from_path(&source.join("SKILL.md")).unwrap();
        assert_eq!(skill.name, "from-file");
        assert_eq!(skill.description, "via file path");
    }

    #[test]
    fn test_install_rejects_other_file_names() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        let stray = tmp.path().join("README.md");
        std::fs::write(&stray, "not a skill").unwrap();
        assert!(matches!(
            manager.install_from_path(&stray),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_install_without_skill_md_mutates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);
        manager.create("existing", "keep me", None).unwrap();

        let source = tmp.path().join("empty-dir");
        std::fs::create_dir_all(&source).unwrap();
        assert!(matches!(
            manager.install_from_path(&source),
            Err(Error::NotFound(_))
        ));

        let entries: Vec<_> = std::fs::read_dir(manager.root())
            .unwrap()
            .flatten()
            .map(|e| e.file_name())
            .collect();
        assert_eq!(entries, vec!["existing"]);
    }

    #[test]
    fn test_install_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);
        assert!(matches!(
            manager.install_from_path(Path::new("/nonexistent/skill")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_install_name_collision() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);
        manager.create("taken", "already here", None).unwrap();

        // An unrelated source dir elsewhere with the same basename.
        let source = tmp.path().join("elsewhere").join("taken");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("SKILL.md"), "---\ndescription: x\n---\n").unwrap();

        assert!(matches!(
            manager.install_from_path(&source),
            Err(Error::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        manager.create("ephemeral", "short-lived", None).unwrap();
        manager.delete("ephemeral").unwrap();
        assert!(matches!(
            manager.get_content("ephemeral"),
            Err(Error::NotFound(_))
        ));
        // Second delete is a silent no-op.
        manager.delete("ephemeral").unwrap();
    }

    #[test]
    fn test_disable_then_recreate_resets_enablement() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        manager.create("toggled", "flips", None).unwrap();
        manager.set_enabled("toggled", false).unwrap();

        let listed = manager.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].enabled);

        // Delete purges the record; recreating starts enabled again.
        manager.delete("toggled").unwrap();
        let recreated = manager.create("toggled", "flips", None).unwrap();
        assert!(recreated.enabled);
        assert!(manager.list().unwrap()[0].enabled);
    }

    #[test]
    fn test_save_content_rederives_description() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);

        manager.create("editable", "before", None).unwrap();
        manager.set_enabled("editable", false).unwrap();

        let skill = manager
            .save_content("editable", "---\ndescription: after\n---\n\nNew body.\n")
            .unwrap();
        assert_eq!(skill.description, "after");
        // Enablement is read from the store, not changed by a save.
        assert!(!skill.enabled);

        assert!(matches!(
            manager.save_content("missing", "content"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_set_enabled_missing_skill() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);
        assert!(matches!(
            manager.set_enabled("ghost", false),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_list_merges_builtin_and_user_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("skills");
        let builtin = tmp.path().join("builtin");
        std::fs::create_dir_all(builtin.join("bundled")).unwrap();
        std::fs::write(
            builtin.join("bundled/SKILL.md"),
            "---\ndescription: ships with the app\n---\n",
        )
        .unwrap();

        let manager = SkillManager::new(
            root.clone(),
            EnablementStore::new(tmp.path().join("skills-enabled.json")),
        )
        .with_discoverer(Box::new(FsSkillDiscoverer::new(vec![
            (builtin, SkillSource::BuiltIn),
            (root, SkillSource::User),
        ])));

        manager.create("mine", "user skill", None).unwrap();

        let listed = manager.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "bundled");
        assert_eq!(listed[0].source, SkillSource::BuiltIn);
        assert_eq!(listed[1].name, "mine");
        assert_eq!(listed[1].source, SkillSource::User);
        assert!(listed.iter().all(|s| s.enabled));
        assert!(listed.iter().all(|s| s.path.ends_with("/SKILL.md")));
    }

    #[test]
    fn test_list_creates_root_lazily() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(&tmp);
        assert!(!manager.root().exists());
        assert!(manager.list().unwrap().is_empty());
        assert!(manager.root().is_dir());
    }
}
