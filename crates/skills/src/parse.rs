use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Validate a skill name: one or more lowercase alphanumeric segments
/// joined by single hyphens. Pure, no I/O.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    let well_formed = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--");
    if !well_formed {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Frontmatter keys this subsystem reads back. Other keys (including
/// `name:`) are not authoritative; the directory name is.
#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    #[serde(default)]
    description: Option<String>,
}

/// Split SKILL.md content at `---` delimiters into (frontmatter, body).
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let after_open = content.trim_start().strip_prefix("---")?;
    let close = after_open.find("\n---")?;
    Some((after_open[..close].trim(), after_open[close + 4..].trim()))
}

/// Extract `description` from SKILL.md contents.
///
/// Degrades to the empty string when the frontmatter block is absent,
/// unclosed, or not valid YAML; metadata refresh must never fail on a
/// broken file.
pub fn extract_description(content: &str) -> String {
    let Some((frontmatter, _body)) = split_frontmatter(content) else {
        return String::new();
    };
    serde_yaml::from_str::<Frontmatter>(frontmatter)
        .ok()
        .and_then(|fm| fm.description)
        .map(|d| d.trim().to_string())
        .unwrap_or_default()
}

/// Read a SKILL.md file and extract its description.
///
/// Read failures degrade to the empty string as well.
pub fn read_description(skill_md: &Path) -> String {
    match std::fs::read_to_string(skill_md) {
        Ok(content) => extract_description(&content),
        Err(e) => {
            tracing::debug!(?skill_md, %e, "unreadable SKILL.md, treating description as empty");
            String::new()
        },
    }
}
