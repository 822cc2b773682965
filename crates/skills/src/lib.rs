//! Skill package management: name validation, SKILL.md frontmatter
//! parsing, persistent enablement state, and the directory manager that
//! owns the workspace skills root.
//!
//! Skills are directories containing a `SKILL.md` file with YAML
//! frontmatter and markdown instructions.

pub mod discover;
pub mod error;
pub mod manager;
pub mod parse;
pub mod store;
pub mod types;

pub use {
    error::{Error, Result},
    manager::SkillManager,
    store::EnablementStore,
    types::{SkillCandidate, SkillDescriptor, SkillSource},
};
