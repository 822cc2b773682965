use std::path::{Path, PathBuf};

use {clap::Subcommand, openwork_skills::SkillManager};

#[derive(Subcommand)]
pub enum SkillAction {
    /// List all discovered skills.
    List,
    /// Scaffold a new skill in the workspace.
    Create {
        /// Skill name (lowercase, hyphen-separated).
        name: String,
        /// One-line description embedded in the frontmatter.
        #[arg(short, long)]
        description: String,
        /// Use this file's contents verbatim instead of the template.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Install a skill by copying a local folder into the workspace.
    Install {
        /// Path to a skill directory or its SKILL.md file.
        path: PathBuf,
    },
    /// Delete a skill from the workspace.
    Remove {
        /// Skill name.
        name: String,
    },
    /// Enable a skill.
    Enable {
        /// Skill name.
        name: String,
    },
    /// Disable a skill.
    Disable {
        /// Skill name.
        name: String,
    },
    /// Print a skill's SKILL.md.
    Show {
        /// Skill name.
        name: String,
    },
    /// Overwrite a skill's SKILL.md with the contents of a file.
    Update {
        /// Skill name.
        name: String,
        /// File whose contents replace SKILL.md.
        file: PathBuf,
    },
}

pub fn handle_skills(workdir: &Path, action: SkillAction) -> anyhow::Result<()> {
    let manager = SkillManager::for_workspace(workdir);

    match action {
        SkillAction::List => {
            let skills = manager.list()?;
            if skills.is_empty() {
                println!("No skills found.");
            } else {
                for skill in &skills {
                    let state = if skill.enabled { "enabled" } else { "disabled" };
                    println!("  {} — {} [{state}]", skill.name, skill.description);
                }
            }
        },
        SkillAction::Create {
            name,
            description,
            file,
        } => {
            let content = match file {
                Some(path) => Some(std::fs::read_to_string(path)?),
                None => None,
            };
            let skill = manager.create(&name, &description, content.as_deref())?;
            println!("Created skill '{}' at {}", skill.name, skill.path);
        },
        SkillAction::Install { path } => {
            let skill = manager.install_from_path(&path)?;
            println!("Installed skill '{}': {}", skill.name, skill.description);
        },
        SkillAction::Remove { name } => {
            manager.delete(&name)?;
            println!("Removed skill '{name}'.");
        },
        SkillAction::Enable { name } => {
            let skill = manager.set_enabled(&name, true)?;
            println!("Enabled skill '{}'.", skill.name);
        },
        SkillAction::Disable { name } => {
            let skill = manager.set_enabled(&name, false)?;
            println!("Disabled skill '{}'.", skill.name);
        },
        SkillAction::Show { name } => {
            print!("{}", manager.get_content(&name)?);
        },
        SkillAction::Update { name, file } => {
            let content = std::fs::read_to_string(file)?;
            let skill = manager.save_content(&name, &content)?;
            println!("Updated skill '{}': {}", skill.name, skill.description);
        },
    }

    Ok(())
}
