use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the skill package manager.
///
/// Filesystem failures are not translated: they propagate verbatim through
/// the `Io` variant so the command boundary can show the raw cause.
#[derive(Debug, Error)]
pub enum Error {
    #[error("skill name must not be empty")]
    EmptyName,

    #[error("invalid skill name '{0}': use lowercase letters and digits separated by single hyphens")]
    InvalidName(String),

    #[error("skill description must not be empty")]
    EmptyDescription,

    #[error("skill '{0}' already exists")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    /// The enablement store file exists but cannot be decoded.
    #[error("invalid enablement store at {path}")]
    Store {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
