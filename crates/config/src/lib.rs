//! Directory resolution for OpenWork state.
//!
//! Per-workspace state lives under `<workdir>/.openwork/`; machine-global
//! state (bundled built-in skills) lives under the platform data directory.
//! The data directory can be overridden for tests and via the CLI.

pub mod paths;

pub use paths::{
    builtin_skills_dir, clear_data_dir, data_dir, enablement_store_path, set_data_dir,
    workspace_dir, workspace_skills_dir,
};
