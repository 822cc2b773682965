use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Persistent per-skill enablement flags.
///
/// A flat JSON map keyed by skill name, stored outside the skill
/// directories so that enable/disable state survives content edits. The
/// map is loaded per operation and saved atomically via temp file +
/// rename. Records are not validated against the directory listing.
pub struct EnablementStore {
    path: PathBuf,
}

impl EnablementStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a skill is enabled. Skills without a record are enabled.
    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.get(name).copied().unwrap_or(true))
    }

    /// Upsert the record for `name`.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let mut records = self.load()?;
        records.insert(name.to_string(), enabled);
        self.save(&records)
    }

    /// Purge the record for `name`; no-op when absent.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut records = self.load()?;
        if records.remove(name).is_some() {
            self.save(&records)?;
        }
        Ok(())
    }

    /// Load the map from disk, returning an empty map when missing.
    fn load(&self) -> Result<BTreeMap<String, bool>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|source| Error::Store {
            path: self.path.clone(),
            source,
        })
    }

    /// Save atomically via temp file + rename.
    fn save(&self, records: &BTreeMap<String, bool>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(records).map_err(|source| Error::Store {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
