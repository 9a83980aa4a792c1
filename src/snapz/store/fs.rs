use super::MetaStore;
use crate::error::{Result, SnapzError};
use crate::model::Metadata;
use std::fs;
use std::path::PathBuf;

pub const METADATA_FILENAME: &str = ".metadata";

/// File-backed store: the whole state as one JSON document at
/// `.metadata` under the workspace root.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILENAME)
    }
}

impl MetaStore for FileStore {
    fn load(&self) -> Result<Metadata> {
        let path = self.metadata_path();
        if !path.exists() {
            return Ok(Metadata::default());
        }
        let content = fs::read_to_string(path).map_err(SnapzError::Io)?;
        // Unparseable content loads as empty; initialization rebuilds
        // from the pictures on disk.
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn save(&mut self, metadata: &Metadata) -> Result<()> {
        let content = serde_json::to_string_pretty(metadata).map_err(SnapzError::Serialization)?;
        fs::write(self.metadata_path(), content).map_err(SnapzError::Io)?;
        Ok(())
    }
}
