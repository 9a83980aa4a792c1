use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILENAME: &str = ".snapz-config";

/// Configuration for snapz, stored in .snapz-config at the workspace
/// root.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapzConfig {
    /// Tag names that get a value-level (secondary) index.
    #[serde(default)]
    pub secondary_indexes: std::collections::BTreeSet<String>,

    /// When set, a persisting modification rebuilds the indexes
    /// instead of leaving them stale until the next explicit rebuild.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eager_reindex: bool,
}

impl SnapzConfig {
    /// Load config from the given directory, or return defaults if not
    /// found.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SnapzConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let config_path = dir.as_ref().join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn is_secondary(&self, tag_name: &str) -> bool {
        self.secondary_indexes.contains(tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SnapzConfig::default();
        assert!(config.secondary_indexes.is_empty());
        assert!(!config.eager_reindex);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SnapzConfig::load(dir.path()).unwrap();
        assert_eq!(config, SnapzConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = SnapzConfig::default();
        config.secondary_indexes.insert("color".to_string());
        config.eager_reindex = true;
        config.save(dir.path()).unwrap();

        let loaded = SnapzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_reads_config_without_reindex_flag() {
        let config: SnapzConfig =
            serde_json::from_str(r#"{ "secondaryIndexes": ["color", "shape"] }"#).unwrap();
        assert!(config.is_secondary("color"));
        assert!(config.is_secondary("shape"));
        assert!(!config.is_secondary("status"));
        assert!(!config.eager_reindex);
    }

    #[test]
    fn test_flag_omitted_from_json_when_unset() {
        let json = serde_json::to_string(&SnapzConfig::default()).unwrap();
        assert!(!json.contains("eagerReindex"));
    }
}
