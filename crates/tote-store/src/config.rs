//! Cart store configuration.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tote_storage::FileStorage;

/// Slot key the cart is persisted under.
pub const DEFAULT_SLOT_KEY: &str = "cart-storage";

/// Cart store configuration.
///
/// ```toml
/// slot_key = "cart-storage"
/// persist = true
/// storage_dir = "/data/app/storage"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage slot holding the serialized cart.
    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    /// Read the slot at startup and write it after every mutation.
    ///
    /// When `false` the cart lives in memory only.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Directory for [`FileStorage`], if file-backed storage is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: default_slot_key(),
            persist: true,
            storage_dir: None,
        }
    }
}

impl StoreConfig {
    /// Load config from a TOML or JSON file (chosen by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                StoreError::Config(format!("failed to parse JSON {}: {e}", path.display()))
            })?
        } else {
            Self::parse_toml(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, StoreError> {
        let config = Self::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Memory-only configuration.
    pub fn in_memory() -> Self {
        Self {
            persist: false,
            ..Self::default()
        }
    }

    /// Set the slot key.
    pub fn with_slot_key(mut self, slot_key: impl Into<String>) -> Self {
        self.slot_key = slot_key.into();
        self
    }

    /// File storage rooted at `storage_dir`, if one is configured.
    pub fn file_storage(&self) -> Option<FileStorage> {
        self.storage_dir.as_ref().map(|dir| FileStorage::new(dir.clone()))
    }

    fn parse_toml(content: &str) -> Result<Self, StoreError> {
        toml::from_str(content).map_err(|e| StoreError::Config(format!("failed to parse TOML: {e}")))
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.slot_key.trim().is_empty() {
            return Err(StoreError::Config("slot_key must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.slot_key, "cart-storage");
        assert!(config.persist);
        assert!(config.file_storage().is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = StoreConfig::from_toml_str(
            r#"
            slot_key = "guest-cart"
            persist = false
            storage_dir = "/tmp/tote"
            "#,
        )
        .unwrap();

        assert_eq!(config.slot_key, "guest-cart");
        assert!(!config.persist);
        assert_eq!(
            config.file_storage().map(|s| s.dir().to_path_buf()),
            Some(PathBuf::from("/tmp/tote"))
        );
    }

    #[test]
    fn test_empty_slot_key_is_rejected() {
        assert!(matches!(
            StoreConfig::from_toml_str(r#"slot_key = " ""#),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("store.json");
        std::fs::write(&json_path, r#"{"slot_key":"from-json"}"#).unwrap();
        assert_eq!(StoreConfig::load(&json_path).unwrap().slot_key, "from-json");

        let toml_path = dir.path().join("store.toml");
        std::fs::write(&toml_path, "slot_key = \"from-toml\"\n").unwrap();
        assert_eq!(StoreConfig::load(&toml_path).unwrap().slot_key, "from-toml");

        assert!(StoreConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
