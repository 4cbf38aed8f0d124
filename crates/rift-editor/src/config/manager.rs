//! Loading and saving the editor configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::EditorConfig;

/// Shared configuration manager type
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
}

/// Owns the configuration and the file it lives in
pub struct ConfigManager {
    config: EditorConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Load from the OS config directory, falling back to defaults
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Load from an explicit file, falling back to defaults
    pub fn with_path(config_path: PathBuf) -> Self {
        let (config, dirty) = match Self::load_from_path(&config_path) {
            Ok(mut config) => {
                tracing::info!("Loaded config from {:?}", config_path);
                let dirty = config.overlay.sanitize();
                (config, dirty)
            }
            Err(ConfigError::Io(_)) => {
                tracing::info!("No config file found, using defaults");
                (EditorConfig::new(), false)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                (EditorConfig::new(), false)
            }
        };

        Self {
            config,
            config_path,
            dirty,
        }
    }

    fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rift-editor")
            .join("config.ron")
    }

    fn load_from_path(path: &Path) -> Result<EditorConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Mutable access, marks the configuration dirty
    pub fn config_mut(&mut self) -> &mut EditorConfig {
        self.dirty = true;
        &mut self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write to disk if there are unsaved changes
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.config_path, content)?;

        tracing::info!("Saved config to {:?}", self.config_path);
        self.dirty = false;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = EditorConfig::new();
        self.dirty = true;
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::SelectionMode;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rift-editor-test-{}-{}", std::process::id(), name))
            .join("config.ron")
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let manager = ConfigManager::with_path(temp_path("missing"));
        assert_eq!(*manager.config(), EditorConfig::new());
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("roundtrip");
        let mut manager = ConfigManager::with_path(path.clone());
        manager.config_mut().selection.default_mode = SelectionMode::Point;
        manager.config_mut().overlay.show_wireframe = false;
        assert!(manager.is_dirty());

        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = ConfigManager::with_path(path.clone());
        assert_eq!(reloaded.config().selection.default_mode, SelectionMode::Point);
        assert!(!reloaded.config().overlay.show_wireframe);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "(version: ").unwrap();

        let manager = ConfigManager::with_path(path.clone());
        assert_eq!(*manager.config(), EditorConfig::new());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_rejected_values_mark_dirty() {
        let path = temp_path("sanitize");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "(version: 1, overlay: (point_circle_radius: 0.0))").unwrap();

        let manager = ConfigManager::with_path(path.clone());
        assert!(manager.is_dirty());
        assert_eq!(manager.config().overlay.point_circle_radius, 1.5);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
