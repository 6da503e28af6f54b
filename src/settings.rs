//! Persistent user settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::codec::{Codec, DEFAULT_LEVEL};
use crate::store::backup::DEFAULT_SUFFIX;
use crate::store::ExistingBackup;
use crate::transfer::Resolution;
use crate::util::Result;

/// How name collisions are decided during import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Ask for every colliding shape.
    #[default]
    Ask,
    Overwrite,
    Skip,
}

impl CollisionMode {
    /// Bulk resolution, `None` when the user must be asked.
    pub fn resolution(self) -> Option<Resolution> {
        match self {
            Self::Ask => None,
            Self::Overwrite => Some(Resolution::Overwrite),
            Self::Skip => Some(Resolution::Skip),
        }
    }
}

/// Settings that persist between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Codec
    pub compression_level: u32, // 0-9
    pub pretty_json: bool,

    // Import
    pub collision_policy: CollisionMode,

    // Backup
    pub backup: bool,
    pub backup_suffix: String,
    pub existing_backup: ExistingBackup,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_LEVEL,
            pretty_json: false,
            collision_policy: CollisionMode::Ask,
            backup: true,
            backup_suffix: DEFAULT_SUFFIX.to_string(),
            existing_backup: ExistingBackup::Keep,
        }
    }
}

impl Settings {
    /// Get settings file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("blendmaestro");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load settings from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        Ok(settings.sanitized())
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        match Self::path() {
            Some(p) => self.save_to(&p),
            None => Ok(()),
        }
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Codec configured with the compression level
    pub fn codec(&self) -> Codec {
        Codec::new(self.compression_level)
    }

    fn sanitized(mut self) -> Self {
        self.compression_level = self.compression_level.min(9);
        if self.backup_suffix.is_empty() || self.backup_suffix.contains(['/', '\\', '.']) {
            self.backup_suffix = DEFAULT_SUFFIX.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let s: Settings = serde_json::from_str(r#"{"collision_policy":"skip"}"#).unwrap();
        assert_eq!(s.collision_policy, CollisionMode::Skip);
        assert_eq!(s.compression_level, DEFAULT_LEVEL);
        assert!(s.backup);
        assert_eq!(s.collision_policy.resolution(), Some(Resolution::Skip));
        assert_eq!(CollisionMode::Ask.resolution(), None);
    }

    #[test]
    fn test_save_load_sanitizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/settings.json");

        let s = Settings {
            compression_level: 42,
            backup_suffix: "../x".into(),
            existing_backup: ExistingBackup::Fail,
            ..Default::default()
        };
        s.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.compression_level, 9);
        assert_eq!(loaded.backup_suffix, DEFAULT_SUFFIX);
        assert_eq!(loaded.existing_backup, ExistingBackup::Fail);
        assert_eq!(loaded.codec().level(), 9);
    }
}
