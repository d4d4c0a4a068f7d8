//! User settings for the hotel manager
//!
//! Manages file names for the allocation snapshot and its backups, the
//! menu banner, and whether operations are written to the audit log.

use serde::{Deserialize, Serialize};

use super::paths::HotelPaths;
use crate::error::HotelError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Hotel name shown in the menu banner
    #[serde(default = "default_hotel_name")]
    pub hotel_name: String,

    /// File name of the live allocation snapshot
    #[serde(default = "default_allocation_file_name")]
    pub allocation_file_name: String,

    /// Base file name for backups; a timestamp is appended before the extension
    #[serde(default = "default_backup_file_name")]
    pub backup_file_name: String,

    /// Whether mutations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_hotel_name() -> String {
    "LANGHAM HOTEL".to_string()
}

fn default_allocation_file_name() -> String {
    "lhms_allocations.txt".to_string()
}

fn default_backup_file_name() -> String {
    "lhms_allocations_backup.txt".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotel_name: default_hotel_name(),
            allocation_file_name: default_allocation_file_name(),
            backup_file_name: default_backup_file_name(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &HotelPaths) -> Result<Self, HotelError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| HotelError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| HotelError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HotelPaths) -> Result<(), HotelError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HotelError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| HotelError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// File names must be bare names that stay inside the data directory
    pub fn validate(&self) -> Result<(), HotelError> {
        for (field, value) in [
            ("allocation_file_name", &self.allocation_file_name),
            ("backup_file_name", &self.backup_file_name),
        ] {
            let name = value.trim();
            if name.is_empty()
                || name == "."
                || name == ".."
                || value.contains('/')
                || value.contains('\\')
            {
                return Err(HotelError::Config(format!(
                    "{} must be a plain file name, got '{}'",
                    field, value
                )));
            }
        }

        if self.allocation_file_name == self.backup_file_name {
            return Err(HotelError::Config(
                "allocation_file_name and backup_file_name must differ".into(),
            ));
        }

        Ok(())
    }
}
