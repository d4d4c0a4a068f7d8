//! Path management for the hotel manager
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory passed by the caller (`--data-dir`)
//! 2. `HOTEL_CLI_DATA_DIR` environment variable (if set)
//! 3. The user's Documents directory
//! 4. The user's home directory

use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::error::HotelError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "HOTEL_CLI_DATA_DIR";

/// Manages all paths used by the hotel manager
#[derive(Debug, Clone)]
pub struct HotelPaths {
    /// Directory holding the allocation file, its backups and the audit log
    base_dir: PathBuf,
}

impl HotelPaths {
    /// Create a new HotelPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither a Documents nor a home directory can be
    /// determined.
    pub fn new() -> Result<Self, HotelError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create HotelPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve paths, preferring an explicit directory when one is given
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, HotelError> {
        match explicit {
            Some(dir) => Ok(Self::with_base_dir(dir)),
            None => Self::new(),
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("hotel-cli.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the live allocation file for the given file name
    pub fn allocations_file(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Get the backup name template; timestamps are spliced in before the extension
    pub fn backup_template(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), HotelError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HotelError::Io(format!("Failed to create data directory: {}", e)))
    }
}

/// Documents folder if the platform knows one, otherwise `~/Documents`
fn resolve_default_path() -> Result<PathBuf, HotelError> {
    let dirs = UserDirs::new()
        .ok_or_else(|| HotelError::Config("Could not determine home directory".into()))?;

    Ok(dirs
        .document_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join("Documents")))
}
