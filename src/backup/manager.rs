//! Backup manager for the allocation snapshot
//!
//! Rotation moves the live snapshot into a backup named after the backup
//! template with a second-granularity timestamp spliced in before the
//! extension, e.g. `lhms_allocations_backup_20241127_143022.txt`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{HotelError, HotelResult};
use crate::storage::clock::Clock;
use crate::storage::file_io::copy_atomic;

/// Timestamp layout embedded in backup file names
pub const BACKUP_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Steps of a single rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStage {
    LiveExists,
    Copying,
    CopiedOk,
    SourceDeleted,
}

impl fmt::Display for RotationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiveExists => write!(f, "checking the live file"),
            Self::Copying => write!(f, "copying to the backup"),
            Self::CopiedOk => write!(f, "removing the live file"),
            Self::SourceDeleted => write!(f, "done"),
        }
    }
}

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Timestamp taken from the file name
    pub created_at: NaiveDateTime,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Outcome of a successful rotation
#[derive(Debug, Clone)]
pub struct RotateReport {
    pub backup_path: PathBuf,
    pub created_at: NaiveDateTime,
    pub bytes: u64,
    /// A backup from the same second already existed and was replaced
    pub replaced_existing: bool,
    pub stage: RotationStage,
}

/// Rotates the live snapshot into timestamped backups
pub struct BackupManager {
    /// The live snapshot
    live_path: PathBuf,
    /// Base name of backups, e.g. `.../lhms_allocations_backup.txt`
    template: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(live_path: PathBuf, template: PathBuf) -> Self {
        Self {
            live_path,
            template,
        }
    }

    pub fn live_path(&self) -> &Path {
        &self.live_path
    }

    /// Directory the backups are written to
    pub fn backup_dir(&self) -> &Path {
        self.template
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Compute the backup path for a given instant
    pub fn backup_path_for(&self, at: NaiveDateTime) -> PathBuf {
        let (stem, extension) = self.template_parts();
        let stamp = at.format(BACKUP_STAMP_FORMAT);
        let filename = match extension {
            Some(ext) => format!("{}_{}.{}", stem, stamp, ext),
            None => format!("{}_{}", stem, stamp),
        };
        self.backup_dir().join(filename)
    }

    /// Move the live snapshot into a new backup
    ///
    /// The live file is only removed once the backup is completely written.
    /// If removing it fails, the new backup is discarded again so the live
    /// file stays the single copy.
    pub fn rotate<C>(&self, clock: &C) -> HotelResult<RotateReport>
    where
        C: Clock + ?Sized,
    {
        self.rotate_with(clock, |live| fs::remove_file(live))
    }

    fn rotate_with<C, F>(&self, clock: &C, remove_live: F) -> HotelResult<RotateReport>
    where
        C: Clock + ?Sized,
        F: FnOnce(&Path) -> io::Result<()>,
    {
        let mut stage = RotationStage::LiveExists;

        if !self.live_path.is_file() {
            return Err(HotelError::FileMissing(self.live_path.display().to_string()));
        }

        let created_at = clock.now();
        let backup_path = self.backup_path_for(created_at);

        let replaced_existing = backup_path.exists();
        if replaced_existing {
            warn!(path = %backup_path.display(), "replacing backup from the same second");
            fs::remove_file(&backup_path).map_err(|e| stage_error(stage, e.into()))?;
        }

        stage = RotationStage::Copying;
        let bytes = copy_atomic(&self.live_path, &backup_path).map_err(|e| match e {
            HotelError::FileMissing(_) => e,
            other => stage_error(stage, other),
        })?;

        stage = RotationStage::CopiedOk;
        if let Err(e) = remove_live(&self.live_path) {
            let _ = fs::remove_file(&backup_path);
            return Err(stage_error(stage, e.into()));
        }

        stage = RotationStage::SourceDeleted;
        debug!(backup = %backup_path.display(), bytes, "rotation complete");

        Ok(RotateReport {
            backup_path,
            created_at,
            bytes,
            replaced_existing,
            stage,
        })
    }

    /// List all backups produced from the template, newest first
    pub fn list_backups(&self) -> HotelResult<Vec<BackupInfo>> {
        let dir = self.backup_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir)
            .map_err(|e| HotelError::Io(format!("Failed to read backup directory: {}", e)))?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| HotelError::Io(format!("Failed to read directory entry: {}", e)))?;

            if let Some(info) = self.parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> HotelResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    fn parse_backup_info(&self, path: &Path) -> Option<BackupInfo> {
        let filename = path.file_name()?.to_str()?.to_string();
        let (stem, extension) = self.template_parts();

        let rest = filename.strip_prefix(stem.as_str())?.strip_prefix('_')?;
        let stamp = match &extension {
            Some(ext) => rest.strip_suffix(ext.as_str())?.strip_suffix('.')?,
            None => rest,
        };
        let created_at = parse_backup_timestamp(stamp)?;

        let size_bytes = fs::metadata(path).ok().filter(|m| m.is_file())?.len();

        Some(BackupInfo {
            filename,
            path: path.to_path_buf(),
            created_at,
            size_bytes,
        })
    }

    fn template_parts(&self) -> (String, Option<String>) {
        let stem = self
            .template
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "backup".to_string());
        let extension = self
            .template
            .extension()
            .map(|e| e.to_string_lossy().into_owned());
        (stem, extension)
    }
}

fn stage_error(stage: RotationStage, err: HotelError) -> HotelError {
    HotelError::Io(format!("Backup failed while {}: {}", stage, err))
}

/// Parse the `YYYYMMDD_HHMMSS` part of a backup file name
fn parse_backup_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    if stamp.len() != 15 {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, BACKUP_STAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::clock::FixedClock;
    use crate::storage::file_io::temp_path_for;
    use chrono::{Datelike, NaiveDate};
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 27)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = BackupManager::new(
            temp_dir.path().join("lhms_allocations.txt"),
            temp_dir.path().join("lhms_allocations_backup.txt"),
        );
        (manager, temp_dir)
    }

    #[test]
    fn test_backup_path_for() {
        let (manager, temp) = create_test_manager();
        assert_eq!(
            manager.backup_path_for(at(14, 30, 22)),
            temp.path().join("lhms_allocations_backup_20241127_143022.txt")
        );
    }

    #[test]
    fn test_rotate_without_live_file() {
        let (manager, temp) = create_test_manager();

        let err = manager.rotate(&FixedClock(at(9, 0, 0))).unwrap_err();
        assert!(matches!(err, HotelError::FileMissing(_)));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rotate_moves_live_file_into_backup() {
        let (manager, _temp) = create_test_manager();
        fs::write(manager.live_path(), "Room Number: 102\n").unwrap();

        let report = manager.rotate(&FixedClock(at(14, 30, 22))).unwrap();

        assert!(!manager.live_path().exists());
        assert_eq!(report.stage, RotationStage::SourceDeleted);
        assert!(!report.replaced_existing);
        assert_eq!(fs::read_to_string(&report.backup_path).unwrap(), "Room Number: 102\n");

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].size_bytes, report.bytes);
    }

    #[test]
    fn test_rotate_replaces_same_second_backup() {
        let (manager, _temp) = create_test_manager();
        let clock = FixedClock(at(8, 15, 0));
        fs::write(manager.backup_path_for(clock.0), "stale").unwrap();
        fs::write(manager.live_path(), "fresh").unwrap();

        let report = manager.rotate(&clock).unwrap();
        assert!(report.replaced_existing);
        assert_eq!(fs::read_to_string(&report.backup_path).unwrap(), "fresh");
        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_rotate_copy_failure_leaves_live_file() {
        let (manager, _temp) = create_test_manager();
        let clock = FixedClock(at(14, 30, 22));
        fs::write(manager.live_path(), "Room Number: 102\n").unwrap();

        let backup_path = manager.backup_path_for(clock.0);
        fs::create_dir(temp_path_for(&backup_path)).unwrap();

        let err = manager.rotate(&clock).unwrap_err();
        assert!(matches!(err, HotelError::Io(ref msg) if msg.contains("copying to the backup")));
        assert_eq!(fs::read_to_string(manager.live_path()).unwrap(), "Room Number: 102\n");
        assert!(!backup_path.exists());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_rotate_discards_backup_when_live_file_cannot_be_removed() {
        let (manager, _temp) = create_test_manager();
        let clock = FixedClock(at(14, 30, 22));
        fs::write(manager.live_path(), "Room Number: 102\n").unwrap();

        let err = manager
            .rotate_with(&clock, |_| {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
            })
            .unwrap_err();

        assert!(matches!(err, HotelError::Io(ref msg) if msg.contains("removing the live file")));
        assert_eq!(fs::read_to_string(manager.live_path()).unwrap(), "Room Number: 102\n");
        assert!(!manager.backup_path_for(clock.0).exists());
        assert!(!temp_path_for(&manager.backup_path_for(clock.0)).exists());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_list_backups_newest_first_and_ignores_strangers() {
        let (manager, temp) = create_test_manager();

        for (clock, body) in [(at(1, 0, 0), "one"), (at(3, 0, 0), "three"), (at(2, 0, 0), "two")] {
            fs::write(manager.live_path(), body).unwrap();
            manager.rotate(&FixedClock(clock)).unwrap();
        }
        fs::write(temp.path().join("lhms_allocations_backup_notes.txt"), "x").unwrap();
        fs::write(temp.path().join("unrelated.txt"), "x").unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 3);
        assert_eq!(backups[0].created_at, at(3, 0, 0));
        assert_eq!(backups[2].created_at, at(1, 0, 0));

        let latest = manager.latest_backup().unwrap().unwrap();
        assert_eq!(fs::read_to_string(latest.path).unwrap(), "three");
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _temp) = create_test_manager();
        assert!(manager.list_backups().unwrap().is_empty());
        assert!(manager.latest_backup().unwrap().is_none());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let parsed = parse_backup_timestamp("20251127_143022").unwrap();
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.month(), 11);
        assert_eq!(parsed.day(), 27);

        assert!(parse_backup_timestamp("20251127-143022").is_none());
        assert!(parse_backup_timestamp("notes").is_none());
    }

    #[test]
    fn test_template_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let manager = BackupManager::new(
            temp_dir.path().join("live"),
            temp_dir.path().join("archive"),
        );
        assert_eq!(
            manager.backup_path_for(at(0, 0, 1)),
            temp_dir.path().join("archive_20241127_000001")
        );
    }
}
