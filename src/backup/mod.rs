//! Backup rotation for the allocation snapshot
//!
//! Rotation archives the live snapshot and clears it:
//!
//! `LiveExists -> Copying -> CopiedOk -> SourceDeleted`
//!
//! Any I/O failure stops the sequence. The live file is never removed before
//! its backup is fully written.
//!
//! # Example
//!
//! ```rust,ignore
//! use hotel::backup::BackupManager;
//! use hotel::storage::SystemClock;
//!
//! let manager = BackupManager::new(live_path, template_path);
//! let report = manager.rotate(&SystemClock)?;
//! println!("Backup written to {}", report.backup_path.display());
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager, RotateReport, RotationStage, BACKUP_STAMP_FORMAT};
