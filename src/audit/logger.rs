//! Append-only audit log
//!
//! One JSON object per line. A line that cannot be parsed is skipped with a
//! warning so a single damaged record does not hide the rest of the history.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{HotelError, HotelResult};
use crate::storage::read_text_required;

use super::entry::AuditEntry;
use super::event::AuditEvent;

/// Records hotel events in the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one event and return the entry that was written
    pub fn record(&self, event: AuditEvent<'_>) -> HotelResult<AuditEntry> {
        let entry = AuditEntry::from(event);
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| HotelError::Io(format!("Failed to open audit log: {}", e)))?;
        file.write_all(line.as_bytes())
            .map_err(|e| HotelError::Io(format!("Failed to append to audit log: {}", e)))?;

        Ok(entry)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> HotelResult<Vec<AuditEntry>> {
        let text = match read_text_required(&self.log_path) {
            Ok(text) => text,
            Err(HotelError::FileMissing(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut entries: Vec<AuditEntry> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable audit record");
                    None
                }
            })
            .collect();

        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}
