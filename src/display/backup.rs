//! Backup display formatting

use crate::backup::BackupInfo;

/// Format the backup listing, newest first
pub fn format_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return "No backups found.\nCreate one with: hotel backup\n".to_string();
    }

    let mut output = String::from("Available Backups\n=================\n\n");
    for (i, backup) in backups.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} ({}, {})\n",
            i + 1,
            backup.filename,
            backup.created_at.format("%Y-%m-%d %H:%M:%S"),
            format_size(backup.size_bytes),
        ));
    }
    output.push_str(&format!("\nTotal: {} backup(s)\n", backups.len()));
    output
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
