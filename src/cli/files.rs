//! File-oriented commands
//!
//! Save, show and backup are reachable both from the menu and as direct
//! subcommands. The menu reports every outcome as text and carries on;
//! the subcommands propagate failures so the process exits non-zero.

use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::backup::RotateReport;
use crate::config::{HotelPaths, Settings};
use crate::display::{format_backup_list, format_size, format_snapshot_summary};
use crate::error::{HotelError, HotelResult};
use crate::services::HotelService;
use crate::storage::SaveReport;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Menu text for the outcome of a save
pub fn describe_save(result: HotelResult<SaveReport>) -> String {
    match result {
        Ok(report) => format!(
            "File saved as '{}' under {}",
            file_name(&report.path),
            report
                .path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        ),
        Err(HotelError::NoData(_)) => "No allocations to save.".to_string(),
        Err(e) => format!("Error writing to file: {}", e),
    }
}

/// Menu text for the outcome of reading the snapshot
pub fn describe_show(result: HotelResult<String>) -> String {
    match result {
        Ok(content) => content,
        Err(HotelError::FileMissing(_)) => {
            "Error: Allocation file not found. Please save allocations first.".to_string()
        }
        Err(HotelError::EmptyFile(_)) => "No allocations found in file.".to_string(),
        Err(e) => format!("Error reading file: {}", e),
    }
}

/// Menu text for the outcome of a rotation
pub fn describe_backup(result: HotelResult<RotateReport>) -> String {
    match result {
        Ok(report) => {
            let mut output = String::new();
            if report.replaced_existing {
                output.push_str("Existing backup file found - will be replaced\n");
            }
            output.push_str(&format!(
                "Backup created successfully as '{}'\n",
                file_name(&report.backup_path)
            ));
            output.push_str("Original file has been deleted");
            output
        }
        Err(HotelError::FileMissing(_)) => {
            "Error: No allocation file found to backup.".to_string()
        }
        Err(e) => format!("Error during backup process: {}", e),
    }
}

/// Handle the `show` subcommand
pub fn handle_show_command(service: &HotelService, out: &mut impl Write) -> HotelResult<()> {
    let content = service.load()?;
    writeln!(out, "{}", content.trim_end())?;

    match service.load_records() {
        Ok(records) => writeln!(out, "\n{}", format_snapshot_summary(&records))?,
        Err(e) => warn!(error = %e, "snapshot could not be summarised"),
    }
    Ok(())
}

/// Handle the `backup` subcommand
pub fn handle_backup_command(service: &HotelService, out: &mut impl Write) -> HotelResult<()> {
    let report = service.rotate()?;

    if report.replaced_existing {
        writeln!(out, "Replaced a backup taken in the same second.")?;
    }
    writeln!(out, "Backup created: {}", file_name(&report.backup_path))?;
    writeln!(out, "Location: {}", report.backup_path.display())?;
    writeln!(out, "Size: {}", format_size(report.bytes))?;
    writeln!(out, "Removed: {}", service.backups().live_path().display())?;
    Ok(())
}

/// Handle the `backups` subcommand
pub fn handle_backups_command(service: &HotelService, out: &mut impl Write) -> HotelResult<()> {
    let backups = service.list_backups()?;
    write!(out, "{}", format_backup_list(&backups))?;
    Ok(())
}

/// Handle the `audit` subcommand
pub fn handle_audit_command(
    service: &HotelService,
    limit: usize,
    out: &mut impl Write,
) -> HotelResult<()> {
    let entries = service.recent_audit(limit)?;
    if entries.is_empty() {
        writeln!(out, "No audit entries recorded.")?;
        return Ok(());
    }

    for entry in &entries {
        writeln!(out, "{}", entry.format_human_readable())?;
    }
    Ok(())
}

/// Handle the `config` subcommand, optionally persisting the settings
pub fn handle_config_command(
    paths: &HotelPaths,
    settings: &Settings,
    write_settings: bool,
    out: &mut impl Write,
) -> HotelResult<()> {
    if write_settings {
        settings.save(paths)?;
        writeln!(out, "Settings written to {}", paths.settings_file().display())?;
        writeln!(out)?;
    }

    writeln!(out, "Hotel CLI Configuration")?;
    writeln!(out, "=======================")?;
    writeln!(out, "Data directory:  {}", paths.base_dir().display())?;
    writeln!(out, "Settings file:   {}", paths.settings_file().display())?;
    writeln!(
        out,
        "Allocation file: {}",
        paths.allocations_file(&settings.allocation_file_name).display()
    )?;
    writeln!(
        out,
        "Backup template: {}",
        paths.backup_template(&settings.backup_file_name).display()
    )?;
    writeln!(out, "Audit log:       {}", paths.audit_log().display())?;
    writeln!(out)?;
    writeln!(out, "Settings:")?;
    writeln!(out, "  Hotel name:    {}", settings.hotel_name)?;
    writeln!(out, "  Audit enabled: {}", settings.audit_enabled)?;
    Ok(())
}
