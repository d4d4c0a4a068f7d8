//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave a half-written file
//! behind on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::HotelError;

/// Sibling path used while a file is being written
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("file"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The destination is either completely replaced or left untouched.
pub fn write_atomic<P, B>(path: P, contents: B) -> Result<(), HotelError>
where
    P: AsRef<Path>,
    B: AsRef<[u8]>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            HotelError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, contents.as_ref()).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| {
            HotelError::Io(format!("Failed to move {} into place: {}", path.display(), e))
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync(temp_path: &Path, contents: &[u8]) -> Result<(), HotelError> {
    let file = File::create(temp_path).map_err(|e| io_error("create", temp_path, e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| io_error("write", temp_path, e))?;
    writer.flush().map_err(|e| io_error("flush", temp_path, e))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| io_error("sync", temp_path, e))
}

/// Read a whole file as UTF-8 text, failing with `FileMissing` if it doesn't exist
pub fn read_text_required<P: AsRef<Path>>(path: P) -> Result<String, HotelError> {
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HotelError::FileMissing(path.display().to_string()),
        _ => io_error("open", path, e),
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| io_error("read", path, e))?;

    Ok(contents)
}

/// Copy a file so the destination only appears once it is complete
pub fn copy_atomic<P, Q>(from: P, to: Q) -> Result<u64, HotelError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let from = from.as_ref();

    let mut source = File::open(from).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HotelError::FileMissing(from.display().to_string()),
        _ => io_error("open", from, e),
    })?;

    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", from, e))?;

    write_atomic(to, &bytes)?;
    Ok(bytes.len() as u64)
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> HotelError {
    let reason = match err.kind() {
        ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => err.to_string(),
    };
    HotelError::Io(format!("Failed to {} {}: {}", action, path.display(), reason))
}
