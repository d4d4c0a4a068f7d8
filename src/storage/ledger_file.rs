//! Allocation snapshot file
//!
//! Writes the current ledger as plain text, one block per allocation:
//!
//! ```text
//! ***************************************************************************
//! Room Number: 102
//! Customer Number: 5001
//! Customer Name: A. Smith
//! Current date and time is 2024-11-27 14:30:22
//! ```
//!
//! Every save replaces the whole file. Loading returns the raw text for
//! display; the snapshot is never fed back into the live state.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use super::clock::Clock;
use super::file_io::{read_text_required, write_atomic};
use crate::error::{HotelError, HotelResult};
use crate::models::{Allocation, Customer, CustomerNumber, RoomNumber};

/// Line separating allocation blocks
pub const BLOCK_DELIMITER: &str =
    "***************************************************************************";

/// Timestamp layout used inside the snapshot
pub const CAPTURE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ROOM_PREFIX: &str = "Room Number: ";
const CUSTOMER_NUMBER_PREFIX: &str = "Customer Number: ";
const CUSTOMER_NAME_PREFIX: &str = "Customer Name: ";
const CAPTURED_PREFIX: &str = "Current date and time is ";

/// What a successful save wrote
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub path: PathBuf,
    pub records: usize,
    pub captured_at: NaiveDateTime,
    pub bytes: usize,
}

/// One allocation block read back from a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub room_number: RoomNumber,
    pub customer: Customer,
    pub captured_at: NaiveDateTime,
}

/// The persisted allocation snapshot at a fixed path
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Overwrite the snapshot with every allocation
    ///
    /// An empty ledger is refused with `NoData` and the file is left as it was.
    pub fn save<C>(&self, allocations: &[Allocation], clock: &C) -> HotelResult<SaveReport>
    where
        C: Clock + ?Sized,
    {
        if allocations.is_empty() {
            return Err(HotelError::NoData("no allocations to save".into()));
        }

        let captured_at = clock.now();
        let text = render_snapshot(allocations, captured_at);
        write_atomic(&self.path, &text)?;

        debug!(path = %self.path.display(), records = allocations.len(), "snapshot written");

        Ok(SaveReport {
            path: self.path.clone(),
            records: allocations.len(),
            captured_at,
            bytes: text.len(),
        })
    }

    /// Read the raw snapshot text
    pub fn load(&self) -> HotelResult<String> {
        let text = read_text_required(&self.path)?;
        if text.is_empty() {
            return Err(HotelError::EmptyFile(self.path.display().to_string()));
        }
        Ok(text)
    }

    /// Read and parse the snapshot into records
    pub fn load_records(&self) -> HotelResult<Vec<SnapshotRecord>> {
        parse_snapshot(&self.load()?)
    }
}

/// Render allocations in the snapshot text format
pub fn render_snapshot(allocations: &[Allocation], captured_at: NaiveDateTime) -> String {
    let stamp = captured_at.format(CAPTURE_FORMAT).to_string();
    let mut out = String::new();

    for allocation in allocations {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", BLOCK_DELIMITER);
        let _ = writeln!(out, "{}{}", ROOM_PREFIX, allocation.room_number);
        let _ = writeln!(out, "{}{}", CUSTOMER_NUMBER_PREFIX, allocation.customer.number);
        let _ = writeln!(out, "{}{}", CUSTOMER_NAME_PREFIX, allocation.customer.name);
        let _ = writeln!(out, "{}{}", CAPTURED_PREFIX, stamp);
    }

    out
}

#[derive(Default)]
struct PartialRecord {
    room_number: Option<RoomNumber>,
    customer_number: Option<CustomerNumber>,
    customer_name: Option<String>,
    captured_at: Option<NaiveDateTime>,
}

impl PartialRecord {
    fn finish(self, line: usize) -> HotelResult<SnapshotRecord> {
        let missing = |field: &str| {
            HotelError::Storage(format!(
                "Snapshot block ending at line {} has no {}",
                line, field
            ))
        };

        Ok(SnapshotRecord {
            room_number: self.room_number.ok_or_else(|| missing("room number"))?,
            customer: Customer::new(
                self.customer_number.ok_or_else(|| missing("customer number"))?,
                self.customer_name.ok_or_else(|| missing("customer name"))?,
            ),
            captured_at: self.captured_at.ok_or_else(|| missing("timestamp"))?,
        })
    }
}

/// Parse snapshot text back into records
pub fn parse_snapshot(text: &str) -> HotelResult<Vec<SnapshotRecord>> {
    let mut records = Vec::new();
    let mut current: Option<PartialRecord> = None;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        last_line = line_no;
        let line = raw.trim_end();

        if line.is_empty() {
            continue;
        }

        if line == BLOCK_DELIMITER {
            if let Some(done) = current.take() {
                records.push(done.finish(line_no - 1)?);
            }
            current = Some(PartialRecord::default());
            continue;
        }

        let record = current.as_mut().ok_or_else(|| {
            HotelError::Storage(format!("Line {} appears before the first block", line_no))
        })?;
        let bad_value = |what: &str| {
            HotelError::Storage(format!("Invalid {} on line {}", what, line_no))
        };

        if let Some(value) = line.strip_prefix(ROOM_PREFIX) {
            record.room_number = Some(value.parse().map_err(|_| bad_value("room number"))?);
        } else if let Some(value) = line.strip_prefix(CUSTOMER_NUMBER_PREFIX) {
            record.customer_number =
                Some(value.parse().map_err(|_| bad_value("customer number"))?);
        } else if let Some(value) = line.strip_prefix(CUSTOMER_NAME_PREFIX) {
            record.customer_name = Some(value.to_string());
        } else if let Some(value) = line.strip_prefix(CAPTURED_PREFIX) {
            let parsed = NaiveDateTime::parse_from_str(value.trim(), CAPTURE_FORMAT)
                .map_err(|_| bad_value("timestamp"))?;
            record.captured_at = Some(parsed);
        } else {
            return Err(HotelError::Storage(format!(
                "Unrecognised line {}: '{}'",
                line_no, line
            )));
        }
    }

    if let Some(done) = current {
        records.push(done.finish(last_line)?);
    }

    Ok(records)
}
