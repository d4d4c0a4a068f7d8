//! Storage layer for the hotel manager
//!
//! Provides the plain-text allocation snapshot, atomic file writes and the
//! clocks used to timestamp persisted files.

pub mod clock;
pub mod file_io;
pub mod ledger_file;

pub use clock::{Clock, FixedClock, SystemClock};
pub use file_io::{copy_atomic, read_text_required, write_atomic};
pub use ledger_file::{
    parse_snapshot, render_snapshot, LedgerFile, SaveReport, SnapshotRecord, BLOCK_DELIMITER,
};
