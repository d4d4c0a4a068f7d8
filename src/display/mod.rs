//! Display formatting for terminal output
//!
//! Provides utilities for formatting rooms, allocations and backups for
//! terminal display.

pub mod allocation;
pub mod backup;
pub mod room;

pub use allocation::{format_allocation_list, format_snapshot_summary};
pub use backup::{format_backup_list, format_size};
pub use room::format_room_list;
