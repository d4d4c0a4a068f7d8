//! Hotel events worth an audit record

use std::path::Path;

use crate::backup::RotateReport;
use crate::models::{Allocation, Room};
use crate::storage::SaveReport;

/// Something that changed the hotel's rooms, allocations or files
#[derive(Debug, Clone, Copy)]
pub enum AuditEvent<'a> {
    RoomAdded(&'a Room),
    RoomRemoved(&'a Room),
    Allocated(&'a Allocation),
    Deallocated(&'a Allocation),
    Saved(&'a SaveReport),
    Rotated {
        live: &'a Path,
        report: &'a RotateReport,
    },
}
