//! Hotel service
//!
//! Ties the in-memory state to the snapshot file, backup rotation and the
//! audit log. Every mutation is traced and, when enabled, audited.

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditEvent, AuditLogger};
use crate::backup::{BackupInfo, BackupManager, RotateReport};
use crate::config::{HotelPaths, Settings};
use crate::error::HotelResult;
use crate::models::{Allocation, Customer, Room, RoomNumber, RoomStatus};
use crate::state::{BulkOutcome, HotelState};
use crate::storage::{Clock, LedgerFile, SaveReport, SnapshotRecord, SystemClock};

/// Service for room and allocation management
pub struct HotelService {
    state: HotelState,
    ledger_file: LedgerFile,
    backups: BackupManager,
    audit: Option<AuditLogger>,
    clock: Box<dyn Clock>,
}

impl HotelService {
    /// Create a service for the configured data directory
    pub fn new(paths: &HotelPaths, settings: &Settings) -> HotelResult<Self> {
        paths.ensure_directories()?;

        let live = paths.allocations_file(&settings.allocation_file_name);
        let template = paths.backup_template(&settings.backup_file_name);

        Ok(Self {
            state: HotelState::new(),
            ledger_file: LedgerFile::new(live.clone()),
            backups: BackupManager::new(live, template),
            audit: settings
                .audit_enabled
                .then(|| AuditLogger::new(paths.audit_log())),
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the clock used to timestamp saves and backups
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &HotelState {
        &self.state
    }

    pub fn ledger_file(&self) -> &LedgerFile {
        &self.ledger_file
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Add a room
    pub fn add_room(&mut self, number: RoomNumber) -> HotelResult<Room> {
        let room = self.state.add_room(number)?;
        info!(room = %number, "room added");
        self.record(AuditEvent::RoomAdded(&room));
        Ok(room)
    }

    /// Remove an unoccupied room
    pub fn remove_room(&mut self, number: RoomNumber) -> HotelResult<Room> {
        let room = self.state.remove_room(number)?;
        info!(room = %number, "room removed");
        self.record(AuditEvent::RoomRemoved(&room));
        Ok(room)
    }

    pub fn find_room(&self, number: RoomNumber) -> HotelResult<RoomStatus<'_>> {
        debug!(room = %number, "room lookup");
        self.state.find_room(number)
    }

    /// Allocate a free room to a customer
    pub fn allocate(&mut self, number: RoomNumber, customer: Customer) -> HotelResult<Allocation> {
        let allocation = self.state.allocate(number, customer)?;
        info!(room = %number, customer = %allocation.customer.number, "room allocated");
        self.record(AuditEvent::Allocated(&allocation));
        Ok(allocation)
    }

    /// Release a room's allocation
    pub fn deallocate(&mut self, number: RoomNumber) -> HotelResult<Allocation> {
        let allocation = self.state.deallocate(number)?;
        info!(room = %number, "room deallocated");
        self.record(AuditEvent::Deallocated(&allocation));
        Ok(allocation)
    }

    pub fn check_remove_capacity(&self, requested: usize) -> HotelResult<()> {
        self.state.check_remove_capacity(requested)
    }

    pub fn check_allocate_capacity(&self, requested: usize) -> HotelResult<()> {
        self.state.check_allocate_capacity(requested)
    }

    pub fn check_deallocate_capacity(&self, requested: usize) -> HotelResult<()> {
        self.state.check_deallocate_capacity(requested)
    }

    /// Add several rooms; each is committed on its own
    pub fn add_rooms(&mut self, numbers: &[RoomNumber]) -> BulkOutcome<Room> {
        let outcome = self.state.add_rooms(numbers.iter().copied());
        for room in &outcome.committed {
            self.record(AuditEvent::RoomAdded(room));
        }
        log_bulk("add", &outcome);
        outcome
    }

    /// Remove several rooms after the count check
    pub fn remove_rooms(&mut self, numbers: &[RoomNumber]) -> HotelResult<BulkOutcome<Room>> {
        let outcome = self.state.remove_rooms(numbers)?;
        for room in &outcome.committed {
            self.record(AuditEvent::RoomRemoved(room));
        }
        log_bulk("remove", &outcome);
        Ok(outcome)
    }

    /// Allocate several rooms after the count check
    pub fn allocate_rooms(
        &mut self,
        requests: Vec<(RoomNumber, Customer)>,
    ) -> HotelResult<BulkOutcome<Allocation>> {
        let outcome = self.state.allocate_rooms(requests)?;
        for allocation in &outcome.committed {
            self.record(AuditEvent::Allocated(allocation));
        }
        log_bulk("allocate", &outcome);
        Ok(outcome)
    }

    /// Deallocate several rooms after the count check
    pub fn deallocate_rooms(&mut self, numbers: &[RoomNumber]) -> HotelResult<BulkOutcome<Allocation>> {
        let outcome = self.state.deallocate_rooms(numbers)?;
        for allocation in &outcome.committed {
            self.record(AuditEvent::Deallocated(allocation));
        }
        log_bulk("deallocate", &outcome);
        Ok(outcome)
    }

    /// Write the current allocations to the snapshot file
    pub fn save(&self) -> HotelResult<SaveReport> {
        let report = self
            .ledger_file
            .save(self.state.ledger().as_slice(), self.clock.as_ref())?;
        info!(path = %report.path.display(), records = report.records, "allocations saved");
        self.record(AuditEvent::Saved(&report));
        Ok(report)
    }

    /// Read the raw snapshot text
    pub fn load(&self) -> HotelResult<String> {
        self.ledger_file.load()
    }

    /// Read and parse the snapshot
    pub fn load_records(&self) -> HotelResult<Vec<SnapshotRecord>> {
        self.ledger_file.load_records()
    }

    /// Rotate the snapshot into a timestamped backup
    pub fn rotate(&self) -> HotelResult<RotateReport> {
        let report = self.backups.rotate(self.clock.as_ref())?;
        info!(backup = %report.backup_path.display(), bytes = report.bytes, "snapshot rotated");
        self.record(AuditEvent::Rotated {
            live: self.backups.live_path(),
            report: &report,
        });
        Ok(report)
    }

    pub fn list_backups(&self) -> HotelResult<Vec<BackupInfo>> {
        self.backups.list_backups()
    }

    /// Most recent audit entries, oldest first
    pub fn recent_audit(&self, count: usize) -> HotelResult<Vec<AuditEntry>> {
        match &self.audit {
            Some(logger) => logger.read_recent(count),
            None => Ok(Vec::new()),
        }
    }

    /// The mutation has already happened, so a failing audit write is only reported
    fn record(&self, event: AuditEvent<'_>) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.record(event) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}

fn log_bulk<T>(action: &str, outcome: &BulkOutcome<T>) {
    info!(
        action,
        committed = outcome.committed.len(),
        failed = outcome.failed.len(),
        "bulk request processed"
    );
    for (room, err) in &outcome.failed {
        warn!(action, room = %room, error = %err, "bulk item rejected");
    }
}
