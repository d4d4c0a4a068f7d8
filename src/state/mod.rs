//! In-memory hotel state
//!
//! [`HotelState`] is the single root object owning the room registry and the
//! allocation ledger. It lives for the duration of the process; nothing here
//! touches the file system.

pub mod ledger;
pub mod registry;

pub use ledger::AllocationLedger;
pub use registry::{RoomRegistry, Rooms};

use crate::error::{HotelError, HotelResult};
use crate::models::{Allocation, Customer, Room, RoomNumber, RoomStatus};

/// Result of a bulk request whose items are committed independently
#[derive(Debug)]
pub struct BulkOutcome<T> {
    /// Items that were applied
    pub committed: Vec<T>,
    /// Items that were rejected, with the reason
    pub failed: Vec<(RoomNumber, HotelError)>,
}

impl<T> Default for BulkOutcome<T> {
    fn default() -> Self {
        Self {
            committed: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BulkOutcome<T> {
    /// Returns true if every item was applied
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rooms plus their allocations
#[derive(Debug, Clone, Default)]
pub struct HotelState {
    rooms: RoomRegistry,
    ledger: AllocationLedger,
}

impl HotelState {
    /// Create an empty hotel
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn ledger(&self) -> &AllocationLedger {
        &self.ledger
    }

    pub fn add_room(&mut self, number: RoomNumber) -> HotelResult<Room> {
        self.rooms.add(number)
    }

    pub fn remove_room(&mut self, number: RoomNumber) -> HotelResult<Room> {
        self.rooms.remove(number, &self.ledger)
    }

    pub fn find_room(&self, number: RoomNumber) -> HotelResult<RoomStatus<'_>> {
        self.rooms.find(number, &self.ledger)
    }

    /// All rooms with occupancy, in insertion order
    pub fn list_rooms(&self) -> Rooms<'_> {
        self.rooms.list(&self.ledger)
    }

    pub fn allocate(&mut self, number: RoomNumber, customer: Customer) -> HotelResult<Allocation> {
        self.ledger.allocate(&self.rooms, number, customer)
    }

    pub fn deallocate(&mut self, number: RoomNumber) -> HotelResult<Allocation> {
        self.ledger.deallocate(number)
    }

    /// Active allocations in insertion order
    pub fn list_allocations(&self) -> std::slice::Iter<'_, Allocation> {
        self.ledger.list()
    }

    pub fn available_rooms(&self) -> usize {
        self.rooms.available_count(&self.ledger)
    }

    pub fn check_remove_capacity(&self, requested: usize) -> HotelResult<()> {
        self.rooms.check_remove_capacity(requested)
    }

    pub fn check_allocate_capacity(&self, requested: usize) -> HotelResult<()> {
        self.ledger.check_allocate_capacity(&self.rooms, requested)
    }

    pub fn check_deallocate_capacity(&self, requested: usize) -> HotelResult<()> {
        self.ledger.check_deallocate_capacity(requested)
    }

    pub fn add_rooms<I>(&mut self, numbers: I) -> BulkOutcome<Room>
    where
        I: IntoIterator<Item = RoomNumber>,
    {
        self.rooms.add_many(numbers)
    }

    pub fn remove_rooms(&mut self, numbers: &[RoomNumber]) -> HotelResult<BulkOutcome<Room>> {
        self.rooms.remove_many(numbers, &self.ledger)
    }

    pub fn allocate_rooms(
        &mut self,
        requests: Vec<(RoomNumber, Customer)>,
    ) -> HotelResult<BulkOutcome<Allocation>> {
        self.ledger.allocate_many(&self.rooms, requests)
    }

    pub fn deallocate_rooms(&mut self, numbers: &[RoomNumber]) -> HotelResult<BulkOutcome<Allocation>> {
        self.ledger.deallocate_many(numbers)
    }
}
