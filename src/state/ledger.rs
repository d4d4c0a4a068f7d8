//! Allocation ledger
//!
//! Owns the active allocations in insertion order. A room is occupied
//! exactly when the ledger holds an allocation for it.

use crate::error::{HotelError, HotelResult};
use crate::models::{Allocation, Customer, RoomNumber};

use super::registry::RoomRegistry;
use super::BulkOutcome;

/// The active allocations
#[derive(Debug, Clone, Default)]
pub struct AllocationLedger {
    allocations: Vec<Allocation>,
}

impl AllocationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a free room to a customer
    ///
    /// Fails if the room is unknown to `rooms`, already allocated, or the
    /// customer details are invalid. Nothing changes on failure.
    pub fn allocate(
        &mut self,
        rooms: &RoomRegistry,
        room_number: RoomNumber,
        customer: Customer,
    ) -> HotelResult<Allocation> {
        if !rooms.contains(room_number) {
            return Err(HotelError::room_not_found(room_number.get()));
        }

        if self.is_allocated(room_number) {
            return Err(HotelError::RoomOccupied(room_number.get()));
        }

        customer
            .validate()
            .map_err(|e| HotelError::InvalidInput(e.to_string()))?;

        let allocation = Allocation::new(room_number, customer);
        self.allocations.push(allocation.clone());
        Ok(allocation)
    }

    /// Release a room's allocation
    pub fn deallocate(&mut self, room_number: RoomNumber) -> HotelResult<Allocation> {
        let index = self
            .allocations
            .iter()
            .position(|a| a.room_number == room_number)
            .ok_or_else(|| HotelError::allocation_not_found(room_number.get()))?;

        Ok(self.allocations.remove(index))
    }

    /// Fail if a bulk allocation asks for more rooms than are free
    pub fn check_allocate_capacity(&self, rooms: &RoomRegistry, requested: usize) -> HotelResult<()> {
        let available = rooms.available_count(self);
        if requested > available {
            return Err(HotelError::InsufficientCapacity {
                action: "allocate",
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Fail if a bulk deallocation asks for more rooms than are allocated
    pub fn check_deallocate_capacity(&self, requested: usize) -> HotelResult<()> {
        if requested > self.allocations.len() {
            return Err(HotelError::InsufficientCapacity {
                action: "deallocate",
                requested,
                available: self.allocations.len(),
            });
        }
        Ok(())
    }

    /// Allocate several rooms after checking enough rooms are free
    ///
    /// Nothing is allocated when the count check fails. Past that point every
    /// item is committed independently; earlier items are not rolled back
    /// when a later one fails.
    pub fn allocate_many(
        &mut self,
        rooms: &RoomRegistry,
        requests: Vec<(RoomNumber, Customer)>,
    ) -> HotelResult<BulkOutcome<Allocation>> {
        self.check_allocate_capacity(rooms, requests.len())?;

        let mut outcome = BulkOutcome::default();
        for (room_number, customer) in requests {
            match self.allocate(rooms, room_number, customer) {
                Ok(allocation) => outcome.committed.push(allocation),
                Err(e) => outcome.failed.push((room_number, e)),
            }
        }
        Ok(outcome)
    }

    /// Deallocate several rooms after checking enough rooms are allocated
    pub fn deallocate_many(
        &mut self,
        room_numbers: &[RoomNumber],
    ) -> HotelResult<BulkOutcome<Allocation>> {
        self.check_deallocate_capacity(room_numbers.len())?;

        let mut outcome = BulkOutcome::default();
        for &room_number in room_numbers {
            match self.deallocate(room_number) {
                Ok(allocation) => outcome.committed.push(allocation),
                Err(e) => outcome.failed.push((room_number, e)),
            }
        }
        Ok(outcome)
    }

    /// Get the allocation for a room, if any
    pub fn allocation_for(&self, room_number: RoomNumber) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.room_number == room_number)
    }

    /// Check if a room has an active allocation
    pub fn is_allocated(&self, room_number: RoomNumber) -> bool {
        self.allocation_for(room_number).is_some()
    }

    /// Iterate over active allocations in insertion order
    pub fn list(&self) -> std::slice::Iter<'_, Allocation> {
        self.allocations.iter()
    }

    /// Borrow the allocations as a slice
    pub fn as_slice(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}
