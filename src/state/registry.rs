//! Room registry
//!
//! Owns the set of rooms in insertion order. Occupancy is never stored
//! here; it is looked up in the [`AllocationLedger`] on demand.

use crate::error::{HotelError, HotelResult};
use crate::models::{Room, RoomNumber, RoomStatus};

use super::ledger::AllocationLedger;
use super::BulkOutcome;

/// The set of rooms known to the hotel
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new room
    pub fn add(&mut self, number: RoomNumber) -> HotelResult<Room> {
        if self.contains(number) {
            return Err(HotelError::DuplicateRoom(number.get()));
        }

        let room = Room::new(number);
        self.rooms.push(room);
        Ok(room)
    }

    /// Register several rooms; each one succeeds or fails on its own
    pub fn add_many<I>(&mut self, numbers: I) -> BulkOutcome<Room>
    where
        I: IntoIterator<Item = RoomNumber>,
    {
        let mut outcome = BulkOutcome::default();
        for number in numbers {
            match self.add(number) {
                Ok(room) => outcome.committed.push(room),
                Err(e) => outcome.failed.push((number, e)),
            }
        }
        outcome
    }

    /// Remove a room that has no active allocation
    pub fn remove(&mut self, number: RoomNumber, ledger: &AllocationLedger) -> HotelResult<Room> {
        let index = self
            .position(number)
            .ok_or_else(|| HotelError::room_not_found(number.get()))?;

        if ledger.is_allocated(number) {
            return Err(HotelError::RoomOccupied(number.get()));
        }

        Ok(self.rooms.remove(index))
    }

    /// Fail if a bulk removal asks for more rooms than exist
    pub fn check_remove_capacity(&self, requested: usize) -> HotelResult<()> {
        if requested > self.rooms.len() {
            return Err(HotelError::InsufficientCapacity {
                action: "delete",
                requested,
                available: self.rooms.len(),
            });
        }
        Ok(())
    }

    /// Remove several rooms after checking the request fits the registry
    ///
    /// Nothing is removed when the count check fails. Past that point every
    /// item is committed independently.
    pub fn remove_many(
        &mut self,
        numbers: &[RoomNumber],
        ledger: &AllocationLedger,
    ) -> HotelResult<BulkOutcome<Room>> {
        self.check_remove_capacity(numbers.len())?;

        let mut outcome = BulkOutcome::default();
        for &number in numbers {
            match self.remove(number, ledger) {
                Ok(room) => outcome.committed.push(room),
                Err(e) => outcome.failed.push((number, e)),
            }
        }
        Ok(outcome)
    }

    /// Look up a room with its current occupancy
    pub fn find<'a>(
        &'a self,
        number: RoomNumber,
        ledger: &'a AllocationLedger,
    ) -> HotelResult<RoomStatus<'a>> {
        self.get(number)
            .map(|room| status_of(room, ledger))
            .ok_or_else(|| HotelError::room_not_found(number.get()))
    }

    /// Get a room without occupancy information
    pub fn get(&self, number: RoomNumber) -> Option<&Room> {
        self.rooms.iter().find(|r| r.number == number)
    }

    /// Check if a room number is registered
    pub fn contains(&self, number: RoomNumber) -> bool {
        self.position(number).is_some()
    }

    /// Iterate over all rooms with their occupancy, in insertion order
    ///
    /// The iterator is cheap to clone, so a caller can walk it more than once.
    pub fn list<'a>(&'a self, ledger: &'a AllocationLedger) -> Rooms<'a> {
        Rooms {
            inner: self.rooms.iter(),
            ledger,
        }
    }

    /// Number of rooms without an active allocation
    pub fn available_count(&self, ledger: &AllocationLedger) -> usize {
        self.rooms
            .iter()
            .filter(|r| !ledger.is_allocated(r.number))
            .count()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn position(&self, number: RoomNumber) -> Option<usize> {
        self.rooms.iter().position(|r| r.number == number)
    }
}

fn status_of<'a>(room: &'a Room, ledger: &'a AllocationLedger) -> RoomStatus<'a> {
    RoomStatus {
        room,
        occupant: ledger.allocation_for(room.number).map(|a| &a.customer),
    }
}

/// Restartable iterator over rooms and their occupancy
#[derive(Debug, Clone)]
pub struct Rooms<'a> {
    inner: std::slice::Iter<'a, Room>,
    ledger: &'a AllocationLedger,
}

impl<'a> Iterator for Rooms<'a> {
    type Item = RoomStatus<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let ledger = self.ledger;
        self.inner.next().map(|room| status_of(room, ledger))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rooms<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, CustomerNumber};

    fn room(n: u32) -> RoomNumber {
        RoomNumber::new(n)
    }

    fn registry_with(numbers: &[u32]) -> RoomRegistry {
        let mut registry = RoomRegistry::new();
        for &n in numbers {
            registry.add(room(n)).unwrap();
        }
        registry
    }

    #[test]
    fn test_add_and_find() {
        let registry = registry_with(&[101]);
        let ledger = AllocationLedger::new();

        let status = registry.find(room(101), &ledger).unwrap();
        assert_eq!(status.number(), room(101));
        assert!(!status.is_occupied());
    }

    #[test]
    fn test_add_duplicate_fails() {
        let mut registry = registry_with(&[101]);

        let err = registry.add(room(101)).unwrap_err();
        assert!(matches!(err, HotelError::DuplicateRoom(101)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_many_commits_items_independently() {
        let mut registry = registry_with(&[101]);

        let outcome = registry.add_many([room(100), room(101), room(102)]);
        assert_eq!(outcome.committed.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, room(101));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_find_missing_room() {
        let registry = RoomRegistry::new();
        let ledger = AllocationLedger::new();

        assert!(registry.find(room(1), &ledger).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove() {
        let mut registry = registry_with(&[101, 102]);
        let ledger = AllocationLedger::new();

        registry.remove(room(101), &ledger).unwrap();
        assert!(!registry.contains(room(101)));
        assert!(registry.contains(room(102)));

        assert!(registry.remove(room(101), &ledger).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_occupied_room_fails_and_leaves_registry_unchanged() {
        let mut registry = registry_with(&[101, 102]);
        let mut ledger = AllocationLedger::new();
        ledger
            .allocate(&registry, room(102), Customer::new(CustomerNumber::new(1), "Guest"))
            .unwrap();

        let err = registry.remove(room(102), &ledger).unwrap_err();
        assert!(matches!(err, HotelError::RoomOccupied(102)));

        let numbers: Vec<_> = registry.list(&ledger).map(|s| s.number().get()).collect();
        assert_eq!(numbers, vec![101, 102]);
    }

    #[test]
    fn test_remove_many_guards_count_before_mutating() {
        let mut registry = registry_with(&[101, 102]);
        let ledger = AllocationLedger::new();

        let err = registry
            .remove_many(&[room(101), room(102), room(103)], &ledger)
            .unwrap_err();
        assert!(matches!(
            err,
            HotelError::InsufficientCapacity {
                requested: 3,
                available: 2,
                ..
            }
        ));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_many_reports_per_item_failures() {
        let mut registry = registry_with(&[101, 102, 103]);
        let ledger = AllocationLedger::new();

        let outcome = registry.remove_many(&[room(101), room(999)], &ledger).unwrap();
        assert_eq!(outcome.committed, vec![Room::new(room(101))]);
        assert!(outcome.failed[0].1.is_not_found());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let registry = registry_with(&[303, 101, 202]);
        let ledger = AllocationLedger::new();

        let listing = registry.list(&ledger);
        assert_eq!(listing.len(), 3);

        let first: Vec<_> = listing.clone().map(|s| s.number().get()).collect();
        let second: Vec<_> = listing.map(|s| s.number().get()).collect();
        assert_eq!(first, vec![303, 101, 202]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_numbers_stay_unique_across_add_remove() {
        let mut registry = RoomRegistry::new();
        let ledger = AllocationLedger::new();

        for n in [1, 2, 3, 2, 1, 4] {
            let _ = registry.add(room(n));
        }
        registry.remove(room(2), &ledger).unwrap();
        registry.add(room(2)).unwrap();
        let _ = registry.add(room(3));

        let mut numbers: Vec<_> = registry.list(&ledger).map(|s| s.number().get()).collect();
        let total = numbers.len();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), total);
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_check_remove_capacity() {
        let registry = registry_with(&[1, 2]);
        assert!(registry.check_remove_capacity(2).is_ok());
        assert!(registry.check_remove_capacity(3).is_err());
    }
}
