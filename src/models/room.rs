//! Room model
//!
//! A room only records its number. Whether it is occupied is derived from
//! the allocation ledger, so the two can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::customer::Customer;
use super::ids::RoomNumber;

/// A hotel room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room number
    pub number: RoomNumber,
}

impl Room {
    /// Create a new room
    pub fn new(number: RoomNumber) -> Self {
        Self { number }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Room {}", self.number)
    }
}

/// A room together with its derived occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStatus<'a> {
    pub room: &'a Room,
    /// The customer holding the room, if it is allocated
    pub occupant: Option<&'a Customer>,
}

impl<'a> RoomStatus<'a> {
    pub fn number(&self) -> RoomNumber {
        self.room.number
    }

    /// Returns true if the room has an active allocation
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Human-readable status label
    pub fn status_label(&self) -> &'static str {
        if self.is_occupied() {
            "Occupied"
        } else {
            "Available"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerNumber;

    #[test]
    fn test_room_display() {
        assert_eq!(Room::new(RoomNumber::new(101)).to_string(), "Room 101");
    }

    #[test]
    fn test_status_reflects_occupant() {
        let room = Room::new(RoomNumber::new(102));
        let guest = Customer::new(CustomerNumber::new(5001), "A. Smith");

        let free = RoomStatus {
            room: &room,
            occupant: None,
        };
        assert!(!free.is_occupied());
        assert_eq!(free.status_label(), "Available");

        let taken = RoomStatus {
            room: &room,
            occupant: Some(&guest),
        };
        assert!(taken.is_occupied());
        assert_eq!(taken.status_label(), "Occupied");
        assert_eq!(taken.number().get(), 102);
    }
}
