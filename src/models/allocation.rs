//! Allocation model
//!
//! Associates one room with one customer for an active stay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::customer::Customer;
use super::ids::RoomNumber;

/// An active room allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The allocated room
    pub room_number: RoomNumber,

    /// The customer staying in the room
    pub customer: Customer,

    /// When the allocation was made
    pub allocated_at: DateTime<Utc>,
}

impl Allocation {
    /// Create a new allocation stamped with the current time
    pub fn new(room_number: RoomNumber, customer: Customer) -> Self {
        Self {
            room_number,
            customer,
            allocated_at: Utc::now(),
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Room {} -> {}", self.room_number, self.customer)
    }
}
