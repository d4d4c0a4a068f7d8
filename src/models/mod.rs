//! Core data models for the hotel manager
//!
//! Rooms, customers and the allocations that tie them together.

pub mod allocation;
pub mod customer;
pub mod ids;
pub mod room;

pub use allocation::Allocation;
pub use customer::{Customer, CustomerValidationError};
pub use ids::{CustomerNumber, RoomNumber};
pub use room::{Room, RoomStatus};
