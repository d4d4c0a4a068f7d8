//! Service layer for the hotel manager
//!
//! The service layer sits on top of the in-memory state and the storage
//! layer, adding logging and auditing to every operation.

pub mod hotel;

pub use hotel::HotelService;
