//! Hotel CLI - console room management for a single hotel
//!
//! This library provides the core functionality for the `hotel` binary: a
//! registry of rooms, a ledger of which customer occupies which room, a
//! plain-text snapshot of the ledger and rotation of that snapshot into
//! timestamped backups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Room, customer and allocation types
//! - `state`: In-memory room registry and allocation ledger
//! - `storage`: Snapshot file format and atomic writes
//! - `backup`: Snapshot rotation into backups
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Interactive menu and subcommand handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use hotel::config::{HotelPaths, Settings};
//! use hotel::models::RoomNumber;
//! use hotel::services::HotelService;
//!
//! let paths = HotelPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut service = HotelService::new(&paths, &settings)?;
//! service.add_room(RoomNumber::new(101))?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{HotelError, HotelResult};
