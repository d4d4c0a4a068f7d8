//! Custom error types for the hotel manager
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every variant is recoverable: the caller
//! decides whether to reprompt or abort the current operation.

use thiserror::Error;

/// The main error type for hotel operations
#[derive(Error, Debug)]
pub enum HotelError {
    /// A room with this number is already registered
    #[error("Room {0} already exists")]
    DuplicateRoom(u32),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The room currently has an active allocation
    #[error("Room {0} is currently occupied")]
    RoomOccupied(u32),

    /// A bulk request asked for more items than can be served
    #[error("Cannot {action} {requested} room(s): only {available} available")]
    InsufficientCapacity {
        action: &'static str,
        requested: usize,
        available: usize,
    },

    /// Nothing to persist
    #[error("No data: {0}")]
    NoData(String),

    /// The expected file does not exist
    #[error("File not found: {0}")]
    FileMissing(String),

    /// The file exists but has no content
    #[error("File is empty: {0}")]
    EmptyFile(String),

    /// File I/O errors, including permission faults
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A persisted file exists but cannot be understood
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl HotelError {
    /// Create a "not found" error for rooms
    pub fn room_not_found(room_no: u32) -> Self {
        Self::NotFound {
            entity_type: "Room",
            identifier: room_no.to_string(),
        }
    }

    /// Create a "not found" error for allocations
    pub fn allocation_not_found(room_no: u32) -> Self {
        Self::NotFound {
            entity_type: "Allocation for room",
            identifier: room_no.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an input validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this error concerns a missing or empty persisted file
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::FileMissing(_) | Self::EmptyFile(_))
    }
}

impl From<std::io::Error> for HotelError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                Self::Io(format!("Permission denied: {}", err))
            }
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HotelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for hotel operations
pub type HotelResult<T> = Result<T, HotelError>;
