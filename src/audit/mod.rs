//! Audit logging for the hotel manager
//!
//! Records room, allocation and file events in an append-only audit log,
//! one JSON object per line.
//!
//! # Example
//!
//! ```rust,ignore
//! use hotel::audit::{AuditEvent, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.record(AuditEvent::RoomAdded(&room))?;
//! ```

mod entry;
mod event;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use event::AuditEvent;
pub use logger::AuditLogger;
