//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::AuditEvent;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Room was added
    Create,
    /// Room was removed
    Delete,
    /// Room was allocated to a customer
    Allocate,
    /// Allocation was released
    Deallocate,
    /// Ledger snapshot was written
    Save,
    /// Snapshot was rotated into a backup
    Rotate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Allocate => write!(f, "ALLOCATE"),
            Operation::Deallocate => write!(f, "DEALLOCATE"),
            Operation::Save => write!(f, "SAVE"),
            Operation::Rotate => write!(f, "ROTATE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Room,
    Allocation,
    LedgerFile,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Room => write!(f, "Room"),
            EntityType::Allocation => write!(f, "Allocation"),
            EntityType::LedgerFile => write!(f, "LedgerFile"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Room number or file path of the affected entity
    pub entity_id: String,

    /// Human-readable description (e.g., customer name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON representation of the entity before the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the entity after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Free-form summary, e.g. the backup a rotation produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            before: None,
            after: None,
            detail: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(detail) = &self.detail {
            output.push_str(&format!("\n  {}", detail));
        }

        output
    }
}

impl From<AuditEvent<'_>> for AuditEntry {
    fn from(event: AuditEvent<'_>) -> Self {
        match event {
            AuditEvent::RoomAdded(room) => Self {
                after: serde_json::to_value(room).ok(),
                ..Self::new(Operation::Create, EntityType::Room, room.number.to_string())
            },
            AuditEvent::RoomRemoved(room) => Self {
                before: serde_json::to_value(room).ok(),
                ..Self::new(Operation::Delete, EntityType::Room, room.number.to_string())
            },
            AuditEvent::Allocated(allocation) => Self {
                entity_name: Some(allocation.customer.name.clone()),
                after: serde_json::to_value(allocation).ok(),
                ..Self::new(
                    Operation::Allocate,
                    EntityType::Allocation,
                    allocation.room_number.to_string(),
                )
            },
            AuditEvent::Deallocated(allocation) => Self {
                entity_name: Some(allocation.customer.name.clone()),
                before: serde_json::to_value(allocation).ok(),
                ..Self::new(
                    Operation::Deallocate,
                    EntityType::Allocation,
                    allocation.room_number.to_string(),
                )
            },
            AuditEvent::Saved(report) => Self {
                detail: Some(format!("{} record(s), {} bytes", report.records, report.bytes)),
                ..Self::new(
                    Operation::Save,
                    EntityType::LedgerFile,
                    report.path.display().to_string(),
                )
            },
            AuditEvent::Rotated { live, report } => Self {
                detail: Some(format!("moved to {}", report.backup_path.display())),
                ..Self::new(Operation::Rotate, EntityType::LedgerFile, live.display().to_string())
            },
        }
    }
}
