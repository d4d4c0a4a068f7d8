//! Allocation display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Allocation;
use crate::storage::SnapshotRecord;

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Customer No.")]
    customer_number: String,
    #[tabled(rename = "Customer Name")]
    customer_name: String,
    #[tabled(rename = "Since")]
    since: String,
}

/// Format the active allocations as a table
pub fn format_allocation_list(allocations: &[Allocation]) -> String {
    if allocations.is_empty() {
        return "No allocated rooms to display. Please allocate rooms first.".to_string();
    }

    let rows = allocations.iter().map(|a| AllocationRow {
        room: a.room_number.to_string(),
        customer_number: a.customer.number.to_string(),
        customer_name: a.customer.name.clone(),
        since: a
            .allocated_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    });

    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push('\n');
    output
}

/// One-line summary of a parsed snapshot
pub fn format_snapshot_summary(records: &[SnapshotRecord]) -> String {
    match records.first() {
        None => "Snapshot contains no allocations.".to_string(),
        Some(first) => format!(
            "{} allocation(s) captured at {}",
            records.len(),
            first.captured_at.format("%Y-%m-%d %H:%M:%S")
        ),
    }
}
