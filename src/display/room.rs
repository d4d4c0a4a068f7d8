//! Room display formatting
//!
//! Formats rooms for terminal output as a table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::RoomStatus;

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "Room")]
    number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Occupied By")]
    occupant: String,
    #[tabled(rename = "Customer No.")]
    customer_number: String,
}

impl From<RoomStatus<'_>> for RoomRow {
    fn from(status: RoomStatus<'_>) -> Self {
        Self {
            number: status.number().to_string(),
            status: status.status_label().to_string(),
            occupant: status
                .occupant
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            customer_number: status
                .occupant
                .map(|c| c.number.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Format all rooms with their occupancy as a table
pub fn format_room_list<'a, I>(rooms: I) -> String
where
    I: IntoIterator<Item = RoomStatus<'a>>,
{
    let statuses: Vec<RoomStatus<'a>> = rooms.into_iter().collect();
    if statuses.is_empty() {
        return "No rooms to display. Please add rooms first.".to_string();
    }

    let occupied = statuses.iter().filter(|s| s.is_occupied()).count();
    let total = statuses.len();
    let rows: Vec<RoomRow> = statuses.into_iter().map(RoomRow::from).collect();

    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push_str(&format!(
        "\n{} room(s), {} occupied, {} available\n",
        total,
        occupied,
        total - occupied
    ));
    output
}
