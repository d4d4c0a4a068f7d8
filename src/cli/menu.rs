//! Interactive numbered menu
//!
//! Bulk flows ask for a count, check it against what the hotel can serve,
//! then prompt once per item. An item is reprompted until it is acceptable
//! against the current state and the items already chosen. The whole
//! request is then committed in one bulk call; if input runs out first,
//! nothing is changed.

use std::io::{BufRead, Write};

use super::files::{describe_backup, describe_save, describe_show};
use super::prompt::Prompter;
use crate::config::Settings;
use crate::display::{format_allocation_list, format_room_list};
use crate::error::{HotelError, HotelResult};
use crate::models::customer::MAX_NAME_LEN;
use crate::models::{Customer, CustomerNumber, RoomNumber};
use crate::services::HotelService;
use crate::state::BulkOutcome;
use crate::storage::BLOCK_DELIMITER;

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Continue,
    Ended,
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    AddRooms,
    DeleteRooms,
    DisplayRooms,
    AllocateRooms,
    DeallocateRooms,
    DisplayAllocations,
    SaveAllocations,
    ShowAllocations,
    Backup,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        Self::Exit,
        Self::AddRooms,
        Self::DeleteRooms,
        Self::DisplayRooms,
        Self::AllocateRooms,
        Self::DeallocateRooms,
        Self::DisplayAllocations,
        Self::SaveAllocations,
        Self::ShowAllocations,
        Self::Backup,
    ];

    /// Map a menu number to its entry
    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }

    pub fn number(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::AddRooms => "Add Rooms",
            Self::DeleteRooms => "Delete Rooms",
            Self::DisplayRooms => "Display Rooms",
            Self::AllocateRooms => "Allocate Rooms",
            Self::DeallocateRooms => "De-Allocate Rooms",
            Self::DisplayAllocations => "Display Room Allocation Details",
            Self::SaveAllocations => "Save the Room Allocations To a File",
            Self::ShowAllocations => "Show the Room Allocations From a File",
            Self::Backup => "Backup",
        }
    }
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    service: &mut HotelService,
    settings: &Settings,
    p: &mut Prompter<R, W>,
) -> HotelResult<()> {
    loop {
        print_banner(settings, p)?;

        let Some(raw) = p.line("Enter Your Choice Number Here (0-9): ")? else {
            return Ok(());
        };

        let number = match raw.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                p.say(format!("Error: '{}' is not a menu number", raw.trim()))?;
                p.say("Please enter a valid number")?;
                continue;
            }
        };

        let Some(choice) = MenuChoice::from_number(number) else {
            p.say("Please enter a valid number between 0-9")?;
            continue;
        };

        if choice == MenuChoice::Exit {
            p.say(format!(
                "Thank you for using {} MANAGEMENT SYSTEM",
                settings.hotel_name
            ))?;
            return Ok(());
        }

        if let Session::Ended = dispatch(choice, service, p)? {
            return Ok(());
        }
    }
}

fn print_banner<R: BufRead, W: Write>(
    settings: &Settings,
    p: &mut Prompter<R, W>,
) -> HotelResult<()> {
    p.say(BLOCK_DELIMITER)?;
    p.say(format!("{:^75}", format!("{} MANAGEMENT SYSTEM", settings.hotel_name)))?;
    p.say(format!("{:^75}", "MENU"))?;
    p.say(BLOCK_DELIMITER)?;
    for choice in MenuChoice::ALL {
        p.say(format!("{}. {}", choice.number(), choice.label()))?;
    }
    p.say(BLOCK_DELIMITER)
}

fn dispatch<R: BufRead, W: Write>(
    choice: MenuChoice,
    service: &mut HotelService,
    p: &mut Prompter<R, W>,
) -> HotelResult<Session> {
    match choice {
        MenuChoice::Exit => Ok(Session::Ended),
        MenuChoice::AddRooms => add_rooms(service, p),
        MenuChoice::DeleteRooms => delete_rooms(service, p),
        MenuChoice::DisplayRooms => {
            p.say("You have selected 'DISPLAY ROOMS' from menu")?;
            p.say(format_room_list(service.state().list_rooms()))?;
            Ok(Session::Continue)
        }
        MenuChoice::AllocateRooms => allocate_rooms(service, p),
        MenuChoice::DeallocateRooms => deallocate_rooms(service, p),
        MenuChoice::DisplayAllocations => {
            p.say("You have selected 'DISPLAY ROOM ALLOCATION DETAILS' from menu")?;
            p.say(format_allocation_list(service.state().ledger().as_slice()))?;
            Ok(Session::Continue)
        }
        MenuChoice::SaveAllocations => {
            if service.state().ledger().is_empty() {
                p.say("No allocations to save.")?;
                return Ok(Session::Continue);
            }
            p.say("You have selected 'SAVE THE ROOM ALLOCATIONS TO A FILE' from menu")?;
            p.say(BLOCK_DELIMITER)?;
            p.say(describe_save(service.save()))?;
            Ok(Session::Continue)
        }
        MenuChoice::ShowAllocations => {
            p.say("You have selected 'SHOW THE ROOM ALLOCATIONS FROM A FILE' from menu")?;
            p.say(BLOCK_DELIMITER)?;
            p.say(describe_show(service.load()))?;
            Ok(Session::Continue)
        }
        MenuChoice::Backup => {
            p.say("You have selected 'BACKUP' from menu")?;
            p.say(BLOCK_DELIMITER)?;
            p.say(describe_backup(service.rotate()))?;
            Ok(Session::Continue)
        }
    }
}

fn add_rooms<R: BufRead, W: Write>(
    service: &mut HotelService,
    p: &mut Prompter<R, W>,
) -> HotelResult<Session> {
    p.say("You have selected 'ADD ROOMS' from menu")?;
    let Some(count) = p.count("How many rooms would you like to add?: ")? else {
        return Ok(Session::Ended);
    };
    p.say(format!("Adding {} room(s)", count))?;
    p.say(BLOCK_DELIMITER)?;

    let mut pending: Vec<RoomNumber> = Vec::new();
    while pending.len() < count {
        let prompt = format!("Please enter room number {}: ", pending.len() + 1);
        let Some(number) = p.parsed::<RoomNumber>(&prompt, "Please enter a valid room number")?
        else {
            return Ok(Session::Ended);
        };

        if service.state().rooms().contains(number) || pending.contains(&number) {
            p.say("Same room number already exists")?;
            p.say("Please enter a new room number")?;
            continue;
        }
        pending.push(number);
    }

    let outcome = service.add_rooms(&pending);
    report_outcome(p, &outcome, |room| {
        format!("Room {} has been added successfully", room.number)
    })?;
    Ok(Session::Continue)
}

fn delete_rooms<R: BufRead, W: Write>(
    service: &mut HotelService,
    p: &mut Prompter<R, W>,
) -> HotelResult<Session> {
    if service.state().rooms().is_empty() {
        p.say("No rooms to delete")?;
        p.say("Please add rooms first")?;
        return Ok(Session::Continue);
    }

    p.say("You have selected 'DELETE ROOMS' from menu")?;
    let Some(count) = p.count("How many rooms would you like to delete?: ")? else {
        return Ok(Session::Ended);
    };
    if let Err(HotelError::InsufficientCapacity { available, .. }) =
        service.check_remove_capacity(count)
    {
        p.say(format!(
            "Cannot delete more rooms than exist. Only {} rooms available.",
            available
        ))?;
        return Ok(Session::Continue);
    }

    let mut pending: Vec<RoomNumber> = Vec::new();
    while pending.len() < count {
        p.say(BLOCK_DELIMITER)?;
        p.say(format!("Room Deletion {}:", pending.len() + 1))?;
        let Some(number) = p.parsed::<RoomNumber>(
            "Enter room number to delete: ",
            "Please enter a valid room number",
        )?
        else {
            return Ok(Session::Ended);
        };

        match service.find_room(number) {
            Err(_) => p.say("Room not found. Please enter a valid room number.")?,
            Ok(status) if status.is_occupied() => p.say(format!(
                "Room {} is currently occupied and cannot be deleted.",
                number
            ))?,
            Ok(_) if pending.contains(&number) => {
                p.say(format!("Room {} is already selected for deletion.", number))?
            }
            Ok(_) => pending.push(number),
        }
    }

    match service.remove_rooms(&pending) {
        Ok(outcome) => report_outcome(p, &outcome, |room| {
            format!("Room {} has been deleted", room.number)
        })?,
        Err(e) => p.say(format!("Error: {}", e))?,
    }
    Ok(Session::Continue)
}

fn allocate_rooms<R: BufRead, W: Write>(
    service: &mut HotelService,
    p: &mut Prompter<R, W>,
) -> HotelResult<Session> {
    if service.state().rooms().is_empty() {
        p.say("No rooms available. Please add rooms first.")?;
        return Ok(Session::Continue);
    }

    p.say("You have selected 'ALLOCATE ROOMS' from menu")?;
    let Some(count) = p.count("How many rooms would you like to allocate?: ")? else {
        return Ok(Session::Ended);
    };
    if let Err(HotelError::InsufficientCapacity { available, .. }) =
        service.check_allocate_capacity(count)
    {
        p.say(format!(
            "Cannot allocate more rooms than available. Only {} rooms available.",
            available
        ))?;
        return Ok(Session::Continue);
    }

    let mut pending: Vec<(RoomNumber, Customer)> = Vec::new();
    for i in 0..count {
        p.say(BLOCK_DELIMITER)?;
        p.say(format!("Room Allocation {}:", i + 1))?;

        loop {
            let Some(number) = p.parsed::<RoomNumber>(
                "Please search Room Number to allocate: ",
                "Please enter valid details",
            )?
            else {
                return Ok(Session::Ended);
            };

            let already_chosen = pending.iter().any(|(n, _)| *n == number);
            match service.find_room(number) {
                Err(_) => {
                    p.say("Room not found. Please enter a valid room number.")?;
                    continue;
                }
                Ok(status) if status.is_occupied() || already_chosen => {
                    p.say(format!("Room {} is already occupied", number))?;
                    p.say("Please choose another room")?;
                    continue;
                }
                Ok(_) => {}
            }

            let Some(customer_number) = p.parsed::<CustomerNumber>(
                "Please enter Customer Number to allocate: ",
                "Please enter valid details",
            )?
            else {
                return Ok(Session::Ended);
            };
            let Some(name) = p.line("Please enter Customer Name to allocate: ")? else {
                return Ok(Session::Ended);
            };

            let customer = Customer::new(customer_number, name);
            if let Err(e) = customer.validate() {
                p.say(format!("Error: {}", e))?;
                p.say(format!(
                    "Customer names must be 1-{} characters on a single line",
                    MAX_NAME_LEN
                ))?;
                p.say("Please enter valid details")?;
                continue;
            }

            pending.push((number, customer));
            break;
        }
    }

    match service.allocate_rooms(pending) {
        Ok(outcome) => report_outcome(p, &outcome, |allocation| {
            format!(
                "Room {} has been allocated to {}",
                allocation.room_number, allocation.customer.name
            )
        })?,
        Err(e) => p.say(format!("Error: {}", e))?,
    }
    Ok(Session::Continue)
}

fn deallocate_rooms<R: BufRead, W: Write>(
    service: &mut HotelService,
    p: &mut Prompter<R, W>,
) -> HotelResult<Session> {
    if service.state().ledger().is_empty() {
        p.say("No allocated rooms to deallocate.")?;
        return Ok(Session::Continue);
    }

    p.say("You have selected 'DEALLOCATE ROOMS' from menu")?;
    let Some(count) = p.count("How many rooms would you like to deallocate?: ")? else {
        return Ok(Session::Ended);
    };
    if service.check_deallocate_capacity(count).is_err() {
        p.say("Cannot deallocate more rooms than currently allocated.")?;
        return Ok(Session::Continue);
    }

    let mut pending: Vec<RoomNumber> = Vec::new();
    while pending.len() < count {
        p.say(BLOCK_DELIMITER)?;
        p.say(format!("Room Deallocation {}:", pending.len() + 1))?;
        let Some(number) = p.parsed::<RoomNumber>(
            "Please enter Room Number to deallocate: ",
            "Please enter a valid room number",
        )?
        else {
            return Ok(Session::Ended);
        };

        if service.state().ledger().is_allocated(number) && !pending.contains(&number) {
            pending.push(number);
        } else {
            p.say("Room not found or not allocated.")?;
        }
    }

    match service.deallocate_rooms(&pending) {
        Ok(outcome) => report_outcome(p, &outcome, |allocation| {
            format!("Room {} has been deallocated", allocation.room_number)
        })?,
        Err(e) => p.say(format!("Error: {}", e))?,
    }
    Ok(Session::Continue)
}

/// Print one line per committed item and one per rejected item
fn report_outcome<R, W, T, F>(
    p: &mut Prompter<R, W>,
    outcome: &BulkOutcome<T>,
    describe: F,
) -> HotelResult<()>
where
    R: BufRead,
    W: Write,
    F: Fn(&T) -> String,
{
    for item in &outcome.committed {
        p.say(describe(item))?;
    }
    for (room, err) in &outcome.failed {
        p.say(format!("Room {} was not processed: {}", room, err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HotelPaths;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(service: &mut HotelService, input: &str) -> String {
        run_bytes(service, input.as_bytes())
    }

    fn run_bytes(service: &mut HotelService, input: &[u8]) -> String {
        let mut output = Vec::new();
        {
            let mut p = Prompter::new(Cursor::new(input.to_vec()), &mut output);
            run_menu(service, &Settings::default(), &mut p).unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    fn create_test_service() -> (TempDir, HotelService) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HotelPaths::with_base_dir(temp_dir.path().to_path_buf());
        let service = HotelService::new(&paths, &Settings::default()).unwrap();
        (temp_dir, service)
    }

    #[test]
    fn test_menu_choice_numbers() {
        assert_eq!(MenuChoice::from_number(0), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(9), Some(MenuChoice::Backup));
        assert_eq!(MenuChoice::from_number(10), None);
        assert_eq!(MenuChoice::DeallocateRooms.number(), 5);
    }

    #[test]
    fn test_exit() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "0\n");

        assert!(output.contains("LANGHAM HOTEL MANAGEMENT SYSTEM"));
        assert!(output.contains("9. Backup"));
        assert!(output.contains("Thank you for using LANGHAM HOTEL MANAGEMENT SYSTEM"));
    }

    #[test]
    fn test_invalid_choices_are_reprompted() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "12\nabc\n0\n");

        assert!(output.contains("Please enter a valid number between 0-9"));
        assert!(output.contains("Error: 'abc' is not a menu number"));
        assert!(output.contains("Thank you for using"));
    }

    #[test]
    fn test_add_rooms_reprompts_duplicates() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "1\n2\n101\n101\nxyz\n102\n0\n");

        assert!(output.contains("Room 101 has been added successfully"));
        assert!(output.contains("Same room number already exists"));
        assert!(output.contains("Please enter a valid room number"));
        assert!(output.contains("Room 102 has been added successfully"));
        assert_eq!(service.state().rooms().len(), 2);
    }

    #[test]
    fn test_allocate_and_deallocate() {
        let (_temp, mut service) = create_test_service();
        let output = run(
            &mut service,
            "1\n2\n101\n102\n4\n1\n999\n102\n5001\nA. Smith\n6\n",
        );

        assert!(output.contains("Room not found. Please enter a valid room number."));
        assert!(output.contains("Room 102 has been allocated to A. Smith"));
        assert!(output.contains("A. Smith"));
        assert!(service.state().ledger().is_allocated(RoomNumber::new(102)));

        let output = run(&mut service, "5\n1\n101\n102\n0\n");
        assert!(output.contains("Room not found or not allocated."));
        assert!(output.contains("Room 102 has been deallocated"));
        assert!(service.state().ledger().is_empty());
    }

    #[test]
    fn test_capacity_guards() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "2\n4\n5\n0\n");
        assert!(output.contains("No rooms to delete"));
        assert!(output.contains("No rooms available. Please add rooms first."));
        assert!(output.contains("No allocated rooms to deallocate."));

        let output = run(&mut service, "1\n1\n7\n2\n3\n4\n2\n0\n");
        assert!(output.contains("Cannot delete more rooms than exist. Only 1 rooms available."));
        assert!(output.contains("Cannot allocate more rooms than available. Only 1 rooms available."));
        assert_eq!(service.state().rooms().len(), 1);
    }

    #[test]
    fn test_occupied_room_cannot_be_deleted() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "1\n2\n1\n2\n4\n1\n1\n10\nGuest\n2\n1\n1\n2\n0\n");

        assert!(output.contains("Room 1 is currently occupied and cannot be deleted."));
        assert!(output.contains("Room 2 has been deleted"));
        assert_eq!(service.state().rooms().len(), 1);
    }

    #[test]
    fn test_save_show_and_backup() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "7\n8\n9\n");
        assert!(output.contains("No allocations to save."));
        assert!(output.contains("Allocation file not found. Please save allocations first."));
        assert!(output.contains("No allocation file found to backup."));

        let output = run(&mut service, "1\n1\n101\n4\n1\n101\n5001\nA. Smith\n7\n8\n9\n0\n");
        assert!(output.contains("File saved as 'lhms_allocations.txt'"));
        assert!(output.contains("Customer Name: A. Smith"));
        assert!(output.contains("Backup created successfully as 'lhms_allocations_backup_"));
        assert!(output.contains("Original file has been deleted"));
        assert!(!service.ledger_file().exists());
    }

    #[test]
    fn test_allocation_reports_broken_name_rule() {
        let (_temp, mut service) = create_test_service();
        let long_name = "x".repeat(101);
        let input = format!(
            "1\n1\n101\n4\n1\n101\n5001\n   \n101\n5001\n{}\n101\n5001\nA. Smith\n0\n",
            long_name
        );
        let output = run(&mut service, &input);

        assert!(output.contains("Error: Customer name cannot be empty"));
        assert!(output.contains("Error: Customer name too long (101 chars, max 100)"));
        assert!(output.contains("Customer names must be 1-100 characters on a single line"));
        assert!(output.contains("Room 101 has been allocated to A. Smith"));
        assert_eq!(service.state().ledger().len(), 1);
    }

    #[test]
    fn test_same_room_cannot_be_chosen_twice_in_one_request() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "1\n3\n1\n2\n3\n2\n2\n1\n1\n3\n0\n");

        assert!(output.contains("Room 1 is already selected for deletion."));
        assert!(output.contains("Room 1 has been deleted"));
        assert!(output.contains("Room 3 has been deleted"));
        assert_eq!(service.state().rooms().len(), 1);
        assert!(service.state().rooms().contains(RoomNumber::new(2)));
    }

    #[test]
    fn test_request_is_committed_in_one_step() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "1\n2\n101\n102\n0\n");

        let chosen = output.find("Please enter room number 2: ").unwrap();
        let first_added = output.find("Room 101 has been added successfully").unwrap();
        assert!(chosen < first_added);
        assert_eq!(service.recent_audit(10).unwrap().len(), 2);
    }

    #[test]
    fn test_eof_mid_flow_discards_the_request() {
        let (_temp, mut service) = create_test_service();
        let output = run(&mut service, "1\n3\n101\n");

        assert!(!output.contains("has been added"));
        assert!(!output.contains("Thank you"));
        assert!(service.state().rooms().is_empty());
    }

    #[test]
    fn test_non_utf8_line_is_reprompted() {
        let (_temp, mut service) = create_test_service();
        let mut input = b"1\n1\n101\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"3\n0\n");
        let output = run_bytes(&mut service, &input);

        assert!(output.contains("line is not valid UTF-8"));
        assert!(output.contains("Room 101 has been added successfully"));
        assert!(output.contains("Thank you for using LANGHAM HOTEL MANAGEMENT SYSTEM"));
        assert!(service.state().rooms().contains(RoomNumber::new(101)));
    }
}
