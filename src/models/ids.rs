//! Strongly-typed number wrappers for rooms and customers
//!
//! Using newtype wrappers prevents accidentally passing a customer number
//! where a room number is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HotelError;

/// Macro to generate number newtype wrappers
macro_rules! define_number {
    ($name:ident, $inner:ty, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wrap a raw number
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Get the raw number
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = HotelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                trimmed.parse::<$inner>().map(Self).map_err(|_| {
                    HotelError::InvalidInput(format!(
                        "'{}' is not a valid {}",
                        trimmed, $label
                    ))
                })
            }
        }
    };
}

define_number!(RoomNumber, u32, "room number");
define_number!(CustomerNumber, u64, "customer number");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_number() {
        assert_eq!("101".parse::<RoomNumber>().unwrap(), RoomNumber::new(101));
        assert_eq!(" 7 ".parse::<RoomNumber>().unwrap().get(), 7);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = "abc".parse::<RoomNumber>().unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "Invalid input: 'abc' is not a valid room number");

        assert!("-5".parse::<CustomerNumber>().is_err());
        assert!("".parse::<CustomerNumber>().is_err());
    }

    #[test]
    fn test_display_and_serde() {
        let room = RoomNumber::new(305);
        assert_eq!(room.to_string(), "305");
        assert_eq!(serde_json::to_string(&room).unwrap(), "305");

        let customer: CustomerNumber = serde_json::from_str("5001").unwrap();
        assert_eq!(customer.get(), 5001);
    }
}
