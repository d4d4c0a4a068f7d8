//! Customer model
//!
//! A customer is a value object embedded in an allocation; it has no
//! lifecycle of its own.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CustomerNumber;

/// Longest customer name accepted
pub const MAX_NAME_LEN: usize = 100;

/// A hotel guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer number
    pub number: CustomerNumber,

    /// Customer name as entered
    pub name: String,
}

impl Customer {
    /// Create a new customer, trimming surrounding whitespace from the name
    pub fn new(number: CustomerNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into().trim().to_string(),
        }
    }

    /// Validate the customer
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.name.trim().is_empty() {
            return Err(CustomerValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(CustomerValidationError::NameTooLong(len));
        }

        if self.name.contains(['\n', '\r']) {
            return Err(CustomerValidationError::MultilineName);
        }

        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.number)
    }
}

/// Validation errors for customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    EmptyName,
    NameTooLong(usize),
    MultilineName,
}

impl fmt::Display for CustomerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Customer name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Customer name too long ({} chars, max {})",
                len, MAX_NAME_LEN
            ),
            Self::MultilineName => write!(f, "Customer name must fit on one line"),
        }
    }
}

impl std::error::Error for CustomerValidationError {}
