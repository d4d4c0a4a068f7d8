//! Configuration module for the hotel manager
//!
//! This module provides configuration management including:
//! - Documents-folder path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HotelPaths;
pub use settings::Settings;
