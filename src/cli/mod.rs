//! CLI command handlers
//!
//! This module contains the interactive menu and the direct subcommands,
//! bridging stdin/stdout and the clap argument parsing with the service
//! layer.

pub mod files;
pub mod menu;
pub mod prompt;

pub use files::{
    handle_audit_command, handle_backup_command, handle_backups_command, handle_config_command,
    handle_show_command,
};
pub use menu::{run_menu, MenuChoice};
pub use prompt::Prompter;
