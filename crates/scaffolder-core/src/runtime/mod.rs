//! External process plumbing
//!
//! This module provides:
//! - A narrow command runner capability with inherited standard streams
//! - Package manager command construction (fetch into a prefix, install)

pub mod command;
pub mod package_manager;

pub use command::{
    run_checked, CommandError, CommandRunner, CommandStatus, ExternalCommand, SystemRunner,
};
pub use package_manager::PackageManager;
