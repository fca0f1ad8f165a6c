//! Command implementations for silvera.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod build;
mod init;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(),
        Command::Build => build::cmd_build(),
    }
}
