//! Implementation of the `silvera init` command.
//!
//! # What `silvera init` does
//!
//! 1. Stops with a message if `silvera.conf` already exists
//! 2. Writes the starter `silvera.conf`
//! 3. Writes the default `template.html` (if missing)
//! 4. Creates `src/`, `build/` and `addons/`
//!
//! The command is idempotent: a second run changes nothing on disk.

mod scaffolding;


use crate::context::{
    ADDON_DIR_NAME, CONFIG_FILE_NAME, SOURCE_DIR_NAME, TEMPLATE_FILE_NAME, WorkspaceContext,
};
use crate::error::Result;

use scaffolding::*;

/// Directories created by `init`, relative to the workspace root. `build`
/// matches the starter config's `outdir`.
const WORKSPACE_DIRS: &[&str] = &[SOURCE_DIR_NAME, "build", ADDON_DIR_NAME];

/// Execute the `silvera init` command in the current directory.
pub fn cmd_init() -> Result<()> {
    let ctx = WorkspaceContext::resolve()?;

    if !init_workspace(&ctx)? {
        println!("This directory already appears to be a silvera workspace. Nothing changed.");
        return Ok(());
    }

    println!("Initialized silvera workspace in {}", ctx.root.display());
    println!();
    println!("Created:");
    println!("  {}", CONFIG_FILE_NAME);
    println!("  {}", TEMPLATE_FILE_NAME);
    for dir in WORKSPACE_DIRS {
        println!("  {}/", dir);
    }
    println!();
    println!("Put Markdown under src/ and run `silvera build`.");

    Ok(())
}

/// Scaffold a workspace at `ctx.root`.
///
/// Returns `false` without touching anything if the workspace already exists.
pub(crate) fn init_workspace(ctx: &WorkspaceContext) -> Result<bool> {
    if ctx.is_initialized() {
        return Ok(false);
    }

    create_workspace_dirs(ctx)?;
    write_default_template(ctx)?;
    // Written last: its presence marks the workspace as complete.
    write_starter_config(ctx)?;

    Ok(true)
}
