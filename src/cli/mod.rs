//! CLI argument parsing for silvera.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Silvera: a static site builder.
///
/// A workspace is a directory holding `silvera.conf`, a `template.html`, Markdown
/// sources under `src/` and optional addon scripts under `addons/`. `build` renders
/// every document into the output directory and copies everything else verbatim.
#[derive(Parser, Debug)]
#[command(name = "silvera")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for silvera.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create a workspace in the current directory.
    ///
    /// Writes a starter `silvera.conf` and `template.html` and creates the
    /// `src/`, `build/` and `addons/` directories. Does nothing if the
    /// directory is already a workspace.
    Init,

    /// Build the site.
    ///
    /// Renders every Markdown document under `src/` through the template,
    /// copies all other files, and runs configured addon hooks.
    Build,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
