//! Addon hooks.
//!
//! An addon is a directory under `addons/` holding scripts. A script belongs to a
//! hook phase by the prefix of its file name:
//!
//! | Phase          | Prefix  | Arguments            |
//! |----------------|---------|----------------------|
//! | pre-build      | `prh__` | none                 |
//! | pre-document   | `prf__` | absolute source path |
//! | post-document  | `pof__` | absolute output path |
//! | post-build     | `poh__` | none                 |
//!
//! The build only talks to the [`AddonHook`] trait; [`ScriptHooks`] is the
//! subprocess implementation.

mod runner;


use crate::config::Config;
use crate::error::Result;
use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub use runner::ScriptHooks;

/// A point in the build at which addon scripts run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    PreBuild,
    PreDocument,
    PostDocument,
    PostBuild,
}

impl HookPhase {
    /// File name prefix that assigns a script to this phase.
    pub fn prefix(self) -> &'static str {
        match self {
            HookPhase::PreBuild => "prh__",
            HookPhase::PreDocument => "prf__",
            HookPhase::PostDocument => "pof__",
            HookPhase::PostBuild => "poh__",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HookPhase::PreBuild => "pre-build",
            HookPhase::PreDocument => "pre-document",
            HookPhase::PostDocument => "post-document",
            HookPhase::PostBuild => "post-build",
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one successful script invocation produced.
#[derive(Debug, Clone)]
pub struct HookOutput {
    pub addon: String,
    pub script: PathBuf,
    pub stdout: String,
    pub duration: Duration,
}

/// Runs every script of a phase for the addons a config lists.
///
/// Implementations run addons in list order and stop at the first failure; any
/// error is fatal to the build.
pub trait AddonHook {
    fn run_phase(
        &self,
        config: &Config,
        phase: HookPhase,
        args: &[&OsStr],
    ) -> Result<Vec<HookOutput>>;
}
