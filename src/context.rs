//! Workspace context resolution for silvera.
//!
//! A [`WorkspaceContext`] holds every fixed path of a workspace. It is built once
//! per command invocation and passed by reference to every component, so nothing
//! in the build reads process-wide state.

use crate::error::{Result, SilveraError};
use std::env;
use std::path::{Path, PathBuf};

/// Root configuration file name (also the name of local override files).
pub const CONFIG_FILE_NAME: &str = "silvera.conf";

/// Hidden per-directory configuration directory.
pub const HIDDEN_DIR: &str = ".slv";

/// Default template file name created by `init`.
pub const TEMPLATE_FILE_NAME: &str = "template.html";

/// Source tree directory name.
pub const SOURCE_DIR_NAME: &str = "src";

/// Addon root directory name.
pub const ADDON_DIR_NAME: &str = "addons";

/// Resolved paths for a silvera workspace. All paths are absolute.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Workspace root (the directory holding `silvera.conf`).
    pub root: PathBuf,

    /// Source tree root (`{root}/src`).
    pub source_dir: PathBuf,

    /// Addon root (`{root}/addons`).
    pub addon_dir: PathBuf,
}

impl WorkspaceContext {
    /// Resolve the workspace context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            SilveraError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(cwd))
    }

    /// Resolve the workspace context for a specific root directory.
    pub fn resolve_from<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            source_dir: root.join(SOURCE_DIR_NAME),
            addon_dir: root.join(ADDON_DIR_NAME),
            root,
        }
    }

    /// Path to the root `silvera.conf`.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Path to the default template created by `init`.
    pub fn default_template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_FILE_NAME)
    }

    /// Directory holding the scripts of one addon.
    pub fn addon_path(&self, name: &str) -> PathBuf {
        self.addon_dir.join(name)
    }

    /// Whether this directory has been initialized as a workspace.
    pub fn is_initialized(&self) -> bool {
        self.config_path().exists()
    }
}

/// Resolve the context and require an initialized workspace.
pub fn require_workspace() -> Result<WorkspaceContext> {
    let ctx = WorkspaceContext::resolve()?;

    if !ctx.is_initialized() {
        return Err(SilveraError::UserError(format!(
            "no {} found in '{}'.\n\nRun `silvera init` to create a workspace here.",
            CONFIG_FILE_NAME,
            ctx.root.display()
        )));
    }

    Ok(ctx)
}
