//! Directory and file scaffolding for the init command.

use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::error::{Result, SilveraError};
use crate::fs::{atomic_write, ensure_dir};
use crate::render::DEFAULT_TEMPLATE;
use std::path::Path;

use super::WORKSPACE_DIRS;

pub(super) fn create_workspace_dirs(ctx: &WorkspaceContext) -> Result<()> {
    for dir in WORKSPACE_DIRS {
        let path = ctx.root.join(dir);
        ensure_dir(&path).map_err(|e| {
            SilveraError::FileSystem(format!(
                "failed to create directory '{}': {}",
                path.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Write `template.html` unless the user already has one.
pub(super) fn write_default_template(ctx: &WorkspaceContext) -> Result<()> {
    let path = ctx.default_template_path();
    if path.exists() {
        return Ok(());
    }
    write_file(&path, DEFAULT_TEMPLATE.as_bytes())
}

pub(super) fn write_starter_config(ctx: &WorkspaceContext) -> Result<()> {
    let yaml = Config::starter().to_yaml()?;
    write_file(&ctx.config_path(), yaml.as_bytes())
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    atomic_write(path, content).map_err(|e| {
        SilveraError::FileSystem(format!("failed to write '{}': {}", path.display(), e))
    })
}
