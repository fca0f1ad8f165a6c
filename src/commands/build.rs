//! Implementation of the `silvera build` command.

use crate::build::Builder;
use crate::context::require_workspace;
use crate::error::Result;
use crate::hooks::ScriptHooks;
use crate::render::{CmarkEngine, TeraEngine};

/// Execute the `silvera build` command in the current workspace.
///
/// Per-document failures are listed but do not change the exit status; config
/// and hook failures abort the build with their own exit code.
pub fn cmd_build() -> Result<()> {
    let ctx = require_workspace()?;
    let hooks = ScriptHooks::new(&ctx);

    let report = Builder::new(&ctx, &hooks, &CmarkEngine, &TeraEngine).run()?;

    println!("Build finished: {}", report);
    if !report.is_clean() {
        for failure in &report.failures {
            println!("  failed: {}", failure);
        }
        if report.skipped > 0 {
            println!("  see the log above for skipped entries");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SilveraError;
    use crate::test_support::{DirGuard, create_configured_workspace};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_build_outside_workspace_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        let err = cmd_build().unwrap_err();
        assert!(matches!(err, SilveraError::UserError(_)));
        assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
    }

    #[test]
    #[serial]
    fn test_build_in_workspace() {
        let temp_dir = create_configured_workspace("");
        std::fs::write(temp_dir.path().join("src/index.md"), "# Home\n").unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        cmd_build().unwrap();
        assert!(temp_dir.path().join("build/index.html").is_file());
    }
}
