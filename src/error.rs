//! Error types for the silvera CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for silvera operations.
///
/// Each variant maps to a specific exit code. Only some variants are fatal:
/// enumeration and document errors are reported by the build and never reach
/// `main` on their own.
#[derive(Error, Debug)]
pub enum SilveraError {
    /// User invoked a command in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A configuration file could not be read, decoded or validated.
    #[error("invalid config '{}': {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A required directory or file could not be created during setup.
    #[error("{0}")]
    FileSystem(String),

    /// A source tree entry could not be stat'ed or listed.
    #[error("cannot read entry '{}': {message}", path.display())]
    Enumeration { path: PathBuf, message: String },

    /// Rendering or writing a single document failed.
    #[error("failed to process '{}': {message}", path.display())]
    DocumentProcessing { path: PathBuf, message: String },

    /// An addon script is missing, could not be spawned, or failed.
    #[error("addon '{addon}' failed: {message}")]
    HookExecution { addon: String, message: String },
}

impl SilveraError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SilveraError::UserError(_) => exit_codes::USER_ERROR,
            SilveraError::ConfigParse { .. } => exit_codes::CONFIG_FAILURE,
            SilveraError::FileSystem(_) => exit_codes::FILESYSTEM_FAILURE,
            SilveraError::Enumeration { .. } => exit_codes::FILESYSTEM_FAILURE,
            SilveraError::DocumentProcessing { .. } => exit_codes::DOCUMENT_FAILURE,
            SilveraError::HookExecution { .. } => exit_codes::HOOK_FAILURE,
        }
    }

    pub(crate) fn config(path: &Path, message: impl Into<String>) -> Self {
        SilveraError::ConfigParse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn document(path: &Path, message: impl Into<String>) -> Self {
        SilveraError::DocumentProcessing {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Result type alias for silvera operations.
pub type Result<T> = std::result::Result<T, SilveraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = SilveraError::UserError("not a workspace".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = SilveraError::config(Path::new("silvera.conf"), "bad yaml");
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn hook_error_has_correct_exit_code() {
        let err = SilveraError::HookExecution {
            addon: "notify".to_string(),
            message: "exit status 1".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::HOOK_FAILURE);
    }

    #[test]
    fn filesystem_errors_share_exit_code() {
        let setup = SilveraError::FileSystem("cannot create build".to_string());
        let walk = SilveraError::Enumeration {
            path: PathBuf::from("src/a"),
            message: "permission denied".to_string(),
        };
        assert_eq!(setup.exit_code(), walk.exit_code());
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = SilveraError::config(Path::new("src/b/.slv/silvera.conf"), "expected a map");
        assert_eq!(
            err.to_string(),
            "invalid config 'src/b/.slv/silvera.conf': expected a map"
        );

        let err = SilveraError::document(Path::new("src/a.md"), "template missing");
        assert_eq!(err.to_string(), "failed to process 'src/a.md': template missing");
    }
}
