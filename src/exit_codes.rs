//! Exit code constants for the silvera CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, not a workspace)
//! - 2: Configuration could not be parsed or validated
//! - 3: Filesystem setup failure
//! - 4: Addon hook failure
//! - 5: Document processing failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid workspace state.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: malformed YAML or invalid values.
pub const CONFIG_FAILURE: i32 = 2;

/// Filesystem failure: required directories or files could not be created or read.
pub const FILESYSTEM_FAILURE: i32 = 3;

/// Hook failure: an addon script could not be spawned, exited non-zero, or timed out.
pub const HOOK_FAILURE: i32 = 4;

/// Document failure: a single document could not be rendered or written.
pub const DOCUMENT_FAILURE: i32 = 5;
