//! Filesystem utilities for silvera.
//!
//! Every file the build writes goes through [`atomic_write`], so an interrupted
//! build never leaves a half-written page in the output tree.

pub mod atomic;

pub use atomic::{atomic_write, copy_file, ensure_dir};
