//! Configuration model for silvera.
//!
//! This module defines the Config struct that represents `silvera.conf` and the
//! per-directory `.slv/silvera.conf` overrides. Files decode into a
//! [`ConfigPatch`] and are overlaid onto a parent config, so anything a file
//! leaves out is inherited rather than reset to a default.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::Capabilities;
