//! Config struct definition, its patch form, and default implementations.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Default hook timeout in seconds.
pub const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 300;

/// Configuration for a silvera build.
///
/// This struct represents the fully resolved contents of `silvera.conf` (or of a
/// local `.slv/silvera.conf` overlaid on it). Every field has a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output directory; relative paths are resolved against the workspace root.
    pub outdir: String,

    /// Template file; relative paths are resolved against the workspace root.
    pub template: String,

    pub extensions: Extensions,

    pub parser_options: ParserOptions,

    pub renderer_options: RendererOptions,

    /// Addon names, in execution order.
    pub addons: Vec<String>,

    /// Seconds an addon script may run before it is killed (0 waits forever).
    pub hook_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outdir: "build".to_string(),
            template: "template.html".to_string(),
            extensions: Extensions::default(),
            parser_options: ParserOptions::default(),
            renderer_options: RendererOptions::default(),
            addons: Vec::new(),
            hook_timeout_secs: DEFAULT_HOOK_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// The configuration `silvera init` writes to a fresh workspace.
    pub fn starter() -> Self {
        Self {
            extensions: Extensions {
                tables: true,
                strikethrough: true,
                autolinks: true,
                wikilink: true,
                ..Extensions::default()
            },
            parser_options: ParserOptions {
                custom_heading_attrs: true,
                auto_heading_id: false,
            },
            renderer_options: RendererOptions {
                hard_wraps: false,
                xhtml: true,
                unsafe_rendering: false,
            },
            ..Self::default()
        }
    }

    /// Capability set for the markup engine.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            extensions: self.extensions,
            parser: self.parser_options,
            renderer: self.renderer_options,
        }
    }
}

/// A partially specified configuration, exactly as written in a config file.
///
/// Fields the file does not mention stay `None` and are inherited from the parent
/// during [`Config::overlay`]. Unknown fields are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub outdir: Option<String>,
    pub template: Option<String>,
    pub extensions: ExtensionsPatch,
    pub parser_options: ParserOptionsPatch,
    pub renderer_options: RendererOptionsPatch,
    pub addons: Option<Vec<String>>,
    pub hook_timeout_secs: Option<u64>,
}
