//! Config loading, overlay, validation, and path helpers.

use super::model::{Config, ConfigPatch};
use super::types::set;
use crate::error::{Result, SilveraError};
use std::path::{Path, PathBuf};
use tracing::info;

impl Config {
    /// Overlay a patch onto a parent configuration.
    ///
    /// Every field the patch sets replaces the parent's; every field it leaves
    /// unset is inherited. A present `addons` list replaces the parent's list.
    pub fn overlay(parent: &Config, patch: &ConfigPatch) -> Config {
        let mut config = parent.clone();
        set(&mut config.outdir, patch.outdir.clone());
        set(&mut config.template, patch.template.clone());
        config.extensions = parent.extensions.apply(&patch.extensions);
        config.parser_options = parent.parser_options.apply(&patch.parser_options);
        config.renderer_options = parent.renderer_options.apply(&patch.renderer_options);
        set(&mut config.addons, patch.addons.clone());
        set(&mut config.hook_timeout_secs, patch.hook_timeout_secs);
        config
    }

    /// Load a config file on top of `parent`.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - The overlaid, validated config
    /// * `Err(SilveraError::ConfigParse)` - Read, parse, or validation failure
    pub fn load_with_parent<P: AsRef<Path>>(path: P, parent: &Config) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| SilveraError::config(path, format!("failed to read config file: {}", e)))?;

        let config = Self::from_yaml_with_parent(&content, parent)
            .map_err(|message| SilveraError::config(path, message))?;

        info!(path = %path.display(), "read config file");
        Ok(config)
    }

    /// Parse YAML text on top of `parent`, returning a plain message on failure.
    pub fn from_yaml_with_parent(yaml: &str, parent: &Config) -> std::result::Result<Self, String> {
        // An empty or comment-only file is a valid config that overrides nothing.
        let patch: ConfigPatch = serde_yaml::from_str::<Option<ConfigPatch>>(yaml)
            .map_err(|e| format!("failed to parse config YAML: {}", e))?
            .unwrap_or_default();

        let config = Self::overlay(parent, &patch);
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SilveraError::FileSystem(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `outdir` and `template` must be non-empty
    /// - addon names must be non-empty plain directory names
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.outdir.trim().is_empty() {
            return Err("config validation failed: outdir must not be empty".to_string());
        }

        if self.template.trim().is_empty() {
            return Err("config validation failed: template must not be empty".to_string());
        }

        for addon in &self.addons {
            if addon.trim().is_empty() {
                return Err("config validation failed: addon names must be non-empty".to_string());
            }
            if addon == "." || addon == ".." || addon.contains(['/', '\\']) {
                return Err(format!(
                    "config validation failed: addon name '{}' must be a plain directory name under addons/",
                    addon
                ));
            }
        }

        Ok(())
    }

    /// Absolute output directory for a workspace rooted at `root`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.outdir)
    }

    /// Absolute template path for a workspace rooted at `root`.
    pub fn template_path(&self, root: &Path) -> PathBuf {
        root.join(&self.template)
    }
}
