//! Per-entry routing decisions.

use super::index::ConfigIndex;
use crate::config::Config;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extension of documents that are rendered rather than copied.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Extension rendered documents are written with.
pub const HTML_EXTENSION: &str = "html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Document,
    Opaque,
}

/// One visited source node, resolved against the index.
#[derive(Debug)]
pub struct BuildEntry<'c> {
    pub source: PathBuf,
    pub relative: PathBuf,
    pub kind: EntryKind,
    pub config: &'c Config,
    pub output: PathBuf,
}

impl<'c> BuildEntry<'c> {
    /// Classify `source` and compute its output path under the effective config.
    pub fn resolve(
        source: &Path,
        is_dir: bool,
        index: &'c ConfigIndex,
        workspace_root: &Path,
    ) -> Self {
        let relative = source
            .strip_prefix(index.source_root())
            .unwrap_or(source)
            .to_path_buf();

        let kind = if is_dir {
            EntryKind::Directory
        } else if source.extension() == Some(OsStr::new(MARKDOWN_EXTENSION)) {
            EntryKind::Document
        } else {
            EntryKind::Opaque
        };

        let config = if is_dir {
            index.resolve_dir(source)
        } else {
            index.resolve(source)
        };

        let mut output = config.output_dir(workspace_root).join(&relative);
        if kind == EntryKind::Document {
            output.set_extension(HTML_EXTENSION);
        }

        Self {
            source: source.to_path_buf(),
            relative,
            kind,
            config,
            output,
        }
    }

    /// Source-relative path with `/` separators, as handed to templates.
    pub fn display_path(&self) -> String {
        self.relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Dotfiles and dot-directories are never part of the site.
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().starts_with(b".")
}
