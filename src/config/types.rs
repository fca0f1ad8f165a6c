//! Nested option groups of the silvera config and their partial (patch) forms.
//!
//! Each group exists twice: a resolved form where every toggle has a value, and a
//! patch form where every toggle is optional. Patches are what config files decode
//! into; `apply` overlays a patch onto a resolved group field by field.

use serde::{Deserialize, Serialize};

/// Markup capability toggles (the `extensions:` section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolinks: bool,
    pub task_list: bool,
    pub definition_list: bool,
    pub footnotes: bool,
    pub typographer: bool,
    pub wikilink: bool,
    pub mathjax: bool,
    pub table_of_contents: bool,
}

/// Parser behaviours (the `parser_options:` section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Allow `{#id .class}` attribute blocks on headings.
    pub custom_heading_attrs: bool,
    /// Give every heading without an explicit id a slug id.
    pub auto_heading_id: bool,
}

/// Renderer behaviours (the `renderer_options:` section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererOptions {
    /// Render soft line breaks as `<br />`.
    pub hard_wraps: bool,
    /// Self-close void elements.
    pub xhtml: bool,
    /// Pass raw HTML from documents through untouched.
    pub unsafe_rendering: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtensionsPatch {
    pub tables: Option<bool>,
    pub strikethrough: Option<bool>,
    pub autolinks: Option<bool>,
    pub task_list: Option<bool>,
    pub definition_list: Option<bool>,
    pub footnotes: Option<bool>,
    pub typographer: Option<bool>,
    pub wikilink: Option<bool>,
    pub mathjax: Option<bool>,
    pub table_of_contents: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParserOptionsPatch {
    pub custom_heading_attrs: Option<bool>,
    pub auto_heading_id: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RendererOptionsPatch {
    pub hard_wraps: Option<bool>,
    pub xhtml: Option<bool>,
    pub unsafe_rendering: Option<bool>,
}

/// Replace `slot` with `value` when the patch set it.
pub(crate) fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Extensions {
    pub fn apply(mut self, patch: &ExtensionsPatch) -> Self {
        set(&mut self.tables, patch.tables);
        set(&mut self.strikethrough, patch.strikethrough);
        set(&mut self.autolinks, patch.autolinks);
        set(&mut self.task_list, patch.task_list);
        set(&mut self.definition_list, patch.definition_list);
        set(&mut self.footnotes, patch.footnotes);
        set(&mut self.typographer, patch.typographer);
        set(&mut self.wikilink, patch.wikilink);
        set(&mut self.mathjax, patch.mathjax);
        set(&mut self.table_of_contents, patch.table_of_contents);
        self
    }
}

impl ParserOptions {
    pub fn apply(mut self, patch: &ParserOptionsPatch) -> Self {
        set(&mut self.custom_heading_attrs, patch.custom_heading_attrs);
        set(&mut self.auto_heading_id, patch.auto_heading_id);
        self
    }
}

impl RendererOptions {
    pub fn apply(mut self, patch: &RendererOptionsPatch) -> Self {
        set(&mut self.hard_wraps, patch.hard_wraps);
        set(&mut self.xhtml, patch.xhtml);
        set(&mut self.unsafe_rendering, patch.unsafe_rendering);
        self
    }
}

/// The complete capability set handed to a markup engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub extensions: Extensions,
    pub parser: ParserOptions,
    pub renderer: RendererOptions,
}
