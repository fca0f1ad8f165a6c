//! Markup and template engines.
//!
//! The build treats both engines as collaborators behind traits:
//!
//! - [`MarkupEngine`] turns Markdown into HTML under a [`Capabilities`] set
//!   ([`CmarkEngine`], backed by pulldown-cmark).
//! - [`TemplateEngine`] substitutes a [`PageRecord`] into a template file
//!   ([`TeraEngine`], backed by Tera).

mod markup;
mod template;

use crate::config::Capabilities;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use markup::CmarkEngine;
pub use template::{DEFAULT_TEMPLATE, TeraEngine};

/// Error type for engine failures. Always scoped to a single document.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot read template '{}': {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template '{}' failed to render: {message}", path.display())]
    Template { path: PathBuf, message: String },
}

/// Values a template can reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Text of the first `<h1>` of the rendered body, empty if there is none.
    pub title: String,
    /// Rendered HTML.
    pub body: String,
    /// Source-relative path of the document, `/`-separated.
    pub path: String,
}

/// Converts Markdown to HTML.
pub trait MarkupEngine {
    fn render(&self, source: &str, capabilities: &Capabilities) -> Result<String, RenderError>;
}

/// Produces final page bytes from a template and a page record.
pub trait TemplateEngine {
    fn render(&self, template: &Path, page: &PageRecord) -> Result<Vec<u8>, RenderError>;
}

/// Text content of the first top-level heading in an HTML fragment.
pub fn extract_title(html: &str) -> String {
    let Ok(selector) = Selector::parse("h1") else {
        return String::new();
    };

    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selector)
        .next()
        .map(|h1| h1.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
