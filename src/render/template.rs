//! Tera-backed template engine.
//!
//! Templates are rendered one-off with autoescaping disabled: `Body` is already
//! HTML and must be inserted verbatim.

use super::{PageRecord, RenderError, TemplateEngine};
use std::error::Error as _;
use std::path::Path;
use tera::{Context, Tera};

/// Template written by `silvera init`.
pub const DEFAULT_TEMPLATE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>{{ Title }}</title>\n</head>\n<body>\n{{ Body }}\n</body>\n</html>\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl TeraEngine {
    /// Render template text directly.
    pub fn render_str(&self, template: &str, page: &PageRecord) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("Title", &page.title);
        context.insert("Body", &page.body);
        context.insert("Path", &page.path);

        Tera::one_off(template, &context, false)
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, template: &Path, page: &PageRecord) -> Result<Vec<u8>, RenderError> {
        let source =
            std::fs::read_to_string(template).map_err(|source| RenderError::TemplateRead {
                path: template.to_path_buf(),
                source,
            })?;

        self.render_str(&source, page)
            .map(String::into_bytes)
            .map_err(|e| RenderError::Template {
                path: template.to_path_buf(),
                message: describe_tera_error(&e),
            })
    }
}

/// Tera nests the useful message in the error's source chain.
fn describe_tera_error(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
