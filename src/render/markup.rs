//! pulldown-cmark backed markup engine.
//!
//! Capabilities that map directly onto parser options are switched on as
//! options. The rest (autolinks, heading ids, table of contents, wikilink
//! targets, raw HTML filtering, hard wraps, non-XHTML breaks) are applied as
//! passes over the parsed event list before it is written out as HTML.

use super::{MarkupEngine, RenderError};
use crate::config::Capabilities;
use pulldown_cmark::{
    CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use pulldown_cmark_escape::{escape_href, escape_html};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Placeholder emitted instead of raw HTML when unsafe rendering is off.
const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

static AUTOLINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("Invalid autolink regex")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkEngine;

impl MarkupEngine for CmarkEngine {
    fn render(&self, source: &str, capabilities: &Capabilities) -> Result<String, RenderError> {
        Ok(render_markdown(source, capabilities))
    }
}

/// Parser options for a capability set.
pub(crate) fn parser_options(capabilities: &Capabilities) -> Options {
    let ext = &capabilities.extensions;
    let flags = [
        (ext.tables, Options::ENABLE_TABLES),
        (ext.strikethrough, Options::ENABLE_STRIKETHROUGH),
        (ext.task_list, Options::ENABLE_TASKLISTS),
        (ext.definition_list, Options::ENABLE_DEFINITION_LIST),
        (ext.footnotes, Options::ENABLE_FOOTNOTES),
        (ext.typographer, Options::ENABLE_SMART_PUNCTUATION),
        (ext.wikilink, Options::ENABLE_WIKILINKS),
        (ext.mathjax, Options::ENABLE_MATH),
        (
            capabilities.parser.custom_heading_attrs,
            Options::ENABLE_HEADING_ATTRIBUTES,
        ),
    ];

    flags
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(Options::empty(), |options, (_, flag)| options | flag)
}

/// Render Markdown to an HTML fragment.
pub fn render_markdown(source: &str, capabilities: &Capabilities) -> String {
    let parser = Parser::new_ext(source, parser_options(capabilities));
    let mut events: Vec<Event<'_>> = TextMergeStream::new(parser).collect();

    // Raw HTML is filtered first so markup injected by later passes survives.
    if !capabilities.renderer.unsafe_rendering {
        events = omit_raw_html(events);
    }
    if capabilities.extensions.autolinks {
        events = link_bare_urls(events);
    }
    if capabilities.extensions.wikilink {
        append_wikilink_extension(&mut events);
    }
    if capabilities.renderer.hard_wraps {
        for event in events.iter_mut() {
            if matches!(event, Event::SoftBreak) {
                *event = Event::HardBreak;
            }
        }
    }
    if !capabilities.renderer.xhtml {
        for event in events.iter_mut() {
            match event {
                Event::HardBreak => *event = Event::InlineHtml("<br>\n".into()),
                Event::Rule => *event = Event::Html("<hr>\n".into()),
                _ => {}
            }
        }
    }

    let toc = capabilities.extensions.table_of_contents;
    let headings = if capabilities.parser.auto_heading_id || toc {
        assign_heading_ids(&mut events)
    } else {
        Vec::new()
    };

    let mut output = String::with_capacity(source.len() * 2);
    if toc && !headings.is_empty() {
        output.push_str(&table_of_contents(&headings));
    }
    html::push_html(&mut output, events.into_iter());
    output
}

fn omit_raw_html(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut in_html_block = false;
    let mut block_placeholder_written = false;

    for event in events {
        match event {
            Event::Start(Tag::HtmlBlock) => {
                in_html_block = true;
                block_placeholder_written = false;
                out.push(event);
            }
            Event::End(TagEnd::HtmlBlock) => {
                in_html_block = false;
                out.push(event);
            }
            Event::Html(_) if in_html_block => {
                if !block_placeholder_written {
                    out.push(Event::Html(format!("{}\n", RAW_HTML_OMITTED).into()));
                    block_placeholder_written = true;
                }
            }
            Event::Html(_) => out.push(Event::Html(format!("{}\n", RAW_HTML_OMITTED).into())),
            Event::InlineHtml(_) => out.push(Event::InlineHtml(RAW_HTML_OMITTED.into())),
            other => out.push(other),
        }
    }

    out
}

/// Turn bare URLs in text into links. Text inside links, images and code is left alone.
fn link_bare_urls(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut opaque_depth = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                opaque_depth += 1;
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                opaque_depth = opaque_depth.saturating_sub(1);
            }
            Event::Text(text) if opaque_depth == 0 && AUTOLINK_REGEX.is_match(text) => {
                push_autolinked(&mut out, text);
                continue;
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

fn push_autolinked(out: &mut Vec<Event<'_>>, text: &str) {
    let mut cursor = 0;

    for found in AUTOLINK_REGEX.find_iter(text) {
        let url = trim_url(found.as_str());
        if url.is_empty() {
            continue;
        }
        let start = found.start();
        let end = start + url.len();

        if start > cursor {
            out.push(Event::Text(CowStr::from(text[cursor..start].to_string())));
        }

        let dest = if url.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
            format!("http://{}", url)
        } else {
            url.to_string()
        };

        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(dest),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_string())));
        out.push(Event::End(TagEnd::Link));
        cursor = end;
    }

    if cursor < text.len() {
        out.push(Event::Text(CowStr::from(text[cursor..].to_string())));
    }
}

/// Drop trailing punctuation that ends the sentence rather than the URL.
fn trim_url(url: &str) -> &str {
    let mut url = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '"', '\'']);
    // Keep a closing paren only if the URL opened one.
    while url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
        url = &url[..url.len() - 1];
        url = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '"', '\'']);
    }
    url
}

/// `[[Page]]` points at the rendered `Page.html`.
fn append_wikilink_extension(events: &mut [Event<'_>]) {
    for event in events.iter_mut() {
        if let Event::Start(Tag::Link {
            link_type: LinkType::WikiLink { .. },
            dest_url,
            ..
        }) = event
        {
            let (target, fragment) = match dest_url.split_once('#') {
                Some((target, fragment)) => (target.to_string(), format!("#{}", fragment)),
                None => (dest_url.to_string(), String::new()),
            };
            let has_extension = target
                .rsplit('/')
                .next()
                .is_some_and(|name| name.contains('.'));
            if !target.is_empty() && !has_extension {
                *dest_url = CowStr::from(format!("{}.html{}", target, fragment));
            }
        }
    }
}

struct HeadingEntry {
    level: HeadingLevel,
    id: String,
    text: String,
}

/// Give every heading an id (keeping explicit ones) and return them in order.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<HeadingEntry> {
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut headings = Vec::new();

    for i in 0..events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[i] else {
            continue;
        };
        let level = *level;
        let explicit = id.as_ref().map(|id| id.to_string());

        let mut text = String::new();
        for event in &events[i + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) | Event::InlineMath(t) => text.push_str(t),
                _ => {}
            }
        }

        let id = match explicit {
            Some(id) => id,
            None => {
                let base = match slugify(&text) {
                    slug if slug.is_empty() => "section".to_string(),
                    slug => slug,
                };
                let id = unique_id(&mut used, base);
                if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
                    *slot = Some(CowStr::from(id.clone()));
                }
                id
            }
        };
        used.entry(id.clone()).or_insert(0);

        headings.push(HeadingEntry {
            level,
            id,
            text: text.trim().to_string(),
        });
    }

    headings
}

fn unique_id(used: &mut HashMap<String, usize>, base: String) -> String {
    match used.get_mut(&base) {
        None => {
            used.insert(base.clone(), 0);
            base
        }
        Some(count) => {
            *count += 1;
            let candidate = format!("{}-{}", base, count);
            unique_id(used, candidate)
        }
    }
}

/// Lowercase, replace non-alphanumeric runs with hyphens, strip edge hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn table_of_contents(headings: &[HeadingEntry]) -> String {
    let mut nav = String::from("<nav class=\"toc\">\n<ul>\n");
    for heading in headings {
        nav.push_str(&format!(
            "<li class=\"toc-h{}\"><a href=\"#",
            heading.level as usize
        ));
        escape_href(&mut nav, &heading.id).expect("writing to a String cannot fail");
        nav.push_str("\">");
        escape_html(&mut nav, &heading.text).expect("writing to a String cannot fail");
        nav.push_str("</a></li>\n");
    }
    nav.push_str("</ul>\n</nav>\n");
    nav
}
