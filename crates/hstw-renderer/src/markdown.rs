//! Markdown to HTML conversion.
//!
//! Wraps pulldown-cmark with the extension set blog posts are written with:
//! admonitions, fenced code, footnotes, tables, and a table of contents.
//! Headings receive slug anchors so the post-processor can attach permalinks.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::collections::HashSet;
use std::fmt::Write;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use tracing::debug;

use crate::preprocess::{TOC_PLACEHOLDER, preprocess};
use crate::util::{escape_html, slugify, unique_id};

/// Heading collected for the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Anchor id assigned to the heading.
    pub id: String,
    /// Plain heading text.
    pub title: String,
}

/// Result of converting markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Raw HTML, before post-processing.
    pub html: String,
    /// Headings in document order.
    pub toc: Vec<TocEntry>,
}

/// Markdown converter with a fixed extension set.
#[derive(Clone, Debug, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    /// Create a converter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parser options used for every conversion.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_HEADING_ATTRIBUTES
    }

    /// Convert markdown text to HTML.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> RenderResult {
        let source = preprocess(markdown);
        let mut events: Vec<Event<'_>> = Parser::new_ext(&source, self.parser_options()).collect();
        let toc = assign_heading_ids(&mut events);
        debug!("Converted markdown with {} headings", toc.len());

        let mut output = String::with_capacity(source.len() + source.len() / 2);
        html::push_html(&mut output, events.into_iter());

        if output.contains(TOC_PLACEHOLDER) {
            output = output.replace(TOC_PLACEHOLDER, &render_toc(&toc));
        }

        RenderResult { html: output, toc }
    }
}

/// Give every heading an `id` and collect the table of contents.
///
/// Explicit ids (`# Title {#custom}`) are kept; all others are slugs of the
/// heading text, made unique within the document.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut used = HashSet::new();
    let mut toc = Vec::new();

    for idx in 0..events.len() {
        let (level, explicit) = match &events[idx] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                (heading_level_to_num(*level), id.as_ref().map(ToString::to_string))
            }
            _ => continue,
        };

        let title = heading_text(&events[idx + 1..]);
        let id = unique_id(explicit.unwrap_or_else(|| slugify(&title)), &mut used);

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[idx] {
            *slot = Some(CowStr::from(id.clone()));
        }
        toc.push(TocEntry { level, id, title });
    }

    toc
}

/// Concatenated text of the heading whose content starts at `events[0]`.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Render nested `<ul>` lists for the table of contents.
fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    let mut open_levels: Vec<u8> = Vec::new();

    for entry in entries {
        match open_levels.last() {
            None => {
                out.push_str("<ul>\n");
                open_levels.push(entry.level);
            }
            Some(&last) if entry.level > last => {
                out.push_str("\n<ul>\n");
                open_levels.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>\n");
                while open_levels.len() > 1
                    && open_levels.last().is_some_and(|&last| entry.level < last)
                {
                    open_levels.pop();
                    out.push_str("</ul>\n</li>\n");
                }
            }
        }
        write!(
            out,
            r##"<li><a href="#{}">{}</a>"##,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .unwrap();
    }

    if !open_levels.is_empty() {
        out.push_str("</li>\n");
        for _ in 1..open_levels.len() {
            out.push_str("</ul>\n</li>\n");
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
    out
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(markdown: &str) -> String {
        MarkdownConverter::new().convert(markdown).html
    }

    #[test]
    fn test_heading_gets_slug_id() {
        assert_eq!(convert("## About\n"), "<h2 id=\"about\">About</h2>\n");
    }

    #[test]
    fn test_duplicate_headings_unique_ids() {
        let html = convert("## Setup\n\n## Setup\n");
        assert!(html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert!(html.contains(r#"<h2 id="setup_1">Setup</h2>"#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let html = convert("## Install {#installation}\n");
        assert!(html.contains(r#"<h2 id="installation">Install</h2>"#));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = MarkdownConverter::new().convert("# Using `cr8`\n");
        assert_eq!(result.toc[0].id, "using-cr8");
        assert_eq!(result.toc[0].title, "Using cr8");
    }

    #[test]
    fn test_link() {
        let html = convert(
            "[time series modeling](https://en.wikipedia.org/wiki/Time_series#Models)\n",
        );
        assert!(html.contains(
            r#"<a href="https://en.wikipedia.org/wiki/Time_series#Models">time series modeling</a>"#
        ));
    }

    #[test]
    fn test_fenced_code_with_language() {
        let html = convert("```python\nimport merlion\n```\n");
        assert_eq!(
            html,
            "<pre><code class=\"language-python\">import merlion\n</code></pre>\n"
        );
    }

    #[test]
    fn test_table() {
        let html = convert("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_footnote() {
        let html = convert("Text[^1].\n\n[^1]: The note.\n");
        assert!(html.contains("footnote-reference"));
        assert!(html.contains("footnote-definition"));
    }

    #[test]
    fn test_admonition_body_is_markdown() {
        let html = convert("!!! note\n    Some **bold** text.\n");
        assert!(html.contains(r#"<div class="admonition note">"#));
        assert!(html.contains(r#"<p class="admonition-title">Note</p>"#));
        assert!(html.contains("<p>Some <strong>bold</strong> text.</p>"));
        assert!(html.contains("</div>"));
    }

    #[test]
    fn test_toc_rendered() {
        let html = convert("[TOC]\n\n# One\n\n## Two\n\n# Three\n");
        assert!(!html.contains(TOC_PLACEHOLDER));
        assert!(html.starts_with("<div class=\"toc\">\n<ul>\n"));
        assert!(html.contains(
            "<li><a href=\"#one\">One</a>\n<ul>\n<li><a href=\"#two\">Two</a></li>\n</ul>\n</li>\n<li><a href=\"#three\">Three</a></li>\n</ul>\n</div>"
        ));
    }

    #[test]
    fn test_toc_without_headings() {
        assert_eq!(render_toc(&[]), "<div class=\"toc\">\n</div>\n");
    }

    #[test]
    fn test_toc_entries_collected() {
        let result = MarkdownConverter::new().convert("# A\n\n### B\n");
        assert_eq!(
            result.toc,
            vec![
                TocEntry {
                    level: 1,
                    id: "a".to_owned(),
                    title: "A".to_owned()
                },
                TocEntry {
                    level: 3,
                    id: "b".to_owned(),
                    title: "B".to_owned()
                },
            ]
        );
    }
}
