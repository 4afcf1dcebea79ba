//! Line-based Markdown preprocessing.
//!
//! Rewrites the two block extensions that `CommonMark` has no syntax for into
//! constructs pulldown-cmark passes through:
//!
//! - Admonitions (`!!! note "Title"` followed by an indented body) become
//!   `<div class="admonition note">` HTML blocks wrapping the body, which is
//!   still parsed as Markdown.
//! - A line consisting of `[TOC]` becomes [`TOC_PLACEHOLDER`], replaced by the
//!   rendered table of contents after conversion.
//!
//! Lines inside fenced code blocks are never rewritten.

use crate::fence::FenceTracker;
use crate::util::escape_html;

/// Marker left in the HTML where the table of contents goes.
pub(crate) const TOC_PLACEHOLDER: &str = "<!-- hstw:toc -->";

/// Marker line requesting a table of contents.
const TOC_MARKER: &str = "[TOC]";

/// Admonition opener.
const ADMONITION_MARKER: &str = "!!!";

/// Parsed `!!! kind "Title"` line.
#[derive(Debug, PartialEq, Eq)]
struct AdmonitionHeader<'a> {
    classes: Vec<&'a str>,
    /// `None` means "derive from the first class", `Some("")` means no title.
    title: Option<&'a str>,
}

impl AdmonitionHeader<'_> {
    fn title_text(&self) -> Option<String> {
        match self.title {
            Some("") => None,
            Some(title) => Some(title.to_owned()),
            None => self.classes.first().map(|kind| capitalize(kind)),
        }
    }
}

/// Preprocess markdown text.
#[must_use]
pub(crate) fn preprocess(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut fence = FenceTracker::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        let is_marker = fence.update(line);
        if is_marker || fence.in_fence() {
            out.push(line.to_owned());
            idx += 1;
            continue;
        }

        if line.trim() == TOC_MARKER {
            out.push(TOC_PLACEHOLDER.to_owned());
            idx += 1;
            continue;
        }

        if let Some(header) = parse_admonition(line) {
            let end = admonition_body_end(&lines, idx + 1);
            let body = lines[idx + 1..end]
                .iter()
                .map(|l| dedent(l))
                .collect::<Vec<_>>()
                .join("\n");
            out.push(render_admonition(&header, &preprocess(&body)));
            idx = end;
            continue;
        }

        out.push(line.to_owned());
        idx += 1;
    }

    let mut result = out.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Parse an admonition opener line.
fn parse_admonition(line: &str) -> Option<AdmonitionHeader<'_>> {
    let rest = line.strip_prefix(ADMONITION_MARKER)?;
    let (kinds, title) = match rest.find('"') {
        Some(open) => {
            let quoted = &rest[open + 1..];
            let close = quoted.rfind('"')?;
            if !quoted[close + 1..].trim().is_empty() {
                return None;
            }
            (&rest[..open], Some(&quoted[..close]))
        }
        None => (rest, None),
    };

    let classes: Vec<&str> = kinds.split_whitespace().collect();
    let valid = !classes.is_empty()
        && classes.iter().all(|c| {
            c.chars()
                .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-')
        });
    valid.then_some(AdmonitionHeader { classes, title })
}

/// Index one past the last line of an admonition body starting at `start`.
///
/// The body is every following indented line; blank lines belong to it only
/// when more indented lines follow.
fn admonition_body_end(lines: &[&str], start: usize) -> usize {
    let mut end = start;
    let mut idx = start;
    while idx < lines.len() {
        let line = lines[idx];
        if line.trim().is_empty() {
            idx += 1;
            continue;
        }
        if !is_indented(line) {
            break;
        }
        idx += 1;
        end = idx;
    }
    end
}

fn is_indented(line: &str) -> bool {
    line.starts_with("    ") || line.starts_with('\t')
}

/// Remove one level of indentation.
fn dedent(line: &str) -> &str {
    line.strip_prefix("    ")
        .or_else(|| line.strip_prefix('\t'))
        .unwrap_or_else(|| line.trim_start())
}

fn render_admonition(header: &AdmonitionHeader<'_>, body: &str) -> String {
    let mut html = format!(
        r#"<div class="admonition {}">"#,
        escape_html(&header.classes.join(" "))
    );
    if let Some(title) = header.title_text() {
        html.push_str(&format!(
            "\n<p class=\"admonition-title\">{}</p>",
            escape_html(&title)
        ));
    }
    html.push_str("\n\n");
    html.push_str(body.trim_end());
    html.push_str("\n\n</div>");
    html
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_markdown_unchanged() {
        let input = "# Title\n\nSome *text*.\n";
        assert_eq!(preprocess(input), input);
    }

    #[test]
    fn test_toc_marker() {
        assert_eq!(
            preprocess("[TOC]\n\n# Title\n"),
            "<!-- hstw:toc -->\n\n# Title\n"
        );
    }

    #[test]
    fn test_toc_marker_inside_fence_untouched() {
        let input = "```\n[TOC]\n```\n";
        assert_eq!(preprocess(input), input);
    }

    #[test]
    fn test_admonition_default_title() {
        let output = preprocess("!!! note\n    Be careful.\n\nAfter.\n");
        assert_eq!(
            output,
            "<div class=\"admonition note\">\n<p class=\"admonition-title\">Note</p>\n\nBe careful.\n\n</div>\n\nAfter.\n"
        );
    }

    #[test]
    fn test_admonition_custom_title() {
        let output = preprocess("!!! warning \"Mind the gap\"\n    Text.\n");
        assert!(output.contains(r#"<div class="admonition warning">"#));
        assert!(output.contains(r#"<p class="admonition-title">Mind the gap</p>"#));
    }

    #[test]
    fn test_admonition_empty_title() {
        let output = preprocess("!!! tip \"\"\n    Text.\n");
        assert!(!output.contains("admonition-title"));
        assert!(output.contains("Text."));
    }

    #[test]
    fn test_admonition_multiple_classes() {
        let output = preprocess("!!! danger highlight\n    Text.\n");
        assert!(output.contains(r#"<div class="admonition danger highlight">"#));
        assert!(output.contains(r#"<p class="admonition-title">Danger</p>"#));
    }

    #[test]
    fn test_admonition_body_spans_blank_lines() {
        let output = preprocess("!!! note\n    First.\n\n    Second.\n\nOutside.\n");
        let close = output.find("</div>").unwrap();
        assert!(output.find("Second.").unwrap() < close);
        assert!(output.find("Outside.").unwrap() > close);
    }

    #[test]
    fn test_nested_admonition() {
        let output = preprocess("!!! note\n    !!! tip\n        Inner.\n");
        assert!(output.contains(r#"<div class="admonition note">"#));
        assert!(output.contains(r#"<div class="admonition tip">"#));
        assert_eq!(output.matches("</div>").count(), 2);
    }

    #[test]
    fn test_admonition_inside_fence_untouched() {
        let input = "```\n!!! note\n    Text.\n```\n";
        assert_eq!(preprocess(input), input);
    }

    #[test]
    fn test_invalid_admonition_header() {
        assert_eq!(parse_admonition("!!!"), None);
        assert_eq!(parse_admonition("!!! \"only title\""), None);
        assert_eq!(parse_admonition("!!! note \"unterminated"), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("nOTE"), "Note");
        assert_eq!(capitalize(""), "");
    }
}
