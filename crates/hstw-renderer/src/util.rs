//! Shared helpers for HTML generation.

use std::collections::HashSet;

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Derive a heading anchor from its text.
///
/// Lowercases, drops punctuation, and collapses whitespace and hyphen runs
/// into a single `-`.
///
/// # Examples
///
/// ```
/// use hstw_renderer::slugify;
///
/// assert_eq!(slugify("About"), "about");
/// assert_eq!(slugify("Time-series, with  Merlion!"), "time-series-with-merlion");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut separator = false;
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if separator && !slug.is_empty() {
                slug.push('-');
            }
            separator = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            separator = true;
        }
    }
    slug
}

/// Make `id` unique among `used` by appending or bumping a `_N` suffix.
///
/// The returned id is recorded in `used`.
pub(crate) fn unique_id(id: String, used: &mut HashSet<String>) -> String {
    let mut candidate = id;
    while candidate.is_empty() || used.contains(&candidate) {
        candidate = match candidate.rsplit_once('_') {
            Some((stem, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => {
                let next = n.parse::<u64>().map_or(1, |v| v + 1);
                format!("{stem}_{next}")
            }
            _ => format!("{candidate}_1"),
        };
    }
    used.insert(candidate.clone());
    candidate
}
