//! Classification of sources by file suffix.

use std::path::Path;

const MARKUP_SUFFIXES: &[&str] = &[".md", ".rst"];
const HTML_SUFFIXES: &[&str] = &[".html", ".htm", ".html5"];
const TEXT_SUFFIXES: &[&str] = &[".txt"];

/// Decide how a source is published from its name.
///
/// Markup and HTML sources become blog posts, everything else is a file.
/// Works on local paths and URLs alike; only the trailing suffix counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeResolver {
    suffix: String,
}

impl ContentTypeResolver {
    /// Resolver for the path or URL `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let suffix = Path::new(name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self { suffix }
    }

    /// Dotted, lowercased suffix, e.g. `.md`. Empty without one.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Text to be converted to HTML.
    #[must_use]
    pub fn is_markup(&self) -> bool {
        MARKUP_SUFFIXES.contains(&self.suffix.as_str())
    }

    /// HTML, published verbatim.
    #[must_use]
    pub fn is_html(&self) -> bool {
        HTML_SUFFIXES.contains(&self.suffix.as_str())
    }

    /// Any text format, including plain text.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.is_markup() || self.is_html() || TEXT_SUFFIXES.contains(&self.suffix.as_str())
    }

    /// Anything that is not text.
    #[must_use]
    pub fn is_file(&self) -> bool {
        !self.is_text()
    }
}
