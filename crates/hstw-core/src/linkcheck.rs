//! Link checking for Markdown sources and their rendered HTML.
//!
//! Links and images are collected from the Markdown events and from the
//! `<a href>` and `<img src>` elements of the converted HTML. Local targets
//! must exist on disk; remote targets must answer a `HEAD` (or `GET`, when
//! `HEAD` is refused) with a status below 400.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hstw_renderer::scan_elements;
use pulldown_cmark::{Event, Parser, Tag};
use tracing::{debug, info, warn};
use ureq::Agent;
use url::Url;

use crate::content_type::ContentTypeResolver;
use crate::convert::convert_text;
use crate::error::SourceError;
use crate::source::{Source, SourceReader};

/// Schemes and prefixes that are never checked.
const SKIPPED_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:", "data:"];

/// Link checker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkcheckOptions {
    /// Check remote targets over HTTP.
    pub remote: bool,
    /// Timeout per remote request.
    pub timeout: Duration,
}

impl Default for LinkcheckOptions {
    fn default() -> Self {
        Self {
            remote: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// What kind of element a target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Hyperlink.
    Link,
    /// Image source.
    Image,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => f.write_str("link"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Outcome of checking one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// Target exists.
    Ok,
    /// Target was not checked (remote checks disabled).
    Skipped,
    /// Target is missing or unreachable.
    Broken(String),
}

/// A checked target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResult {
    /// Target as written in the document.
    pub target: String,
    /// Link or image.
    pub kind: LinkKind,
    /// Check outcome.
    pub status: LinkStatus,
}

impl LinkResult {
    /// Whether the target is broken.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        matches!(self.status, LinkStatus::Broken(_))
    }
}

/// Results for one checked document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    /// Document description, e.g. `post.md (HTML)`.
    pub document: String,
    /// One result per distinct target, in discovery order.
    pub results: Vec<LinkResult>,
}

impl LinkReport {
    /// Whether no target is broken.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.results.iter().any(LinkResult::is_broken)
    }

    /// Broken targets.
    pub fn broken(&self) -> impl Iterator<Item = &LinkResult> {
        self.results.iter().filter(|r| r.is_broken())
    }
}

/// Where relative targets point.
#[derive(Debug, Clone)]
enum LinkBase {
    Directory(PathBuf),
    Url(Url),
}

impl LinkBase {
    fn for_source(source: &Source) -> Self {
        if let Some(url) = source.base_url() {
            return Self::Url(url);
        }
        let dir = source
            .local_path()
            .and_then(Path::parent)
            .map_or_else(PathBuf::new, Path::to_path_buf);
        Self::Directory(dir)
    }
}

/// Checks links of Markdown documents.
pub struct LinkChecker {
    agent: Agent,
    options: LinkcheckOptions,
}

impl LinkChecker {
    /// Create a checker.
    #[must_use]
    pub fn new(options: LinkcheckOptions) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(options.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, options }
    }

    /// Check the Markdown of `source`, then its converted HTML.
    ///
    /// HTML sources are only checked as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source cannot be read.
    pub fn check_source(
        &self,
        source: &Source,
        reader: &SourceReader,
    ) -> Result<Vec<LinkReport>, SourceError> {
        let text = reader.read(source)?;
        let base = LinkBase::for_source(source);
        let mut reports = Vec::new();

        if ContentTypeResolver::new(&source.name()).is_html() {
            info!("Checking links in HTML file: {source}");
            reports.push(self.check_targets(source.to_string(), html_links(&text), &base));
            return Ok(reports);
        }

        info!("Checking links in Markdown file: {source}");
        reports.push(self.check_targets(source.to_string(), markdown_links(&text), &base));

        let html = convert_text(&text);
        info!("Checking links in HTML of: {source}");
        reports.push(self.check_targets(format!("{source} (HTML)"), html_links(&html), &base));

        Ok(reports)
    }

    fn check_targets(
        &self,
        document: String,
        targets: Vec<(LinkKind, String)>,
        base: &LinkBase,
    ) -> LinkReport {
        let mut seen = HashSet::new();
        let results = targets
            .into_iter()
            .filter(|(_, target)| !is_skipped(target) && seen.insert(target.clone()))
            .map(|(kind, target)| {
                let status = self.check_target(&target, base);
                if let LinkStatus::Broken(reason) = &status {
                    warn!("Broken {kind}: {target} ({reason})");
                }
                LinkResult {
                    target,
                    kind,
                    status,
                }
            })
            .collect();
        LinkReport { document, results }
    }

    fn check_target(&self, target: &str, base: &LinkBase) -> LinkStatus {
        if is_remote(target) {
            return self.check_remote(target);
        }
        match base {
            LinkBase::Directory(dir) => check_local(&dir.join(strip_fragment(target))),
            LinkBase::Url(url) => match url.join(target) {
                Ok(resolved) => self.check_remote(resolved.as_str()),
                Err(e) => LinkStatus::Broken(e.to_string()),
            },
        }
    }

    fn check_remote(&self, url: &str) -> LinkStatus {
        if !self.options.remote {
            return LinkStatus::Skipped;
        }
        debug!("Probing {url}");
        let status = match self.agent.head(url).call() {
            Ok(response) if response.status().as_u16() == 405 => {
                match self.agent.get(url).call() {
                    Ok(response) => response.status().as_u16(),
                    Err(e) => return LinkStatus::Broken(e.to_string()),
                }
            }
            Ok(response) => response.status().as_u16(),
            Err(e) => return LinkStatus::Broken(e.to_string()),
        };
        if status >= 400 {
            LinkStatus::Broken(format!("HTTP {status}"))
        } else {
            LinkStatus::Ok
        }
    }
}

/// Link and image targets of a Markdown document, in order.
#[must_use]
pub fn markdown_links(markdown: &str) -> Vec<(LinkKind, String)> {
    Parser::new(markdown)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                Some((LinkKind::Link, dest_url.into_string()))
            }
            Event::Start(Tag::Image { dest_url, .. }) => {
                Some((LinkKind::Image, dest_url.into_string()))
            }
            _ => None,
        })
        .collect()
}

/// `<a href>` and `<img src>` targets of an HTML document.
#[must_use]
pub fn html_links(html: &str) -> Vec<(LinkKind, String)> {
    let mut targets: Vec<(LinkKind, String)> = scan_elements(html, "a")
        .into_iter()
        .filter_map(|e| e.attr("href").map(|href| (LinkKind::Link, href.to_owned())))
        .collect();
    targets.extend(
        scan_elements(html, "img")
            .into_iter()
            .filter_map(|e| e.attr("src").map(|src| (LinkKind::Image, src.to_owned()))),
    );
    targets
}

fn is_skipped(target: &str) -> bool {
    target.is_empty() || SKIPPED_PREFIXES.iter().any(|p| target.starts_with(p))
}

fn is_remote(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Drop `#fragment` and `?query` from a local target.
fn strip_fragment(target: &str) -> &str {
    target
        .find(['#', '?'])
        .map_or(target, |idx| &target[..idx])
}

fn check_local(path: &Path) -> LinkStatus {
    if path.exists() {
        LinkStatus::Ok
    } else {
        LinkStatus::Broken(format!("{} does not exist", path.display()))
    }
}
