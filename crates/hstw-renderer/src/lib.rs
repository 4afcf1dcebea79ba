//! Markdown to HubSpot HTML rendering.
//!
//! Turns a Markdown blog post into the HTML body HubSpot expects:
//!
//! - [`MarkdownConverter`]: Markdown to HTML with admonitions, fenced code,
//!   footnotes, tables, a table of contents and slug anchors on headings.
//! - [`postprocess`]: header permalinks, heading spacing and HubSpot
//!   "Code Block" widgets.
//! - [`ImageTranslator`]: uploads local images through an [`ImageUploader`]
//!   and points the HTML at the remote copies.
//!
//! # Example
//!
//! ```
//! use hstw_renderer::{MarkdownConverter, postprocess};
//!
//! let result = MarkdownConverter::new().convert("## About\n\nHello.\n");
//! let html = postprocess(&result.html);
//! assert!(html.contains(r##"<a class="headerlink" href="#about""##));
//! ```

mod fence;
mod images;
mod markdown;
mod postprocess;
mod preprocess;
mod scan;
mod util;

pub use images::{HtmlImage, ImageTranslator, ImageUploader};
pub use markdown::{MarkdownConverter, RenderResult, TocEntry};
pub use postprocess::{CodeBlocks, HeaderLinks, postprocess, space_headings};
pub use scan::{HtmlElement, scan_elements};
pub use util::{escape_html, slugify};
