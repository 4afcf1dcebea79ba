//! Markdown to HubSpot HTML.

use hstw_renderer::{MarkdownConverter, postprocess};
use tracing::info;

use crate::error::SourceError;
use crate::source::{Source, SourceReader};

/// Read `source` and convert it to post-processed HTML.
///
/// # Errors
///
/// Returns [`SourceError`] if the source cannot be read.
pub fn convert(source: &Source, reader: &SourceReader) -> Result<String, SourceError> {
    info!("Converting to HTML: {source}");
    let markdown = reader.read(source)?;
    Ok(convert_text(&markdown))
}

/// Convert Markdown text to post-processed HTML.
#[must_use]
pub fn convert_text(markdown: &str) -> String {
    let result = MarkdownConverter::new().convert(markdown);
    postprocess(&result.html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "\
# Merlion

## About

Read about [time series modeling](https://en.wikipedia.org/wiki/Time_series#Models).

```python
from merlion.models.defaults import DefaultDetectorConfig, DefaultDetector

model = DefaultDetector(DefaultDetectorConfig())
```
";

    fn check_content(html: &str) {
        assert!(html.contains(
            r##"<h2 id="about">About <a class="headerlink" href="#about" title="Permalink to heading About">¶</a></h2>"##
        ));
        assert!(html.contains(
            r#"<a href="https://en.wikipedia.org/wiki/Time_series#Models">time series modeling</a>"#
        ));
        assert!(html.contains(
            r#"{% module_attribute "code" is_json="true" %}{% raw %}"<pre><code>from merlion.models.defaults import DefaultDetectorConfig, DefaultDetector\n\n"#
        ));
    }

    #[test]
    fn test_convert_text() {
        check_content(&convert_text(POST));
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, POST).unwrap();

        let html = convert(&Source::Path(path), &SourceReader::new()).unwrap();
        check_content(&html);
    }

    #[test]
    fn test_convert_handle() {
        let markdown = SourceReader::read_from(POST.as_bytes()).unwrap();
        check_content(&convert_text(&markdown));
    }
}
