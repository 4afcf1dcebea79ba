//! Relocation of local images referenced by rendered HTML.
//!
//! [`ImageTranslator`] finds every `<img>` in a document, resolves relative
//! sources against the document location, hands each one to an
//! [`ImageUploader`] and rewrites the HTML to the returned remote URLs.
//!
//! The three image lists (`images_in`, `images_local`, `images_remote`) are
//! positional: entry `i` of each describes the same `<img>` tag.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::scan::scan_elements;

/// Image reference found in HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlImage {
    /// `alt` text, if any.
    pub alt: Option<String>,
    /// Image source, rewritten as the image moves through the pipeline.
    pub src: String,
}

/// Uploads a local image and returns its public URL.
pub trait ImageUploader {
    /// Error returned when an upload fails.
    type Error;

    /// Upload the file at `source` under the file name `name`.
    ///
    /// # Errors
    ///
    /// Implementation specific. A failure aborts the translation.
    fn upload(&self, source: &Path, name: &str) -> Result<String, Self::Error>;
}

/// Translate local image references into uploaded remote ones.
#[derive(Debug)]
pub struct ImageTranslator {
    html_in: String,
    source_path: Option<PathBuf>,
    images_in: Vec<HtmlImage>,
    images_local: Vec<HtmlImage>,
    images_remote: Vec<HtmlImage>,
    html_out: Option<String>,
}

impl ImageTranslator {
    /// Create a translator for `html` rendered from the document at `source_path`.
    #[must_use]
    pub fn new(html: impl Into<String>, source_path: Option<&Path>) -> Self {
        Self {
            html_in: html.into(),
            source_path: source_path.map(Path::to_path_buf),
            images_in: Vec::new(),
            images_local: Vec::new(),
            images_remote: Vec::new(),
            html_out: None,
        }
    }

    /// Scan and resolve.
    pub fn discover(&mut self) -> &mut Self {
        self.scan().resolve()
    }

    /// Upload and produce.
    ///
    /// # Errors
    ///
    /// Returns the uploader's error for the first image that fails.
    pub fn process<U: ImageUploader>(&mut self, uploader: Option<&U>) -> Result<&mut Self, U::Error> {
        self.upload(uploader)?;
        Ok(self.produce())
    }

    /// Collect every `<img>` element with a `src` attribute.
    pub fn scan(&mut self) -> &mut Self {
        self.images_in = scan_elements(&self.html_in, "img")
            .into_iter()
            .filter_map(|element| {
                let src = element.attr("src")?.to_owned();
                Some(HtmlImage {
                    alt: element.attr("alt").map(str::to_owned),
                    src,
                })
            })
            .collect();
        debug!("Found {} images", self.images_in.len());
        self
    }

    /// Compute effective paths for discovered images.
    ///
    /// Without a source path, sources are taken as they are.
    pub fn resolve(&mut self) -> &mut Self {
        let base = self.source_path.as_deref().map(base_directory);
        self.images_local = self
            .images_in
            .iter()
            .map(|image| {
                let mut local = image.clone();
                if let Some(base) = &base
                    && !is_remote(&image.src)
                    && !image.src.starts_with('/')
                {
                    local.src = base.join(&image.src).to_string_lossy().into_owned();
                }
                local
            })
            .collect();
        self
    }

    /// Upload every resolved image, in order.
    ///
    /// # Errors
    ///
    /// Returns the uploader's error for the first image that fails.
    pub fn upload<U: ImageUploader>(&mut self, uploader: Option<&U>) -> Result<&mut Self, U::Error> {
        let Some(uploader) = uploader else {
            warn!("No upload without uploader");
            return Ok(self);
        };

        self.images_remote.clear();
        for local in &self.images_local {
            let path = Path::new(&local.src);
            let name = path
                .file_name()
                .map_or_else(|| local.src.clone(), |n| n.to_string_lossy().into_owned());
            let url = uploader.upload(path, &name)?;
            debug!("Uploaded image {} to {url}", local.src);
            self.images_remote.push(HtmlImage {
                alt: local.alt.clone(),
                src: url,
            });
        }
        Ok(self)
    }

    /// Produce output HTML with every original source replaced by its remote URL.
    pub fn produce(&mut self) -> &mut Self {
        let mut html = self.html_in.clone();
        for (image_in, image_remote) in self.images_in.iter().zip(&self.images_remote) {
            html = html.replace(&image_in.src, &image_remote.src);
        }
        self.html_out = Some(html);
        self
    }

    /// Images as discovered in the HTML.
    #[must_use]
    pub fn images_in(&self) -> &[HtmlImage] {
        &self.images_in
    }

    /// Images with resolved local paths.
    #[must_use]
    pub fn images_local(&self) -> &[HtmlImage] {
        &self.images_local
    }

    /// Images with their remote URLs.
    #[must_use]
    pub fn images_remote(&self) -> &[HtmlImage] {
        &self.images_remote
    }

    /// Output HTML, or the input when [`produce`](Self::produce) has not run.
    #[must_use]
    pub fn html_out(&self) -> &str {
        self.html_out.as_deref().unwrap_or(&self.html_in)
    }

    /// Consume the translator, returning the output HTML.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html_out.unwrap_or(self.html_in)
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// Directory that relative image sources are resolved against.
fn base_directory(source: &Path) -> PathBuf {
    if source.is_dir() {
        return source.to_path_buf();
    }
    source
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use pretty_assertions::assert_eq;

    /// Records calls and answers with a fixed URL.
    struct StubUploader {
        url: &'static str,
        calls: RefCell<Vec<(PathBuf, String)>>,
    }

    impl StubUploader {
        fn new(url: &'static str) -> Self {
            Self {
                url,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageUploader for StubUploader {
        type Error = String;

        fn upload(&self, source: &Path, name: &str) -> Result<String, String> {
            self.calls
                .borrow_mut()
                .push((source.to_path_buf(), name.to_owned()));
            Ok(self.url.to_owned())
        }
    }

    struct FailingUploader;

    impl ImageUploader for FailingUploader {
        type Error = String;

        fn upload(&self, source: &Path, _name: &str) -> Result<String, String> {
            Err(format!("cannot upload {}", source.display()))
        }
    }

    const URL: &str = "https://cdn.example.org/hubfs/bar.png";

    #[test]
    fn test_resolve_relative_to_document() {
        let mut translator = ImageTranslator::new(
            r#"<p><img src="images/bar.png" alt="Bar"></p>"#,
            Some(Path::new("/docs/page.md")),
        );
        translator.discover();

        assert_eq!(
            translator.images_in(),
            &[HtmlImage {
                alt: Some("Bar".to_owned()),
                src: "images/bar.png".to_owned()
            }]
        );
        assert_eq!(translator.images_local()[0].src, "/docs/images/bar.png");
    }

    #[test]
    fn test_resolve_relative_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator =
            ImageTranslator::new(r#"<img src="bar.png">"#, Some(dir.path()));
        translator.discover();

        assert_eq!(
            translator.images_local()[0].src,
            dir.path().join("bar.png").to_string_lossy()
        );
    }

    #[test]
    fn test_resolve_keeps_remote_and_absolute() {
        let html = r#"<img src="https://example.org/a.png"><img src="http://example.org/b.png"><img src="/static/c.png">"#;
        let mut translator = ImageTranslator::new(html, Some(Path::new("/docs/page.md")));
        translator.discover();

        let sources: Vec<&str> = translator
            .images_local()
            .iter()
            .map(|i| i.src.as_str())
            .collect();
        assert_eq!(
            sources,
            vec![
                "https://example.org/a.png",
                "http://example.org/b.png",
                "/static/c.png"
            ]
        );
    }

    #[test]
    fn test_produce_replaces_every_occurrence() {
        let html = r#"<img src="images/bar.png"><p>See images/bar.png</p>"#;
        let uploader = StubUploader::new(URL);
        let mut translator = ImageTranslator::new(html, Some(Path::new("/docs/page.md")));
        translator.discover();
        translator.process(Some(&uploader)).unwrap();

        assert_eq!(
            translator.html_out(),
            format!(r#"<img src="{URL}"><p>See {URL}</p>"#)
        );
        assert_eq!(
            *uploader.calls.borrow(),
            vec![(PathBuf::from("/docs/images/bar.png"), "bar.png".to_owned())]
        );
    }

    #[test]
    fn test_loose_html_translated() {
        let html = "<div class=note>Q&A session &nbsp; 1 < 2</div>\n<p><img src=images/bar.png alt=Bar>";
        let uploader = StubUploader::new(URL);
        let mut translator = ImageTranslator::new(html, Some(Path::new("/docs/page.md")));
        translator.discover();
        translator.process(Some(&uploader)).unwrap();

        assert_eq!(translator.images_local()[0].src, "/docs/images/bar.png");
        assert_eq!(
            translator.html_out(),
            format!("<div class=note>Q&A session &nbsp; 1 < 2</div>\n<p><img src={URL} alt=Bar>")
        );
    }

    #[test]
    fn test_duplicate_sources_uploaded_per_tag() {
        let html = r#"<img src="a.png"><img src="a.png">"#;
        let uploader = StubUploader::new(URL);
        let mut translator = ImageTranslator::new(html, Some(Path::new("/docs/page.md")));
        translator.discover();
        translator.process(Some(&uploader)).unwrap();

        assert_eq!(uploader.calls.borrow().len(), 2);
        assert_eq!(translator.images_remote().len(), 2);
        assert_eq!(
            translator.html_out(),
            format!(r#"<img src="{URL}"><img src="{URL}">"#)
        );
    }

    #[test]
    fn test_zero_images_is_noop() {
        let html = "<h1 id=\"x\">X</h1>\n<p>No pictures.</p>\n";
        let uploader = StubUploader::new(URL);
        let mut translator = ImageTranslator::new(html, Some(Path::new("/docs/page.md")));
        translator.discover();
        translator.process(Some(&uploader)).unwrap();

        assert_eq!(translator.html_out(), html);
        assert!(uploader.calls.borrow().is_empty());
    }

    #[test]
    fn test_no_uploader_leaves_html() {
        let html = r#"<img src="a.png">"#;
        let mut translator = ImageTranslator::new(html, Some(Path::new("/docs/page.md")));
        translator.discover();
        translator.process::<StubUploader>(None).unwrap();

        assert!(translator.images_remote().is_empty());
        assert_eq!(translator.html_out(), html);
    }

    #[test]
    fn test_upload_failure_aborts() {
        let mut translator =
            ImageTranslator::new(r#"<img src="a.png">"#, Some(Path::new("/docs/page.md")));
        translator.discover();
        let err = translator.process(Some(&FailingUploader)).unwrap_err();

        assert_eq!(err, "cannot upload /docs/a.png");
    }

    #[test]
    fn test_without_source_path_sources_unchanged() {
        let mut translator = ImageTranslator::new(r#"<img src="images/a.png">"#, None);
        translator.discover();

        assert_eq!(translator.images_local()[0].src, "images/a.png");
    }

    #[test]
    fn test_image_without_src_skipped() {
        let mut translator = ImageTranslator::new(r#"<img alt="broken">"#, None);
        translator.discover();

        assert!(translator.images_in().is_empty());
    }

    #[test]
    fn test_into_html_before_produce() {
        let translator = ImageTranslator::new("<p>x</p>", None);
        assert_eq!(translator.into_html(), "<p>x</p>");
    }
}
