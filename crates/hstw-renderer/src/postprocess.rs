//! HTML post-processing for HubSpot blog posts.
//!
//! Runs three text passes over converter output:
//!
//! 1. [`HeaderLinks`]: appends a `¶` permalink to every `<hN id="...">` heading
//!    and adds the matching stylesheet once per document.
//! 2. Heading spacing: a newline before every heading tag.
//! 3. [`CodeBlocks`]: replaces `<pre><code>` blocks with HubSpot "Code Block"
//!    module widgets.
//!
//! The passes are regex rewrites, not DOM transforms. Heading titles are carried
//! through verbatim, so a literal `</h2>` inside a title ends the match early.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use uuid::Uuid;

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<(?P<tag>h[1-6])\s+id="(?P<id>[^"]+)">(?P<title>.+?)</h[1-6]>"#).unwrap()
});

static HEADING_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h[1-6]\b").unwrap());

static CODE_BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pre><code(?:\s[^>]*)?>(?P<code>.+?)</code></pre>").unwrap()
});

/// Header link styles, adapted from the Sphinx basic and classic themes.
/// Copyright (c) 2007-2023 by the Sphinx team, BSD-2-Clause.
const HEADERLINK_CSS: &str = r"

<style>
/* basic.css */

/*
a.headerlink {
    visibility: hidden;
}
*/

h1:hover > a.headerlink,
h2:hover > a.headerlink,
h3:hover > a.headerlink,
h4:hover > a.headerlink,
h5:hover > a.headerlink,
h6:hover > a.headerlink,
dt:hover > a.headerlink,
caption:hover > a.headerlink,
p.caption:hover > a.headerlink,
div.code-block-caption:hover > a.headerlink {
    visibility: visible;
    text-decoration: none;
}

/* classic.css */
a.headerlink {
    color: #dddddd;
    font-size: 0.8em;
    padding: 0 4px 0 4px;
    text-decoration: none;
}

a.headerlink:hover {
    color: #888888;
}
</style>
";

/// HubSpot module markup for a code block.
///
/// `%%UUID%%` names the widget instance, `%%CODE%%` receives the JSON string.
const CODE_BLOCK_TEMPLATE: &str = r#"
{% module_block module "widget_%%UUID%%" %}
{% module_attribute "child_css" is_json="true" %}{% raw %}{}{% endraw %}{% end_module_attribute %}
{% module_attribute "code" is_json="true" %}{% raw %}%%CODE%%{% endraw %}{% end_module_attribute %}
{% module_attribute "css" is_json="true" %}{% raw %}{}{% endraw %}{% end_module_attribute %}
{% module_attribute "definition_id" is_json="true" %}{% raw %}null{% endraw %}{% end_module_attribute %}
{% module_attribute "field_types" is_json="true" %}{% raw %}{"code":"richtext","language":"choice","line_wraps":"boolean","margin_after_module":"number","show_copy_button":"boolean","show_line_numbers":"boolean"}{% endraw %}{% end_module_attribute %}
{% module_attribute "label" is_json="true" %}{% raw %}null{% endraw %}{% end_module_attribute %}
{% module_attribute "module_id" is_json="true" %}{% raw %}111341816899{% endraw %}{% end_module_attribute %}
{% module_attribute "path" is_json="true" %}{% raw %}"/sf2-crate/modules/Code Block"{% endraw %}{% end_module_attribute %}
{% module_attribute "schema_version" is_json="true" %}{% raw %}2{% endraw %}{% end_module_attribute %}
{% module_attribute "show_copy_button" is_json="true" %}{% raw %}true{% endraw %}{% end_module_attribute %}
{% module_attribute "show_line_numbers" is_json="true" %}{% raw %}true{% endraw %}{% end_module_attribute %}
{% module_attribute "smart_objects" is_json="true" %}{% raw %}null{% endraw %}{% end_module_attribute %}
{% module_attribute "smart_type" is_json="true" %}{% raw %}"NOT_SMART"{% endraw %}{% end_module_attribute %}
{% module_attribute "tag" is_json="true" %}{% raw %}"module"{% endraw %}{% end_module_attribute %}
{% module_attribute "type" is_json="true" %}{% raw %}"module"{% endraw %}{% end_module_attribute %}
{% module_attribute "wrap_field_tag" is_json="true" %}{% raw %}"div"{% endraw %}{% end_module_attribute %}
{% end_module_block %}
"#;

/// Permalink handles for headings.
///
/// Turns `<h2 id="overview">Overview</h2>` into
/// `<h2 id="overview">Overview <a class="headerlink" href="#overview" title="Permalink to heading Overview">¶</a></h2>`.
pub struct HeaderLinks;

impl HeaderLinks {
    /// Rewrite all headings and append the header link stylesheet.
    #[must_use]
    pub fn process(html: &str) -> String {
        let mut out = HEADER_PATTERN
            .replace_all(html, |caps: &Captures<'_>| {
                let tag = &caps["tag"];
                let id = &caps["id"];
                let title = &caps["title"];
                format!(
                    r#"<{tag} id="{id}">{title} {link}</{tag}>"#,
                    link = Self::link(id, title)
                )
            })
            .into_owned();
        out.push_str(HEADERLINK_CSS);
        out
    }

    /// Permalink anchor for a heading.
    #[must_use]
    pub fn link(reference: &str, title: &str) -> String {
        format!(
            r##"<a class="headerlink" href="#{reference}" title="Permalink to heading {title}">¶</a>"##
        )
    }
}

/// HubSpot "Code Block" module widgets for `<pre><code>` blocks.
pub struct CodeBlocks;

impl CodeBlocks {
    /// Replace every code block with a widget.
    ///
    /// The `class` attribute of `<code>` (the highlight language) is dropped.
    #[must_use]
    pub fn process(html: &str) -> String {
        CODE_BLOCK_PATTERN
            .replace_all(html, |caps: &Captures<'_>| Self::widget(&caps["code"]))
            .into_owned()
    }

    /// Render one widget around already HTML-escaped code.
    #[must_use]
    pub fn widget(code: &str) -> String {
        let inner = format!("<pre><code>{code}</code></pre>");
        // Serializing a str cannot fail.
        let json = ascii_json(&serde_json::to_string(&inner).unwrap_or_default());
        CODE_BLOCK_TEMPLATE
            .replace("%%UUID%%", &Uuid::new_v4().to_string())
            .replace("%%CODE%%", &json)
    }
}

/// Escape non-ASCII characters of a JSON text as `\uXXXX` UTF-16 units.
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            let _ = write!(out, "\\u{unit:04x}");
        }
    }
    out
}

/// Insert a newline before every heading tag.
#[must_use]
pub fn space_headings(html: &str) -> String {
    HEADING_START.replace_all(html, "\n$0").into_owned()
}

/// Post-process converter output for HubSpot.
#[must_use]
pub fn postprocess(html: &str) -> String {
    let html = HeaderLinks::process(html);
    let html = space_headings(&html);
    CodeBlocks::process(&html)
}
