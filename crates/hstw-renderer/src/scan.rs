//! Lenient element scanner for rendered HTML.
//!
//! Rendered posts are HTML, not XML: text may hold bare `&` and `<`, void
//! elements like `<img>` and `<br>` stay unclosed, and attributes may be
//! unquoted. Documents are parsed with the HTML5 algorithm, which recovers
//! from every such error, and the resulting tree is walked in document order.

use std::collections::HashMap;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// An element found in HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlElement {
    /// Lowercased tag name.
    pub name: String,
    /// Attributes with entity-decoded values.
    pub attrs: HashMap<String, String>,
}

impl HtmlElement {
    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Collect every element named `name` in document order.
///
/// Malformed markup never fails; it is repaired the way browsers do.
#[must_use]
pub fn scan_elements(html: &str, name: &str) -> Vec<HtmlElement> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let mut found = Vec::new();
    collect(&dom.document, name, &mut found);
    found
}

fn collect(node: &Handle, name: &str, found: &mut Vec<HtmlElement>) {
    if let NodeData::Element {
        name: tag, attrs, ..
    } = &node.data
        && &*tag.local == name
    {
        let mut decoded = HashMap::new();
        for attr in attrs.borrow().iter() {
            decoded
                .entry(attr.name.local.to_string())
                .or_insert_with(|| attr.value.to_string());
        }
        found.push(HtmlElement {
            name: tag.local.to_string(),
            attrs: decoded,
        });
    }
    for child in node.children.borrow().iter() {
        collect(child, name, found);
    }
}
