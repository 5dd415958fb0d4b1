//! The renderable node tree.
//!
//! Templates and node-aware formatting produce trees of [`Node`]s. A node is
//! either raw text or an [`Element`]: a named wrapper with attributes,
//! children and an optional key. An element without a name is a fragment; it
//! groups its children without contributing markup of its own.
//!
//! Keys exist so that a UI layer can reconcile ordered children. Within one
//! render call every key is unique.

use std::fmt;

/// A node in a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw text.
    Text(String),
    /// A (possibly anonymous) wrapper element.
    Element(Element),
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Returns the text if this node is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Returns the key of an element node.
    pub fn key(&self) -> Option<usize> {
        self.as_element().and_then(|el| el.key)
    }

    /// Concatenates all text in the tree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serializes the tree as HTML.
    ///
    /// Fragments contribute only their children. Text and attribute values
    /// are escaped; keys are not emitted.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_html(text, out),
            Node::Element(el) => match &el.name {
                None => {
                    for child in &el.children {
                        child.write_html(out);
                    }
                }
                Some(name) => {
                    out.push('<');
                    out.push_str(name);
                    for (attr, value) in &el.attrs {
                        out.push(' ');
                        out.push_str(attr);
                        out.push_str("=\"");
                        escape_html(value, out);
                        out.push('"');
                    }
                    out.push('>');
                    for child in &el.children {
                        child.write_html(out);
                    }
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            },
        }
    }

    /// Visits every node of the tree depth-first, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        if let Node::Element(el) = self {
            for child in &el.children {
                child.walk(visit);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_content())
    }
}

/// A wrapper element: the Rust counterpart of a UI component instance.
///
/// # Example
///
/// ```rust
/// use lokale_template::{Element, Node};
///
/// let link = Element::new("a").attr("href", "#").child("here");
/// assert_eq!(Node::from(link).to_html(), "<a href=\"#\">here</a>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Element name; `None` for fragments.
    pub name: Option<String>,
    /// Reconciliation key, assigned at render time.
    pub key: Option<usize>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates a named element with no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates an anonymous fragment.
    pub fn fragment() -> Self {
        Self::default()
    }

    /// Creates a leaf: a `span` wrapping a single text segment.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::new("span").child(Node::Text(text.into()))
    }

    /// Adds an attribute, replacing an existing one of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Appends a child node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the key.
    pub fn with_key(mut self, key: usize) -> Self {
        self.key = Some(key);
        self
    }

    /// Returns the value of an attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this element is a fragment.
    pub fn is_fragment(&self) -> bool {
        self.name.is_none()
    }

    /// Whether this element is a leaf (`span` with exactly one text child).
    pub fn is_leaf(&self) -> bool {
        self.name.as_deref() == Some("span")
            && matches!(self.children.as_slice(), [Node::Text(_)])
    }

    /// Clones the element with a new key.
    ///
    /// A non-empty `children` list replaces the element's own children; an
    /// empty one keeps them.
    pub fn clone_with(&self, key: usize, children: Vec<Node>) -> Self {
        let mut el = self.clone();
        el.key = Some(key);
        if !children.is_empty() {
            el.children = children;
        }
        el
    }
}

fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
