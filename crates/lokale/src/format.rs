//! Format dispatch between plain text and node trees.

use std::fmt;

use lokale_template::{Element, Node};

use crate::arg::Arg;
use crate::error::FormatError;
use crate::sprintf::{format_placeholder, parse_format, resolve_arg, try_sprintf, FormatToken};

/// Result of formatting a translated string.
///
/// Plain arguments produce [`Rendered::Text`]. As soon as an argument is a
/// node, the result is a [`Rendered::Node`] fragment that keeps the node
/// arguments intact.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Node(Node),
}

impl Rendered {
    /// The text, if this is a plain text result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(text) => Some(text),
            Rendered::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Rendered::Text(_) => None,
            Rendered::Node(node) => Some(node),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Rendered::Node(_))
    }

    /// Converts into a node; text becomes a text node.
    pub fn into_node(self) -> Node {
        match self {
            Rendered::Text(text) => Node::Text(text),
            Rendered::Node(node) => node,
        }
    }

    /// The visible text, without markup.
    pub fn text_content(&self) -> String {
        match self {
            Rendered::Text(text) => text.clone(),
            Rendered::Node(node) => node.text_content(),
        }
    }

    /// Escaped HTML.
    pub fn to_html(&self) -> String {
        match self {
            Rendered::Text(text) => Node::text(text.as_str()).to_html(),
            Rendered::Node(node) => node.to_html(),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Text(text) => f.write_str(text),
            Rendered::Node(node) => f.write_str(&node.text_content()),
        }
    }
}

impl PartialEq<&str> for Rendered {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl PartialEq<str> for Rendered {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl From<Rendered> for Node {
    fn from(rendered: Rendered) -> Self {
        rendered.into_node()
    }
}

impl From<Rendered> for Arg {
    fn from(rendered: Rendered) -> Self {
        match rendered {
            Rendered::Text(text) => Arg::Str(text),
            Rendered::Node(node) => Arg::Node(node),
        }
    }
}

/// Whether formatting these arguments needs the node path: some argument
/// is a node, or the first one is a map holding a node.
pub fn args_involve_nodes(args: &[Arg]) -> bool {
    if args.iter().any(Arg::is_node) {
        return true;
    }
    match args.first() {
        Some(Arg::Map(map)) => map.values().any(Arg::is_node),
        _ => false,
    }
}

/// Formats arguments into a format string, choosing text or node output.
///
/// Errors are logged and the format string is returned as text.
///
/// ```rust
/// use lokale::{format, Arg, Element};
///
/// assert_eq!(format("%s issues", &[Arg::from(3)]), "3 issues");
///
/// let link = Element::new("a").attr("href", "/issues").child("issues");
/// let rendered = format("%s open %s", &[Arg::from(3), Arg::from(link)]);
/// assert_eq!(rendered.to_html(), "3 open <a href=\"/issues\">issues</a>");
/// ```
pub fn format(fmt: &str, args: &[Arg]) -> Rendered {
    match try_format(fmt, args) {
        Ok(rendered) => rendered,
        Err(err) => {
            tracing::warn!(format = fmt, error = %err, "failed to format translation");
            Rendered::Text(fmt.to_string())
        }
    }
}

/// Like [`format`], but returns format errors.
pub fn try_format(fmt: &str, args: &[Arg]) -> Result<Rendered, FormatError> {
    if args_involve_nodes(args) {
        format_nodes(fmt, args).map(Rendered::Node)
    } else {
        try_sprintf(fmt, args).map(Rendered::Text)
    }
}

/// Node-aware formatting: literal text stays text. Each placeholder is
/// keyed by its token index: an element argument is cloned with that key,
/// anything else goes into a keyed fragment.
fn format_nodes(fmt: &str, args: &[Arg]) -> Result<Node, FormatError> {
    let tokens = parse_format(fmt)?;
    let mut root = Element::fragment();
    let mut cursor = 0;

    for (index, token) in tokens.iter().enumerate() {
        let child = match token {
            FormatToken::Literal(text) => Node::text(text.as_str()),
            FormatToken::Placeholder(placeholder) => {
                match resolve_arg(placeholder, args, &mut cursor)? {
                    Arg::Node(Node::Element(el)) => el.clone().with_key(index).into(),
                    Arg::Node(text @ Node::Text(_)) => {
                        Element::fragment().with_key(index).child(text.clone()).into()
                    }
                    other => Element::fragment()
                        .with_key(index)
                        .child(format_placeholder(placeholder, other)?)
                        .into(),
                }
            }
        };
        root.children.push(child);
    }
    Ok(Node::Element(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Element {
        Element::new("a").attr("href", "/x").child("here")
    }

    #[test]
    fn text_without_nodes() {
        let rendered = format("%s and %s", &["a".into(), "b".into()]);
        assert_eq!(rendered, Rendered::Text("a and b".into()));
        assert!(!rendered.is_node());
    }

    #[test]
    fn node_argument_produces_tree() {
        let rendered = format("click %s now", &[link().into()]);
        let node = rendered.as_node().unwrap();
        let root = node.as_element().unwrap();
        assert!(root.is_fragment());
        assert_eq!(root.key, None);
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0], Node::text("click "));
        assert_eq!(root.children[1], Node::Element(link().with_key(1)));
        assert_eq!(root.children[2], Node::text(" now"));
        assert_eq!(rendered.text_content(), "click here now");
        assert_eq!(
            rendered.to_html(),
            "click <a href=\"/x\">here</a> now"
        );
    }

    #[test]
    fn scalars_beside_nodes_are_formatted() {
        let rendered = format("%03d %s", &[7.into(), link().into()]);
        let root = rendered.as_node().and_then(Node::as_element).unwrap();
        assert_eq!(root.children[0].key(), Some(0));
        assert_eq!(root.children[0].text_content(), "007");
        assert_eq!(root.children[2].key(), Some(2));
        assert_eq!(rendered.text_content(), "007 here");
    }

    #[test]
    fn text_node_argument_is_wrapped() {
        let rendered = format("a %s", &[Arg::Node(Node::text("b"))]);
        let root = rendered.as_node().and_then(Node::as_element).unwrap();
        let wrapper = root.children[1].as_element().unwrap();
        assert!(wrapper.is_fragment());
        assert_eq!(wrapper.key, Some(1));
        assert_eq!(wrapper.children, vec![Node::text("b")]);
    }

    #[test]
    fn named_node_arguments() {
        let args = Arg::map([("user", Arg::from("jane")), ("link", Arg::from(link()))]);
        assert!(args_involve_nodes(std::slice::from_ref(&args)));
        let rendered = format("%(user)s: %(link)s", &[args]);
        assert_eq!(rendered.text_content(), "jane: here");
        assert!(rendered.is_node());
    }

    #[test]
    fn positional_node_arguments() {
        let rendered = format("%2$s %1$s", &["world".into(), link().into()]);
        assert_eq!(rendered.text_content(), "here world");
    }

    #[test]
    fn detection() {
        assert!(!args_involve_nodes(&[]));
        assert!(!args_involve_nodes(&["a".into(), Arg::map([("x", Arg::from(1))])]));
        assert!(args_involve_nodes(&["a".into(), link().into()]));
        assert!(!args_involve_nodes(&[
            "a".into(),
            Arg::map([("x", Arg::from(link()))])
        ]));
    }

    #[test]
    fn errors_return_format_string() {
        assert_eq!(format("%d", &["abc".into()]), "%d");
        assert_eq!(format("%d %s", &["abc".into(), link().into()]), "%d %s");
        assert!(try_format("%(a)s %s", &[link().into()]).is_err());
    }

    #[test]
    fn conversions() {
        let rendered = Rendered::Text("a < b".into());
        assert_eq!(rendered.to_html(), "a &lt; b");
        assert_eq!(rendered.to_string(), "a < b");
        assert_eq!(Arg::from(rendered), Arg::Str("a < b".into()));
        assert_eq!(Rendered::Text("x".into()).into_node(), Node::text("x"));
    }
}
