//! Rendering parsed templates into node trees.
//!
//! Each group of a [`ParsedTemplate`] is rendered into the component the
//! caller mapped to its name:
//!
//! - literal segments become keyed leaf `span`s,
//! - group references are rendered recursively and become the children of
//!   the mapped component,
//! - a group with no mapping renders into an empty fragment,
//! - a plain value mapping is wrapped in a leaf `span` first.
//!
//! Keys come from a single counter per call, so all keys in one output are
//! unique.

use std::collections::BTreeMap;

use crate::node::{Element, Node};
use crate::parser::{parse, ParsedTemplate, TemplateSubvalue, MAX_DEPTH, ROOT_GROUP};

/// The value a group renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// An element that wraps the group's content.
    Element(Element),
    /// A plain value, wrapped in a leaf container before use.
    Value(String),
}

impl From<Element> for Component {
    fn from(el: Element) -> Self {
        Component::Element(el)
    }
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component::Value(value.to_string())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Component::Value(value)
    }
}

impl From<Node> for Component {
    fn from(node: Node) -> Self {
        match node {
            Node::Element(el) => Component::Element(el),
            Node::Text(text) => Component::Value(text),
        }
    }
}

/// Caller-supplied mapping from group name to component.
///
/// # Example
///
/// ```rust
/// use lokale_template::{ComponentMap, Element};
///
/// let components = ComponentMap::new()
///     .with("link", Element::new("a").attr("href", "#"))
///     .with("count", "42");
/// assert!(components.get("link").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMap {
    components: BTreeMap<String, Component>,
}

impl ComponentMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component, builder style.
    pub fn with(mut self, name: impl Into<String>, component: impl Into<Component>) -> Self {
        self.insert(name, component);
        self
    }

    /// Adds or replaces a component.
    pub fn insert(&mut self, name: impl Into<String>, component: impl Into<Component>) {
        self.components.insert(name.into(), component.into());
    }

    /// Looks up the component for a group.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Number of mapped groups.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no group is mapped.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<K: Into<String>, V: Into<Component>> FromIterator<(K, V)> for ComponentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ComponentMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Renders a parsed template with the given components.
///
/// Never fails: unknown groups render their content inside a keyed fragment.
///
/// # Example
///
/// ```rust
/// use lokale_template::{parse, render_template, ComponentMap, Element};
///
/// let tmpl = parse("Click [link:here]");
/// let components = ComponentMap::new().with("link", Element::new("a").attr("href", "#"));
/// let node = render_template(&tmpl, &components);
/// assert_eq!(node.to_html(), "<span>Click </span><a href=\"#\"><span>here</span></a>");
/// ```
pub fn render_template(template: &ParsedTemplate, components: &ComponentMap) -> Node {
    let mut renderer = TemplateRenderer {
        template,
        components,
        next_key: 0,
        active: Vec::new(),
    };
    Node::Element(renderer.render_group(ROOT_GROUP))
}

/// Parses and renders a template in one step.
pub fn render_str(template: &str, components: &ComponentMap) -> Node {
    render_template(&parse(template), components)
}

struct TemplateRenderer<'a> {
    template: &'a ParsedTemplate,
    components: &'a ComponentMap,
    next_key: usize,
    /// Groups currently being rendered; a group never recurses into itself
    /// and the chain never grows past [`MAX_DEPTH`].
    active: Vec<&'a str>,
}

impl<'a> TemplateRenderer<'a> {
    fn key(&mut self) -> usize {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn render_group(&mut self, group: &'a str) -> Element {
        let template = self.template;
        let items: &[TemplateSubvalue] = if self.active.contains(&group)
            || self.active.len() > MAX_DEPTH
        {
            &[]
        } else {
            template.group(group).unwrap_or(&[])
        };

        self.active.push(group);
        let mut children = Vec::new();
        for item in items {
            match item {
                TemplateSubvalue::Text(text) => {
                    let key = self.key();
                    children.push(Node::Element(Element::leaf(text.as_str()).with_key(key)));
                }
                TemplateSubvalue::Group(name) => {
                    children.push(Node::Element(self.render_group(name)));
                }
            }
        }
        self.active.pop();

        let reference = match self.components.get(group) {
            Some(Component::Element(el)) => el.clone(),
            Some(Component::Value(value)) => {
                let key = self.key();
                Element::leaf(value.as_str()).with_key(key)
            }
            None => {
                let key = self.key();
                Element::fragment().with_key(key)
            }
        };

        let key = self.key();
        reference.clone_with(key, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Element {
        Element::new("a").attr("href", "#")
    }

    fn leaf_text(node: &Node) -> Option<&str> {
        let el = node.as_element()?;
        if !el.is_leaf() {
            return None;
        }
        el.children[0].as_text()
    }

    #[test]
    fn literal_template_renders_leaves_under_root_fragment() {
        let node = render_str("just text", &ComponentMap::new());
        let root = node.as_element().unwrap();
        assert!(root.is_fragment());
        assert_eq!(root.children.len(), 1);
        assert_eq!(leaf_text(&root.children[0]), Some("just text"));
    }

    #[test]
    fn group_substitution() {
        let node = render_str("Click [link:here]", &ComponentMap::new().with("link", link()));
        let root = node.as_element().unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(leaf_text(&root.children[0]), Some("Click "));

        let a = root.children[1].as_element().unwrap();
        assert_eq!(a.name.as_deref(), Some("a"));
        assert_eq!(a.get_attr("href"), Some("#"));
        assert_eq!(a.children.len(), 1);
        assert_eq!(leaf_text(&a.children[0]), Some("here"));
    }

    #[test]
    fn missing_mapping_renders_placeholder() {
        let node = render_str("[missing:x]", &ComponentMap::new());
        let root = node.as_element().unwrap();
        let missing = root.children[0].as_element().unwrap();
        assert!(missing.is_fragment());
        assert_eq!(node.text_content(), "x");
        assert!(!node.to_html().contains("[missing:x]"));
    }

    #[test]
    fn missing_reference_without_content_is_empty() {
        let node = render_str("a [gone] b", &ComponentMap::new());
        let root = node.as_element().unwrap();
        assert_eq!(root.children.len(), 3);
        let gone = root.children[1].as_element().unwrap();
        assert!(gone.is_fragment());
        assert!(gone.children.is_empty());
        assert_eq!(node.text_content(), "a  b");
    }

    #[test]
    fn nested_groups() {
        let components = ComponentMap::new()
            .with("outer", Element::new("div"))
            .with("inner", Element::new("b"));
        let node = render_str("[outer:a [inner:b] c]", &components);
        let root = node.as_element().unwrap();
        let outer = root.children[0].as_element().unwrap();
        assert_eq!(outer.name.as_deref(), Some("div"));
        assert_eq!(outer.children.len(), 3);
        assert_eq!(leaf_text(&outer.children[0]), Some("a "));
        let inner = outer.children[1].as_element().unwrap();
        assert_eq!(inner.name.as_deref(), Some("b"));
        assert_eq!(leaf_text(&inner.children[0]), Some("b"));
        assert_eq!(leaf_text(&outer.children[2]), Some(" c"));
    }

    #[test]
    fn plain_value_is_wrapped_in_leaf() {
        let components = ComponentMap::new().with("count", "42");
        let node = render_str("You have [count] items", &components);
        let root = node.as_element().unwrap();
        let count = root.children[1].as_element().unwrap();
        assert!(count.is_leaf());
        assert_eq!(node.text_content(), "You have 42 items");
    }

    #[test]
    fn plain_value_children_replaced_by_inline_content() {
        let components = ComponentMap::new().with("v", "ignored");
        let node = render_str("[v:shown]", &components);
        assert_eq!(node.text_content(), "shown");
    }

    #[test]
    fn element_keeps_own_children_without_inline_content() {
        let components = ComponentMap::new().with("icon", Element::new("i").child("*"));
        let node = render_str("[icon] done", &components);
        assert_eq!(node.to_html(), "<i>*</i><span> done</span>");
    }

    #[test]
    fn keys_follow_visiting_order() {
        let node = render_str("Click [link:here]", &ComponentMap::new().with("link", link()));
        let root = node.as_element().unwrap();
        // leaf "Click " = 0, leaf "here" = 1, link clone = 2, root placeholder = 3, root clone = 4
        assert_eq!(root.children[0].key(), Some(0));
        let a = root.children[1].as_element().unwrap();
        assert_eq!(a.children[0].key(), Some(1));
        assert_eq!(a.key, Some(2));
        assert_eq!(root.key, Some(4));
    }

    #[test]
    fn keys_are_unique() {
        let components = ComponentMap::new().with("a", link()).with("v", "x");
        let node = render_str("[a:1 [b:2] 3] [v] [c:[d:4]]", &components);
        let mut keys = Vec::new();
        node.walk(&mut |n| {
            if let Some(k) = n.key() {
                keys.push(k);
            }
        });
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn rendering_twice_gives_equal_fresh_trees() {
        let tmpl = parse("x [a:y]");
        let components = ComponentMap::new().with("a", link());
        assert_eq!(
            render_template(&tmpl, &components),
            render_template(&tmpl, &components)
        );
    }

    #[test]
    fn self_referencing_group_terminates() {
        let components = ComponentMap::new().with("a", Element::new("b"));
        let node = render_str("[a:x [a] y]", &components);
        assert_eq!(node.text_content(), "x  y");
    }

    #[test]
    fn deep_nesting_keeps_text() {
        let input = (0..100_000).map(|i| format!("[g{i}:")).collect::<String>() + "x";
        let node = render_str(&input, &ComponentMap::new());
        let opened: usize = (0..MAX_DEPTH).map(|i| format!("[g{i}:").len()).sum();
        assert_eq!(node.text_content(), &input[opened..]);
    }

    #[test]
    fn long_reference_chain_is_cut() {
        let mut input = String::from("[c0]");
        for i in 0..200 {
            input.push_str(&format!("[c{i}:[c{}]]", i + 1));
        }
        input.push_str("[c200:end]");

        let node = render_str(&input, &ComponentMap::new());
        let root = node.as_element().unwrap();
        assert_eq!(root.children[0].text_content(), "");
        assert_eq!(root.children.last().map(Node::text_content).as_deref(), Some("end"));
    }

    #[test]
    fn component_map_from_iterator() {
        let map: ComponentMap = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b"), Some(&Component::Value("2".into())));
    }
}
