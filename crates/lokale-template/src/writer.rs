//! Writing node trees as terminal text.
//!
//! [`NodeWriter`] turns a rendered [`Node`] tree into a string according to a
//! [`TagTransform`] mode:
//!
//! - [`TagTransform::Apply`] styles text with the `console` style registered
//!   for each enclosing element name,
//! - [`TagTransform::Remove`] prints the text only,
//! - [`TagTransform::Keep`] prints elements as `[name]…[/name]` markup, which
//!   is useful to see the structure of a translated template.
//!
//! Fragments never produce markup of their own.

use console::Style;
use std::collections::HashMap;

use crate::node::{Element, Node};

/// How to transform elements in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTransform {
    /// Apply ANSI escape codes from the associated Style.
    /// Used for terminal output with color support.
    Apply,

    /// Remove all element markers, outputting only the text.
    /// Used for plain text output without styling.
    Remove,

    /// Keep elements visible as bracket markup.
    /// Used for debug mode to visualize tree structure.
    Keep,
}

/// Configuration for handling elements without a registered style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnknownTagBehavior {
    /// Output the content without any marker.
    #[default]
    Strip,

    /// Prefix content with an indicator (e.g., "(!?)").
    Indicate(String),
}

/// Writes node trees as plain, styled or debug text.
///
/// # Example
///
/// ```rust
/// use lokale_template::{render_str, ComponentMap, Element, NodeWriter, TagTransform};
/// use std::collections::HashMap;
///
/// let node = render_str(
///     "Click [link:here]",
///     &ComponentMap::new().with("link", Element::new("a")),
/// );
///
/// let writer = NodeWriter::new(HashMap::new(), TagTransform::Remove);
/// assert_eq!(writer.write(&node), "Click here");
///
/// let writer = NodeWriter::new(HashMap::new(), TagTransform::Keep);
/// assert_eq!(writer.write(&node), "[span]Click [/span][a][span]here[/span][/a]");
/// ```
#[derive(Debug, Clone)]
pub struct NodeWriter {
    styles: HashMap<String, Style>,
    transform: TagTransform,
    unknown_behavior: UnknownTagBehavior,
}

impl NodeWriter {
    /// Creates a new writer with the given styles and transform mode.
    ///
    /// # Arguments
    ///
    /// * `styles` - Map of element names to console styles
    /// * `transform` - How to handle elements
    pub fn new(styles: HashMap<String, Style>, transform: TagTransform) -> Self {
        Self {
            styles,
            transform,
            unknown_behavior: UnknownTagBehavior::default(),
        }
    }

    /// Creates a writer that outputs plain text.
    pub fn plain() -> Self {
        Self::new(HashMap::new(), TagTransform::Remove)
    }

    /// Sets the behavior for elements without a registered style.
    pub fn unknown_behavior(mut self, behavior: UnknownTagBehavior) -> Self {
        self.unknown_behavior = behavior;
        self
    }

    /// Returns the transform mode.
    pub fn transform(&self) -> TagTransform {
        self.transform
    }

    /// Writes the tree to a string.
    pub fn write(&self, node: &Node) -> String {
        let mut output = String::new();
        let mut style_stack: Vec<&Style> = Vec::new();
        self.write_node(node, &mut output, &mut style_stack);
        output
    }

    fn write_node<'s>(&'s self, node: &Node, output: &mut String, style_stack: &mut Vec<&'s Style>) {
        match node {
            Node::Text(text) => self.append_text(output, text, style_stack),
            Node::Element(el) => self.write_element(el, output, style_stack),
        }
    }

    fn write_element<'s>(
        &'s self,
        el: &Element,
        output: &mut String,
        style_stack: &mut Vec<&'s Style>,
    ) {
        let Some(name) = el.name.as_deref() else {
            for child in &el.children {
                self.write_node(child, output, style_stack);
            }
            return;
        };

        match self.transform {
            TagTransform::Keep => {
                output.push('[');
                output.push_str(name);
                output.push(']');
                for child in &el.children {
                    self.write_node(child, output, style_stack);
                }
                output.push_str("[/");
                output.push_str(name);
                output.push(']');
            }
            TagTransform::Remove => {
                if !self.styles.contains_key(name) {
                    self.emit_unknown_prefix(output);
                }
                for child in &el.children {
                    self.write_node(child, output, style_stack);
                }
            }
            TagTransform::Apply => {
                let style = self.styles.get(name);
                match style {
                    Some(style) => style_stack.push(style),
                    None => self.emit_unknown_prefix(output),
                }
                for child in &el.children {
                    self.write_node(child, output, style_stack);
                }
                if style.is_some() {
                    style_stack.pop();
                }
            }
        }
    }

    /// Emits the unknown element indicator prefix.
    fn emit_unknown_prefix(&self, output: &mut String) {
        if let UnknownTagBehavior::Indicate(ref indicator) = self.unknown_behavior {
            output.push_str(indicator);
            output.push(' ');
        }
    }

    /// Appends text, styled by every style on the stack.
    fn append_text(&self, output: &mut String, text: &str, style_stack: &[&Style]) {
        if text.is_empty() {
            return;
        }

        if style_stack.is_empty() || self.transform != TagTransform::Apply {
            output.push_str(text);
        } else {
            let mut current = text.to_string();
            for style in style_stack {
                current = style.apply_to(current).to_string();
            }
            output.push_str(&current);
        }
    }
}
