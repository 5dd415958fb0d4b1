//! Bracket component templates for translated strings.
//!
//! Translated strings often need to wrap parts of a sentence in markup: a
//! link, an emphasis, a value rendered by the UI. Splitting the sentence into
//! separate catalog entries breaks translations, so the markup is expressed
//! in the string itself with named groups:
//!
//! ```text
//! Read the [link:documentation] before [action:deploying].
//! ```
//!
//! This crate parses such templates into a [`ParsedTemplate`] and renders them
//! with a caller-supplied [`ComponentMap`] into a keyed [`Node`] tree, which can
//! then be written as plain text, styled terminal text, debug markup
//! ([`NodeWriter`]) or HTML ([`Node::to_html`]).
//!
//! # Example
//!
//! ```rust
//! use lokale_template::{parse, render_template, ComponentMap, Element};
//!
//! let tmpl = parse("Read the [link:docs] first");
//! let components = ComponentMap::new().with("link", Element::new("a").attr("href", "/docs"));
//! let node = render_template(&tmpl, &components);
//!
//! assert_eq!(node.text_content(), "Read the docs first");
//! assert_eq!(
//!     node.to_html(),
//!     "<span>Read the </span><a href=\"/docs\"><span>docs</span></a><span> first</span>"
//! );
//! ```
//!
//! # Template Syntax
//!
//! - `[name:content]` defines a group with inline content, which may nest
//!   further groups: `[outer:a [inner:b] c]`
//! - `[name]` references a group without inline content; the component
//!   mapped to `name` is rendered as-is
//! - Everything else is literal text
//!
//! Parsing and rendering never fail. Unterminated groups keep their text,
//! unmapped groups render their content inside a keyed fragment.

mod node;
mod parser;
mod render;
mod writer;

pub use node::{Element, Node};
pub use parser::{parse, ParsedTemplate, TemplateSubvalue, MAX_DEPTH, ROOT_GROUP};
pub use render::{render_str, render_template, Component, ComponentMap};
pub use writer::{NodeWriter, TagTransform, UnknownTagBehavior};
