//! Parser for bracket component templates.
//!
//! A template is literal text with bracketed groups:
//!
//! - `[name:content]` defines the group `name` with inline content. The
//!   content may contain further groups.
//! - `[name]` references the group `name` without inline content.
//! - `]` closes the innermost open group.
//!
//! The parser never fails. A group left open at the end of input keeps the
//! remaining text as its literal tail, a stray `]` at the top level is
//! dropped, and a `[` that is not followed by `:` or `]` on the same line is
//! plain text.
//!
//! Group names are not validated: everything between `[` and the first `:`
//! or `]` is the name. Translated strings in existing catalogs depend on this.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Name of the top-level group.
pub const ROOT_GROUP: &str = "root";

/// Deepest group nesting. A `[name:` opened deeper than this is kept as
/// literal text.
pub const MAX_DEPTH: usize = 64;

/// One item in a group's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSubvalue {
    /// Literal text. Never empty.
    Text(String),
    /// Reference to another group by name.
    Group(String),
}

impl TemplateSubvalue {
    fn text(s: &str) -> Self {
        TemplateSubvalue::Text(s.to_string())
    }
}

impl Serialize for TemplateSubvalue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TemplateSubvalue::Text(text) => serializer.serialize_str(text),
            TemplateSubvalue::Group(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("group", name)?;
                map.end()
            }
        }
    }
}

/// A parsed template: group name to ordered content.
///
/// The [`ROOT_GROUP`] entry always exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ParsedTemplate {
    groups: BTreeMap<String, Vec<TemplateSubvalue>>,
}

impl ParsedTemplate {
    /// Returns the content of a group, if the template defines it.
    pub fn group(&self, name: &str) -> Option<&[TemplateSubvalue]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Returns the content of the root group.
    pub fn root(&self) -> &[TemplateSubvalue] {
        self.group(ROOT_GROUP).unwrap_or(&[])
    }

    /// Iterates over all defined groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[TemplateSubvalue])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether the template contains no groups besides the root.
    pub fn is_literal(&self) -> bool {
        self.root()
            .iter()
            .all(|item| matches!(item, TemplateSubvalue::Text(_)))
    }
}

/// Parses a template string.
///
/// # Example
///
/// ```rust
/// use lokale_template::{parse, TemplateSubvalue};
///
/// let tmpl = parse("Click [link:here] now");
/// assert_eq!(
///     tmpl.root(),
///     &[
///         TemplateSubvalue::Text("Click ".into()),
///         TemplateSubvalue::Group("link".into()),
///         TemplateSubvalue::Text(" now".into()),
///     ]
/// );
/// assert_eq!(tmpl.group("link"), Some(&[TemplateSubvalue::Text("here".into())][..]));
/// ```
pub fn parse(input: &str) -> ParsedTemplate {
    let mut template = ParsedTemplate::default();
    parse_group(input, 0, ROOT_GROUP, 0, &mut template);
    template
}

/// Parses the content of one group starting at `start`.
///
/// Returns the cursor just past the group's closing `]`, or the input
/// length if the group is never closed.
fn parse_group(
    input: &str,
    start: usize,
    name: &str,
    depth: usize,
    template: &mut ParsedTemplate,
) -> usize {
    let in_group = depth > 0;
    let mut items = Vec::new();
    let mut pos = start;
    let mut end = None;

    while let Some(token) = next_token(input, pos) {
        let literal = &input[pos..token.start];
        if !literal.is_empty() {
            items.push(TemplateSubvalue::text(literal));
        }

        match token.kind {
            TokenKind::Close if in_group => {
                end = Some(token.end);
                break;
            }
            TokenKind::Close => {
                pos = token.end;
            }
            TokenKind::Reference(group) => {
                items.push(TemplateSubvalue::Group(group.to_string()));
                pos = token.end;
            }
            TokenKind::Open(_) if depth >= MAX_DEPTH => {
                items.push(TemplateSubvalue::text(&input[token.start..token.end]));
                pos = token.end;
            }
            TokenKind::Open(group) => {
                pos = parse_group(input, token.end, group, depth + 1, template);
                items.push(TemplateSubvalue::Group(group.to_string()));
            }
        }
    }

    let end = match end {
        Some(end) => end,
        None => {
            let rest = &input[pos.min(input.len())..];
            if !rest.is_empty() {
                items.push(TemplateSubvalue::text(rest));
            }
            input.len()
        }
    };

    template.groups.insert(name.to_string(), items);
    end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind<'a> {
    /// `[name:`
    Open(&'a str),
    /// `[name]`
    Reference(&'a str),
    /// `]`
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    kind: TokenKind<'a>,
    start: usize,
    end: usize,
}

/// Finds the next structural token at or after `from`.
fn next_token(input: &str, from: usize) -> Option<Token<'_>> {
    let bytes = input.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b']' => {
                return Some(Token {
                    kind: TokenKind::Close,
                    start: i,
                    end: i + 1,
                })
            }
            b'[' => {
                if let Some(token) = group_token(input, i) {
                    return Some(token);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Reads `[name:` or `[name]` starting at the `[` at `open`.
fn group_token(input: &str, open: usize) -> Option<Token<'_>> {
    let after = open + 1;
    let offset = input[after..].find([':', ']', '\n'])?;
    let stop = after + offset;
    let name = &input[after..stop];
    let kind = match input.as_bytes()[stop] {
        b':' => TokenKind::Open(name),
        b']' => TokenKind::Reference(name),
        _ => return None,
    };
    Some(Token {
        kind,
        start: open,
        end: stop + 1,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?;'\"]{0,50}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn literal_templates_are_single_segment(content in plain_text()) {
            let tmpl = parse(&content);
            if content.is_empty() {
                prop_assert!(tmpl.root().is_empty());
            } else {
                prop_assert_eq!(tmpl.root(), &[TemplateSubvalue::Text(content.clone())][..]);
            }
        }

        #[test]
        fn never_panics_and_has_root(input in "[a-z\\[\\]: \n]{0,40}") {
            let tmpl = parse(&input);
            prop_assert!(tmpl.group(ROOT_GROUP).is_some());
        }

        #[test]
        fn no_empty_text_segments(input in "[a-z\\[\\]: ]{0,40}") {
            let tmpl = parse(&input);
            for (_, items) in tmpl.groups() {
                for item in items {
                    if let TemplateSubvalue::Text(t) = item {
                        prop_assert!(!t.is_empty());
                    }
                }
            }
        }

        #[test]
        fn group_content_roundtrips(name in "[a-z_][a-z0-9_]{0,8}", content in plain_text()) {
            let input = format!("[{}:{}]", name, content);
            let tmpl = parse(&input);
            prop_assert_eq!(tmpl.root(), &[TemplateSubvalue::Group(name.clone())][..]);
            let expected: Vec<TemplateSubvalue> = if content.is_empty() {
                Vec::new()
            } else {
                vec![TemplateSubvalue::Text(content.clone())]
            };
            prop_assert_eq!(tmpl.group(&name), Some(expected.as_slice()));
        }
    }
}
