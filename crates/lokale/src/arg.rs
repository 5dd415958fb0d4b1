//! Format arguments.

use std::collections::BTreeMap;

use lokale_template::{Element, Node};

/// A value interpolated into a format string.
///
/// Scalars are formatted as text. [`Arg::Node`] values are renderable: when
/// one is present, formatting produces a node tree instead of a string. A
/// [`Arg::Map`] in first position supplies values for `%(name)s`
/// placeholders.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Arg>),
    Map(BTreeMap<String, Arg>),
    Node(Node),
}

impl Arg {
    /// Builds a map argument for named placeholders.
    ///
    /// ```rust
    /// use lokale::{sprintf, Arg};
    ///
    /// let args = Arg::map([("user", Arg::from("jane")), ("count", Arg::from(3))]);
    /// assert_eq!(sprintf("%(user)s has %(count)d", &[args]), "jane has 3");
    /// ```
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Arg)>) -> Self {
        Arg::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether this argument is a renderable node.
    pub fn is_node(&self) -> bool {
        matches!(self, Arg::Node(_))
    }

    /// Lowercase type name, as printed by `%T`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Null => "null",
            Arg::Bool(_) => "boolean",
            Arg::Int(_) | Arg::Float(_) => "number",
            Arg::Str(_) => "string",
            Arg::List(_) => "array",
            Arg::Map(_) | Arg::Node(_) => "object",
        }
    }

    /// Numeric value, if the argument can be read as a number.
    ///
    /// Strings are accepted when they parse as numbers; the empty string,
    /// `null` and `false` read as zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Arg::Null => Some(0.0),
            Arg::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Arg::Int(i) => Some(*i as f64),
            Arg::Float(f) => Some(*f),
            Arg::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    s.parse::<f64>().ok().filter(|n| n.is_finite())
                }
            }
            Arg::List(_) | Arg::Map(_) | Arg::Node(_) => None,
        }
    }

    /// Truthiness, as printed by `%t`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Arg::Null => false,
            Arg::Bool(b) => *b,
            Arg::Int(i) => *i != 0,
            Arg::Float(f) => *f != 0.0 && !f.is_nan(),
            Arg::Str(s) => !s.is_empty(),
            Arg::List(_) | Arg::Map(_) | Arg::Node(_) => true,
        }
    }

    /// Text form of the argument, as printed by `%s`.
    pub fn to_text(&self) -> String {
        match self {
            Arg::Null => String::new(),
            Arg::Bool(b) => b.to_string(),
            Arg::Int(i) => i.to_string(),
            Arg::Float(f) => number_to_string(*f),
            Arg::Str(s) => s.clone(),
            Arg::List(items) => items
                .iter()
                .map(Arg::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Arg::Map(_) => self.to_json().to_string(),
            Arg::Node(node) => node.text_content(),
        }
    }

    /// JSON form of the argument, as printed by `%j`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Arg::Null => Value::Null,
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Int(i) => Value::from(*i),
            Arg::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Arg::Str(s) => Value::String(s.clone()),
            Arg::List(items) => Value::Array(items.iter().map(Arg::to_json).collect()),
            Arg::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Arg::Node(node) => Value::String(node.text_content()),
        }
    }

    /// Looks up a key in a map argument, or an index in a list argument.
    pub(crate) fn get(&self, key: &str) -> Option<&Arg> {
        match self {
            Arg::Map(map) => map.get(key),
            Arg::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

/// Formats a float the way the source language of the catalogs prints
/// numbers: integral values without a fraction, `NaN`, `Infinity`.
pub(crate) fn number_to_string(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f == 0.0 {
        "0".to_string()
    } else {
        f.to_string()
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Str(s.clone())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(i: $t) -> Self {
                    Arg::Int(i as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, isize);

impl From<u64> for Arg {
    fn from(i: u64) -> Self {
        i64::try_from(i).map(Arg::Int).unwrap_or(Arg::Float(i as f64))
    }
}

impl From<usize> for Arg {
    fn from(i: usize) -> Self {
        Arg::from(i as u64)
    }
}

impl From<f32> for Arg {
    fn from(f: f32) -> Self {
        Arg::Float(f as f64)
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Float(f)
    }
}

impl From<Node> for Arg {
    fn from(node: Node) -> Self {
        Arg::Node(node)
    }
}

impl From<Element> for Arg {
    fn from(el: Element) -> Self {
        Arg::Node(Node::Element(el))
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Arg::Null)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Arg::Null,
            Value::Bool(b) => Arg::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Arg::Int(i),
                None => Arg::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Arg::Str(s),
            Value::Array(items) => Arg::List(items.into_iter().map(Arg::from).collect()),
            Value::Object(map) => Arg::Map(map.into_iter().map(|(k, v)| (k, Arg::from(v))).collect()),
        }
    }
}
