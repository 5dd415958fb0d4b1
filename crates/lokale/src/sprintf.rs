//! printf-style string formatting.
//!
//! Format strings in translation catalogs use the printf dialect of the
//! JavaScript `sprintf` family, so translators can reorder arguments:
//!
//! ```text
//! %[argnum$ | (key)][+][0 | 'c][-][width][.precision]type
//! ```
//!
//! | Type | Output |
//! |------|--------|
//! | `s` | text (`.precision` truncates) |
//! | `d` `i` | integer |
//! | `f` | fixed point (`.precision` decimals) |
//! | `e` | exponential |
//! | `g` | `.precision` significant digits |
//! | `b` `o` `x` `X` | binary, octal, hex |
//! | `u` | unsigned 32-bit integer |
//! | `c` | character from a code point |
//! | `t` | `true` / `false` |
//! | `T` | type name |
//! | `v` | primitive value |
//! | `j` | JSON (`width` is the indent) |
//!
//! `%%` is a literal percent sign. `%1$s` selects an argument by 1-based
//! position, `%(user.name)s` walks keys of the first argument, and a bare
//! placeholder consumes the next argument. Named and positional
//! placeholders cannot be mixed.
//!
//! Missing arguments format as empty text.

use serde::Serialize;

use crate::arg::{number_to_string, Arg};
use crate::error::FormatError;

static NULL_ARG: Arg = Arg::Null;

/// A conversion type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Binary,
    Char,
    Decimal,
    Integer,
    Exponent,
    Fixed,
    General,
    Octal,
    Str,
    Boolean,
    Type,
    Unsigned,
    Value,
    HexLower,
    HexUpper,
    Json,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'b' => Conversion::Binary,
            'c' => Conversion::Char,
            'd' => Conversion::Decimal,
            'i' => Conversion::Integer,
            'e' => Conversion::Exponent,
            'f' => Conversion::Fixed,
            'g' => Conversion::General,
            'o' => Conversion::Octal,
            's' => Conversion::Str,
            't' => Conversion::Boolean,
            'T' => Conversion::Type,
            'u' => Conversion::Unsigned,
            'v' => Conversion::Value,
            'x' => Conversion::HexLower,
            'X' => Conversion::HexUpper,
            'j' => Conversion::Json,
            _ => return None,
        })
    }

    /// The type character.
    pub fn as_char(self) -> char {
        match self {
            Conversion::Binary => 'b',
            Conversion::Char => 'c',
            Conversion::Decimal => 'd',
            Conversion::Integer => 'i',
            Conversion::Exponent => 'e',
            Conversion::Fixed => 'f',
            Conversion::General => 'g',
            Conversion::Octal => 'o',
            Conversion::Str => 's',
            Conversion::Boolean => 't',
            Conversion::Type => 'T',
            Conversion::Unsigned => 'u',
            Conversion::Value => 'v',
            Conversion::HexLower => 'x',
            Conversion::HexUpper => 'X',
            Conversion::Json => 'j',
        }
    }

    /// Whether the argument must be numeric.
    fn requires_number(self) -> bool {
        matches!(
            self,
            Conversion::Binary
                | Conversion::Char
                | Conversion::Decimal
                | Conversion::Integer
                | Conversion::Exponent
                | Conversion::Fixed
                | Conversion::General
                | Conversion::Unsigned
                | Conversion::HexLower
                | Conversion::HexUpper
        )
    }

    /// Whether the output carries a sign.
    fn is_signed(self) -> bool {
        matches!(
            self,
            Conversion::Decimal
                | Conversion::Integer
                | Conversion::Exponent
                | Conversion::Fixed
                | Conversion::General
        )
    }
}

/// Which argument a placeholder refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgRef {
    /// The next argument in order.
    Next,
    /// An argument by 1-based position.
    Position(usize),
    /// A key path into the first argument, such as `user.emails[0]`.
    Named(String),
}

/// A parsed `%…` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub arg: ArgRef,
    pub sign: bool,
    pub pad: Option<char>,
    pub left_align: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub conversion: Conversion,
}

/// A piece of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    Literal(String),
    Placeholder(Placeholder),
}

/// Parses a format string into literal and placeholder tokens.
///
/// Adjacent literal text (including `%%`) is merged into one token.
pub fn parse_format(format: &str) -> Result<Vec<FormatToken>, FormatError> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut named = false;
    let mut positional = false;

    while pos < format.len() {
        let rest = &format[pos..];
        let Some(idx) = rest.find('%') else {
            push_literal(&mut tokens, rest);
            break;
        };
        if idx > 0 {
            push_literal(&mut tokens, &rest[..idx]);
            pos += idx;
            continue;
        }

        if rest.starts_with("%%") {
            push_literal(&mut tokens, "%");
            pos += 2;
            continue;
        }

        let (placeholder, len) =
            scan_placeholder(rest).ok_or_else(|| FormatError::UnexpectedPlaceholder {
                format: format.to_string(),
                offset: pos,
            })?;
        match placeholder.arg {
            ArgRef::Named(_) => named = true,
            _ => positional = true,
        }
        if named && positional {
            return Err(FormatError::MixedPlaceholders);
        }
        tokens.push(FormatToken::Placeholder(placeholder));
        pos += len;
    }

    Ok(tokens)
}

/// Largest precision honored; larger ones are clamped.
pub const MAX_PRECISION: usize = 100;

/// Largest field width honored; larger ones are clamped.
pub const MAX_WIDTH: usize = 1024;

/// Reads a run of ASCII digits, saturating at `max`.
fn clamped(digits: &str, max: usize) -> usize {
    digits.parse::<usize>().map_or(max, |n| n.min(max))
}

fn push_literal(tokens: &mut Vec<FormatToken>, text: &str) {
    if let Some(FormatToken::Literal(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(FormatToken::Literal(text.to_string()));
    }
}

/// Reads one placeholder at the start of `s` (which begins with `%`).
///
/// Returns the placeholder and its length in bytes. A named placeholder
/// with an unparseable key is still returned; the key is checked by
/// [`parse_key_path`] at format time.
fn scan_placeholder(s: &str) -> Option<(Placeholder, usize)> {
    let bytes = s.as_bytes();
    let mut i = 1;

    let mut arg = ArgRef::Next;
    if i < bytes.len() && (b'1'..=b'9').contains(&bytes[i]) {
        let start = i;
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'$' {
            arg = ArgRef::Position(s[start..j].parse().ok()?);
            i = j + 1;
        }
    } else if i < bytes.len() && bytes[i] == b'(' {
        let close = s[i + 1..].find(')')? + i + 1;
        if close == i + 1 {
            return None;
        }
        arg = ArgRef::Named(s[i + 1..close].to_string());
        i = close + 1;
    }

    let mut sign = false;
    if i < bytes.len() && bytes[i] == b'+' {
        sign = true;
        i += 1;
    }

    let mut pad = None;
    if i < bytes.len() && bytes[i] == b'0' {
        pad = Some('0');
        i += 1;
    } else if i < bytes.len() && bytes[i] == b'\'' {
        let c = s[i + 1..].chars().next()?;
        if c == '$' {
            return None;
        }
        pad = Some(c);
        i += 1 + c.len_utf8();
    }

    let mut left_align = false;
    if i < bytes.len() && bytes[i] == b'-' {
        left_align = true;
        i += 1;
    }

    let width_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let width = (i > width_start).then(|| clamped(&s[width_start..i], MAX_WIDTH));

    let mut precision = None;
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        let start = i + 1;
        i = start;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        precision = Some(clamped(&s[start..i], MAX_PRECISION));
    }

    let conversion = Conversion::from_char(*bytes.get(i)? as char)?;
    i += 1;

    Some((
        Placeholder {
            arg,
            sign,
            pad,
            left_align,
            width,
            precision,
            conversion,
        },
        i,
    ))
}

/// Splits a named placeholder key like `user.emails[0]` into its steps.
fn parse_key_path(key: &str) -> Result<Vec<String>, FormatError> {
    let invalid = || FormatError::InvalidKey(key.to_string());
    let is_start = |c: char| c.is_ascii_alphabetic() || c == '_';
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';

    let mut steps = Vec::new();
    let mut rest = key;

    let first_len = match rest.chars().next() {
        Some(c) if is_start(c) => rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len()),
        _ => return Err(invalid()),
    };
    steps.push(rest[..first_len].to_string());
    rest = &rest[first_len..];

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            match after.chars().next() {
                Some(c) if is_start(c) => {}
                _ => return Err(invalid()),
            }
            let len = after.find(|c: char| !is_ident(c)).unwrap_or(after.len());
            steps.push(after[..len].to_string());
            rest = &after[len..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let len = after.find(|c: char| !c.is_ascii_digit()).unwrap_or(after.len());
            if len == 0 || !after[len..].starts_with(']') {
                return Err(invalid());
            }
            steps.push(after[..len].to_string());
            rest = &after[len + 1..];
        } else {
            return Err(invalid());
        }
    }

    Ok(steps)
}

/// Resolves the argument a placeholder refers to.
///
/// `cursor` is the implicit argument index and advances for
/// [`ArgRef::Next`].
pub(crate) fn resolve_arg<'a>(
    placeholder: &Placeholder,
    args: &'a [Arg],
    cursor: &mut usize,
) -> Result<&'a Arg, FormatError> {
    match &placeholder.arg {
        ArgRef::Next => {
            let arg = args.get(*cursor).unwrap_or(&NULL_ARG);
            *cursor += 1;
            Ok(arg)
        }
        ArgRef::Position(n) => Ok(args.get(n - 1).unwrap_or(&NULL_ARG)),
        ArgRef::Named(key) => {
            let mut current = args.first().unwrap_or(&NULL_ARG);
            for step in parse_key_path(key)? {
                current = match current {
                    Arg::Null => {
                        return Err(FormatError::MissingProperty {
                            key: step,
                            found: "null",
                        })
                    }
                    other => other.get(&step).unwrap_or(&NULL_ARG),
                };
            }
            Ok(current)
        }
    }
}

/// Formats one argument according to a placeholder.
pub(crate) fn format_placeholder(placeholder: &Placeholder, arg: &Arg) -> Result<String, FormatError> {
    let conversion = placeholder.conversion;
    let n = if conversion.requires_number() {
        arg.as_number().ok_or(FormatError::ExpectedNumber {
            conversion: conversion.as_char(),
            found: arg.type_name(),
        })?
    } else {
        arg.as_number().unwrap_or(f64::NAN)
    };
    let is_positive = n >= 0.0;

    let truncate = |text: String| match placeholder.precision {
        Some(p) => text.chars().take(p).collect(),
        None => text,
    };

    let mut text = match conversion {
        Conversion::Binary => integer_radix(n, 2),
        Conversion::Char => char::from_u32(to_uint32(n))
            .map(String::from)
            .unwrap_or_default(),
        Conversion::Decimal | Conversion::Integer => integer_radix(n, 10),
        Conversion::Exponent => to_exponential(n, placeholder.precision),
        Conversion::Fixed => match placeholder.precision {
            Some(p) if n.is_finite() => format!("{:.*}", p, n),
            _ => number_to_string(n),
        },
        Conversion::General => match placeholder.precision {
            Some(p) => to_precision(n, p),
            None => number_to_string(n),
        },
        Conversion::Octal => format!("{:o}", to_uint32(n)),
        Conversion::Str | Conversion::Value => truncate(arg.to_text()),
        Conversion::Boolean => truncate(arg.is_truthy().to_string()),
        Conversion::Type => truncate(arg.type_name().to_string()),
        Conversion::Unsigned => to_uint32(n).to_string(),
        Conversion::HexLower => format!("{:x}", to_uint32(n)),
        Conversion::HexUpper => format!("{:X}", to_uint32(n)),
        Conversion::Json => return Ok(to_json(arg, placeholder.width.unwrap_or(0))),
    };

    let mut sign = "";
    if conversion.is_signed() && (!is_positive || placeholder.sign) {
        sign = if is_positive { "+" } else { "-" };
        if let Some(stripped) = text.strip_prefix(['+', '-']) {
            text = stripped.to_string();
        }
    }

    let pad_char = placeholder.pad.unwrap_or(' ');
    let len = sign.chars().count() + text.chars().count();
    let pad: String = match placeholder.width {
        Some(width) if width > len => std::iter::repeat(pad_char).take(width - len).collect(),
        _ => String::new(),
    };

    Ok(if placeholder.left_align {
        format!("{sign}{text}{pad}")
    } else if pad_char == '0' {
        format!("{sign}{pad}{text}")
    } else {
        format!("{pad}{sign}{text}")
    })
}

/// Formats arguments into a format string, failing on invalid input.
///
/// ```rust
/// use lokale::sprintf::try_sprintf;
/// use lokale::Arg;
///
/// assert_eq!(try_sprintf("%2$s %1$s", &["world".into(), "hello".into()]).unwrap(), "hello world");
/// assert!(try_sprintf("%d", &[Arg::from("abc")]).is_err());
/// ```
pub fn try_sprintf(format: &str, args: &[Arg]) -> Result<String, FormatError> {
    let tokens = parse_format(format)?;
    let mut out = String::with_capacity(format.len());
    let mut cursor = 0;
    for token in &tokens {
        match token {
            FormatToken::Literal(text) => out.push_str(text),
            FormatToken::Placeholder(placeholder) => {
                let arg = resolve_arg(placeholder, args, &mut cursor)?;
                out.push_str(&format_placeholder(placeholder, arg)?);
            }
        }
    }
    Ok(out)
}

/// Formats arguments into a format string.
///
/// Invalid format strings or arguments are logged and the format string is
/// returned unchanged.
///
/// ```rust
/// use lokale::{sprintf, Arg};
///
/// assert_eq!(sprintf("%s has %d new %s", &["Jane".into(), 3.into(), "alerts".into()]), "Jane has 3 new alerts");
/// assert_eq!(sprintf("%05.1f%%", &[Arg::from(9.87)]), "009.9%");
/// ```
pub fn sprintf(format: &str, args: &[Arg]) -> String {
    match try_sprintf(format, args) {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(format, error = %err, "failed to format string");
            format.to_string()
        }
    }
}

/// Integer part of `n` in the given radix, keeping the sign.
fn integer_radix(n: f64, radix: u32) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return number_to_string(n);
    }
    let i = n.trunc() as i64;
    let digits = match radix {
        2 => format!("{:b}", i.unsigned_abs()),
        _ => i.unsigned_abs().to_string(),
    };
    if i < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Wraps `n` into an unsigned 32-bit integer.
fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    const MODULUS: f64 = 4_294_967_296.0;
    (n.trunc().rem_euclid(MODULUS)) as u32
}

fn to_exponential(n: f64, precision: Option<usize>) -> String {
    if !n.is_finite() {
        return number_to_string(n);
    }
    let raw = match precision {
        Some(p) => format!("{:.*e}", p, n),
        None => format!("{:e}", n),
    };
    match raw.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => raw,
    }
}

/// Rounds to `precision` significant digits and prints the shortest form.
fn to_precision(n: f64, precision: usize) -> String {
    if n == 0.0 || !n.is_finite() {
        return number_to_string(n);
    }
    let precision = precision.max(1) as i32;
    let magnitude = n.abs().log10().floor() as i32;
    let decimals = precision - 1 - magnitude;
    let rounded = if decimals >= 0 {
        format!("{:.*}", decimals as usize, n)
            .parse::<f64>()
            .unwrap_or(n)
    } else {
        let factor = 10f64.powi(-decimals);
        (n / factor).round() * factor
    };
    number_to_string(rounded)
}

fn to_json(arg: &Arg, indent: usize) -> String {
    let value = arg.to_json();
    if indent == 0 {
        return value.to_string();
    }
    let indent = " ".repeat(indent.min(10));
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(format: &str, args: &[Arg]) -> String {
        try_sprintf(format, args).unwrap()
    }

    // ==================== Parsing ====================

    mod parsing {
        use super::*;

        #[test]
        fn literal_only() {
            assert_eq!(
                parse_format("no placeholders").unwrap(),
                vec![FormatToken::Literal("no placeholders".into())]
            );
        }

        #[test]
        fn percent_escape_merges_with_literals() {
            assert_eq!(
                parse_format("100%% done").unwrap(),
                vec![FormatToken::Literal("100% done".into())]
            );
        }

        #[test]
        fn full_placeholder() {
            let tokens = parse_format("%2$+'*-10.3f").unwrap();
            assert_eq!(
                tokens,
                vec![FormatToken::Placeholder(Placeholder {
                    arg: ArgRef::Position(2),
                    sign: true,
                    pad: Some('*'),
                    left_align: true,
                    width: Some(10),
                    precision: Some(3),
                    conversion: Conversion::Fixed,
                })]
            );
        }

        #[test]
        fn digits_without_dollar_are_width() {
            let tokens = parse_format("%5s").unwrap();
            let FormatToken::Placeholder(ph) = &tokens[0] else {
                panic!("expected placeholder");
            };
            assert_eq!(ph.arg, ArgRef::Next);
            assert_eq!(ph.width, Some(5));
        }

        #[test]
        fn unknown_type_is_error() {
            let err = parse_format("50% off").unwrap_err();
            assert_eq!(
                err,
                FormatError::UnexpectedPlaceholder {
                    format: "50% off".into(),
                    offset: 2
                }
            );
        }

        #[test]
        fn trailing_percent_is_error() {
            assert!(parse_format("oops %").is_err());
        }

        #[test]
        fn mixing_named_and_positional_is_error() {
            assert_eq!(
                parse_format("%(a)s %s").unwrap_err(),
                FormatError::MixedPlaceholders
            );
        }

        #[test]
        fn key_paths() {
            assert_eq!(parse_key_path("user").unwrap(), vec!["user"]);
            assert_eq!(
                parse_key_path("user.emails[1].host").unwrap(),
                vec!["user", "emails", "1", "host"]
            );
            assert!(parse_key_path("1abc").is_err());
            assert!(parse_key_path("a..b").is_err());
            assert!(parse_key_path("a[x]").is_err());
        }
    }

    // ==================== Conversions ====================

    mod conversions {
        use super::*;

        #[test]
        fn strings() {
            assert_eq!(fmt("Hello %s", &["world".into()]), "Hello world");
            assert_eq!(fmt("%.3s", &["abcdef".into()]), "abc");
            assert_eq!(fmt("[%5s]", &["ab".into()]), "[   ab]");
            assert_eq!(fmt("[%-5s]", &["ab".into()]), "[ab   ]");
            assert_eq!(fmt("[%'#5s]", &["ab".into()]), "[###ab]");
        }

        #[test]
        fn integers() {
            assert_eq!(fmt("%d", &[42.into()]), "42");
            assert_eq!(fmt("%i", &[3.9.into()]), "3");
            assert_eq!(fmt("%d", &["17".into()]), "17");
            assert_eq!(fmt("%+d", &[5.into()]), "+5");
            assert_eq!(fmt("%d", &[(-5).into()]), "-5");
            assert_eq!(fmt("%05d", &[(-42).into()]), "-0042");
            assert_eq!(fmt("%5d", &[(-42).into()]), "  -42");
        }

        #[test]
        fn floats() {
            assert_eq!(fmt("%f", &[1.5.into()]), "1.5");
            assert_eq!(fmt("%.2f", &[1.005.into()]), "1.00");
            assert_eq!(fmt("%.1f", &[2.into()]), "2.0");
            assert_eq!(fmt("%+.1f", &[2.26.into()]), "+2.3");
            assert_eq!(fmt("%e", &[1500.into()]), "1.5e+3");
            assert_eq!(fmt("%.2e", &[0.000123.into()]), "1.23e-4");
            assert_eq!(fmt("%.3g", &[3.14159.into()]), "3.14");
            assert_eq!(fmt("%.2g", &[1234.into()]), "1200");
            assert_eq!(fmt("%.3g", &[1.5.into()]), "1.5");
        }

        #[test]
        fn radix_and_unsigned() {
            assert_eq!(fmt("%b", &[5.into()]), "101");
            assert_eq!(fmt("%b", &[(-5).into()]), "-101");
            assert_eq!(fmt("%o", &[8.into()]), "10");
            assert_eq!(fmt("%x", &[255.into()]), "ff");
            assert_eq!(fmt("%X", &[255.into()]), "FF");
            assert_eq!(fmt("%u", &[(-1).into()]), "4294967295");
            assert_eq!(fmt("%x", &[(-1).into()]), "ffffffff");
            assert_eq!(fmt("%c", &[65.into()]), "A");
        }

        #[test]
        fn booleans_types_values() {
            assert_eq!(fmt("%t", &[true.into()]), "true");
            assert_eq!(fmt("%t", &["".into()]), "false");
            assert_eq!(fmt("%.1t", &[true.into()]), "t");
            assert_eq!(fmt("%T", &["x".into()]), "string");
            assert_eq!(fmt("%T", &[Arg::Null]), "null");
            assert_eq!(fmt("%v", &[12.into()]), "12");
        }

        #[test]
        fn json() {
            let arg = Arg::map([("a", Arg::from(1))]);
            assert_eq!(fmt("%j", &[arg.clone()]), r#"{"a":1}"#);
            assert_eq!(fmt("%2j", &[arg]), "{\n  \"a\": 1\n}");
            assert_eq!(fmt("%j", &["x".into()]), r#""x""#);
        }

        #[test]
        fn numeric_conversion_rejects_text() {
            let err = try_sprintf("%d", &["many".into()]).unwrap_err();
            assert_eq!(
                err,
                FormatError::ExpectedNumber {
                    conversion: 'd',
                    found: "string"
                }
            );
        }

        #[test]
        fn oversized_precision_is_clamped() {
            let out = fmt("%.70000f", &[1.5.into()]);
            assert_eq!(out, format!("1.5{}", "0".repeat(MAX_PRECISION - 1)));

            let out = fmt("%.70000e", &[1.5.into()]);
            assert!(out.ends_with("e+0"));
            assert_eq!(out.len(), "1.".len() + MAX_PRECISION + "e+0".len());

            assert_eq!(fmt("%.70000g", &[1.5.into()]), "1.5");
            assert_eq!(fmt("%.99999999999999999999999s", &["abc".into()]), "abc");
        }

        #[test]
        fn oversized_width_is_clamped() {
            let out = fmt("%99999999999s", &["x".into()]);
            assert_eq!(out.len(), MAX_WIDTH);
            assert!(out.ends_with('x'));
        }

        #[test]
        fn null_reads_as_zero_for_numbers() {
            assert_eq!(fmt("%d", &[Arg::Null]), "0");
        }
    }

    // ==================== Argument Selection ====================

    mod arguments {
        use super::*;

        #[test]
        fn positional() {
            assert_eq!(
                fmt("%2$s, %1$s and %2$s", &["a".into(), "b".into()]),
                "b, a and b"
            );
        }

        #[test]
        fn named() {
            let args = [Arg::map([
                ("name", Arg::from("Jane")),
                (
                    "team",
                    Arg::map([("slugs", Arg::from(vec!["core", "web"]))]),
                ),
            ])];
            assert_eq!(
                fmt("%(name)s is in %(team.slugs[1])s", &args),
                "Jane is in web"
            );
        }

        #[test]
        fn named_missing_key_is_empty() {
            let args = [Arg::map([("a", Arg::from(1))])];
            assert_eq!(fmt("[%(b)s]", &args), "[]");
        }

        #[test]
        fn named_without_arguments_is_error() {
            assert!(matches!(
                try_sprintf("%(a)s", &[]),
                Err(FormatError::MissingProperty { .. })
            ));
        }

        #[test]
        fn named_with_bad_key_is_error() {
            assert!(matches!(
                try_sprintf("%(1a)s", &[Arg::map([("a", Arg::Null)])]),
                Err(FormatError::InvalidKey(_))
            ));
        }

        #[test]
        fn missing_arguments_are_empty() {
            assert_eq!(fmt("%s-%s", &["a".into()]), "a-");
        }
    }

    #[test]
    fn graceful_sprintf_returns_format_on_error() {
        assert_eq!(sprintf("%d items", &["lots".into()]), "%d items");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"]{0,30}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn string_placeholders_concatenate(a in plain_text(), b in plain_text(), sep in plain_text()) {
            let format = format!("%s{}%s", sep);
            prop_assert_eq!(try_sprintf(&format, &[a.clone().into(), b.clone().into()]).unwrap(), format!("{}{}{}", a, sep, b));
        }

        #[test]
        fn literal_text_is_unchanged(text in plain_text()) {
            prop_assert_eq!(try_sprintf(&text, &[]).unwrap(), text);
        }

        #[test]
        fn integers_match_display(n in any::<i32>()) {
            prop_assert_eq!(try_sprintf("%d", &[n.into()]).unwrap(), n.to_string());
        }

        #[test]
        fn width_is_respected(text in "[a-z]{0,10}", width in 0usize..20) {
            let out = try_sprintf(&format!("%{}s", width), &[text.clone().into()]).unwrap();
            prop_assert_eq!(out.chars().count(), width.max(text.len()));
        }
    }
}
