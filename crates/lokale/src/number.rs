//! Locale-aware number formatting.
//!
//! Counts shown in pluralized messages are grouped per locale (`1,000` in
//! English, `1.000` in German). Up to three fraction digits are kept.

/// Separators used to print numbers in a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    /// Thousands separator.
    pub group: &'static str,
    /// Decimal separator.
    pub decimal: &'static str,
}

const COMMA_DOT: NumberSymbols = NumberSymbols {
    group: ",",
    decimal: ".",
};
const DOT_COMMA: NumberSymbols = NumberSymbols {
    group: ".",
    decimal: ",",
};
const SPACE_COMMA: NumberSymbols = NumberSymbols {
    group: "\u{202f}",
    decimal: ",",
};
const NBSP_COMMA: NumberSymbols = NumberSymbols {
    group: "\u{a0}",
    decimal: ",",
};
const APOSTROPHE_DOT: NumberSymbols = NumberSymbols {
    group: "\u{2019}",
    decimal: ".",
};

/// Full locale tags that differ from their language.
const REGION_SYMBOLS: &[(&str, NumberSymbols)] = &[
    ("de-ch", APOSTROPHE_DOT),
    ("pt-br", DOT_COMMA),
    ("pt-pt", NBSP_COMMA),
    ("es-mx", COMMA_DOT),
];

const LANGUAGE_SYMBOLS: &[(&str, NumberSymbols)] = &[
    ("en", COMMA_DOT),
    ("ja", COMMA_DOT),
    ("zh", COMMA_DOT),
    ("ko", COMMA_DOT),
    ("he", COMMA_DOT),
    ("th", COMMA_DOT),
    ("de", DOT_COMMA),
    ("es", DOT_COMMA),
    ("it", DOT_COMMA),
    ("nl", DOT_COMMA),
    ("pt", DOT_COMMA),
    ("id", DOT_COMMA),
    ("tr", DOT_COMMA),
    ("da", DOT_COMMA),
    ("el", DOT_COMMA),
    ("ro", DOT_COMMA),
    ("fr", SPACE_COMMA),
    ("ru", NBSP_COMMA),
    ("pl", NBSP_COMMA),
    ("cs", NBSP_COMMA),
    ("sk", NBSP_COMMA),
    ("sv", NBSP_COMMA),
    ("nb", NBSP_COMMA),
    ("no", NBSP_COMMA),
    ("fi", NBSP_COMMA),
    ("uk", NBSP_COMMA),
    ("bg", NBSP_COMMA),
    ("hu", NBSP_COMMA),
];

/// Normalizes `pt_BR` / `pt-BR` to `pt-br`.
pub(crate) fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

/// Looks up number separators for a locale tag.
///
/// The full tag is tried first, then its language; unknown locales use
/// English separators.
pub fn symbols_for(locale: &str) -> NumberSymbols {
    let tag = normalize_locale(locale);
    if let Some((_, symbols)) = REGION_SYMBOLS.iter().find(|(t, _)| *t == tag) {
        return *symbols;
    }
    let language = tag.split('-').next().unwrap_or_default();
    LANGUAGE_SYMBOLS
        .iter()
        .find(|(l, _)| *l == language)
        .map(|(_, s)| *s)
        .unwrap_or(COMMA_DOT)
}

/// Formats a number with the locale's grouping and decimal separators.
///
/// ```rust
/// use lokale::format_count;
///
/// assert_eq!(format_count(1000.0, "en"), "1,000");
/// assert_eq!(format_count(1234567.891, "de"), "1.234.567,891");
/// assert_eq!(format_count(999.0, "en"), "999");
/// ```
pub fn format_count(n: f64, locale: &str) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let symbols = symbols_for(locale);
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if n < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, symbols.group));
    if !frac_part.is_empty() {
        out.push_str(symbols.decimal);
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
