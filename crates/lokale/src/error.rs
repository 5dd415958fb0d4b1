//! Error types.
//!
//! The translation path itself never fails: missing keys, broken templates
//! and bad format strings degrade to readable output. These errors surface
//! from the strict entry points ([`try_format`](crate::try_format),
//! [`try_sprintf`](crate::sprintf::try_sprintf)) and from loading catalogs
//! and settings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing or applying a printf-style format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A `%` that does not start a valid placeholder.
    #[error("unexpected placeholder at byte {offset} of {format:?}")]
    UnexpectedPlaceholder { format: String, offset: usize },

    /// A `%(key)` placeholder whose key path could not be parsed.
    #[error("failed to parse named argument key {0:?}")]
    InvalidKey(String),

    /// Named and positional placeholders in the same format string.
    #[error("mixing positional and named placeholders is not supported")]
    MixedPlaceholders,

    /// A numeric conversion applied to a non-numeric argument.
    #[error("expecting number for %{conversion} but found {found}")]
    ExpectedNumber { conversion: char, found: &'static str },

    /// A named key path stepped into a missing or non-map value.
    #[error("cannot access property {key:?} of {found} value")]
    MissingProperty { key: String, found: &'static str },
}

/// Errors from parsing a `Plural-Forms` header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluralError {
    /// No `nplurals=` clause.
    #[error("missing nplurals in {0:?}")]
    MissingCount(String),

    /// `nplurals` is not a positive integer.
    #[error("invalid nplurals {0:?}")]
    InvalidCount(String),

    /// No `plural=` clause.
    #[error("missing plural expression in {0:?}")]
    MissingExpression(String),

    /// The plural expression does not parse.
    #[error("syntax error in plural expression {expr:?} at byte {offset}: {message}")]
    Syntax {
        expr: String,
        offset: usize,
        message: String,
    },
}

/// Errors from loading a translation catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is valid but not a catalog.
    #[error("invalid catalog: {0}")]
    InvalidFormat(String),

    /// A message entry is not a list of strings.
    #[error("invalid catalog entry for {msgid:?}")]
    InvalidEntry { msgid: String },

    /// The catalog's plural rule does not parse.
    #[error("invalid plural forms: {0}")]
    Plural(#[from] PluralError),

    /// No catalog file exists for the locale.
    #[error("no catalog for locale {locale:?} (searched {})", display_paths(.searched))]
    NotFound {
        locale: String,
        searched: Vec<PathBuf>,
    },
}

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for [`Settings`](crate::Settings).
    #[error("invalid settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
