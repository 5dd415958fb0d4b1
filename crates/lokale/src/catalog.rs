//! Translation catalogs.
//!
//! Catalogs use the JSON layout produced by `po2json` for the Jed
//! library. A flat catalog maps message ids to their translations, with the
//! header under the empty key:
//!
//! ```json
//! {
//!   "": {"domain": "sentry", "lang": "de", "plural_forms": "nplurals=2; plural=(n != 1);"},
//!   "Settings": ["Einstellungen"],
//!   "%s event": ["%s Ereignis", "%s Ereignisse"]
//! }
//! ```
//!
//! The same object may also be nested as
//! `{"domain": "sentry", "locale_data": {"sentry": {...}}}`. Messages with a
//! context are keyed as `context\u{4}msgid`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::CatalogError;
use crate::plural::PluralForms;

/// Domain used when neither the catalog nor the settings name one.
pub const DEFAULT_DOMAIN: &str = "sentry";

/// Separator between a message context and its id.
const CONTEXT_GLUE: char = '\u{4}';

/// The translations of one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locale: String,
    domain: String,
    plural: PluralForms,
    messages: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// A catalog without translations. Every lookup returns the source
    /// string.
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            domain: DEFAULT_DOMAIN.to_string(),
            plural: PluralForms::default(),
            messages: HashMap::new(),
        }
    }

    /// Parses a catalog from JSON text.
    pub fn from_json_str(locale: &str, json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(locale, value)
    }

    /// Builds a catalog from parsed JSON.
    ///
    /// The catalog reports `locale` as its locale, whatever the header's
    /// `lang` says, so a `de_AT` request served by the `de` file stays
    /// `de_AT`.
    pub fn from_value(locale: &str, value: Value) -> Result<Self, CatalogError> {
        let Value::Object(mut root) = value else {
            return Err(CatalogError::InvalidFormat(
                "catalog must be a JSON object".to_string(),
            ));
        };

        let mut domain = None;
        let data = match root.remove("locale_data") {
            Some(Value::Object(mut locale_data)) => {
                let name = match root.get("domain").and_then(Value::as_str) {
                    Some(name) => name.to_string(),
                    None => locale_data.keys().next().cloned().ok_or_else(|| {
                        CatalogError::InvalidFormat("locale_data is empty".to_string())
                    })?,
                };
                let data = match locale_data.remove(&name) {
                    Some(Value::Object(data)) => data,
                    _ => {
                        return Err(CatalogError::InvalidFormat(format!(
                            "locale_data has no domain {name:?}"
                        )))
                    }
                };
                domain = Some(name);
                data
            }
            Some(_) => {
                return Err(CatalogError::InvalidFormat(
                    "locale_data must be an object".to_string(),
                ))
            }
            None => root,
        };

        Self::from_entries(locale, domain, data)
    }

    fn from_entries(
        locale: &str,
        mut domain: Option<String>,
        mut data: Map<String, Value>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::empty(locale);

        if let Some(Value::Object(header)) = data.remove("") {
            let field = |names: &[&str]| {
                names
                    .iter()
                    .find_map(|name| header.get(*name).and_then(Value::as_str))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            };
            if domain.is_none() {
                domain = field(&["domain"]).map(str::to_string);
            }
            if let Some(forms) = field(&["plural_forms", "Plural-Forms"]) {
                catalog.plural = PluralForms::parse(forms)?;
            }
        }
        if let Some(domain) = domain {
            catalog.domain = domain;
        }

        catalog.messages.reserve(data.len());
        for (msgid, entry) in data {
            let translations = parse_entry(&msgid, entry)?;
            catalog.messages.insert(msgid, translations);
        }
        Ok(catalog)
    }

    /// Reads a catalog file.
    pub fn from_path(locale: &str, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(locale, &json)?;
        tracing::debug!(
            path = %path.display(),
            locale = catalog.locale(),
            entries = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Finds and reads the catalog for `locale` under `dir`.
    ///
    /// For each candidate locale (`pt-BR`, then `pt_BR`, then `pt`) the
    /// files `<dir>/<locale>/LC_MESSAGES/<domain>.json` and
    /// `<dir>/<locale>.json` are tried in order. English without a catalog
    /// file resolves to an empty catalog.
    pub fn load_from_dir(
        dir: impl AsRef<Path>,
        domain: &str,
        locale: &str,
    ) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut searched = Vec::new();

        for candidate in locale_candidates(locale) {
            for path in [
                dir.join(&candidate)
                    .join("LC_MESSAGES")
                    .join(format!("{domain}.json")),
                dir.join(format!("{candidate}.json")),
            ] {
                if path.is_file() {
                    if candidate != locale {
                        tracing::debug!(requested = locale, using = %candidate, "falling back to catalog");
                    }
                    return Self::from_path(locale, &path);
                }
                searched.push(path);
            }
        }

        if language_of(locale) == "en" {
            tracing::debug!(locale, "no catalog file, using source strings");
            return Ok(Self::empty(locale));
        }
        Err(CatalogError::NotFound {
            locale: locale.to_string(),
            searched,
        })
    }

    /// Adds or replaces a singular translation.
    pub fn with_message(mut self, msgid: impl Into<String>, translation: impl Into<String>) -> Self {
        self.messages.insert(msgid.into(), vec![translation.into()]);
        self
    }

    /// Adds or replaces a translation under a message context.
    pub fn with_context_message(
        mut self,
        context: &str,
        msgid: &str,
        translation: impl Into<String>,
    ) -> Self {
        self.messages
            .insert(context_key(Some(context), msgid), vec![translation.into()]);
        self
    }

    /// Adds or replaces the plural forms of a message.
    pub fn with_plural<S: Into<String>>(
        mut self,
        msgid: impl Into<String>,
        forms: impl IntoIterator<Item = S>,
    ) -> Self {
        self.messages
            .insert(msgid.into(), forms.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the plural rule.
    pub fn with_plural_forms(mut self, plural: PluralForms) -> Self {
        self.plural = plural;
        self
    }

    /// Translation of `msgid`, if the catalog has a non-empty one.
    pub fn lookup(&self, msgid: &str) -> Option<&str> {
        self.lookup_in(None, msgid)
    }

    /// Translation of `msgid` under a message context.
    pub fn lookup_context(&self, context: &str, msgid: &str) -> Option<&str> {
        self.lookup_in(Some(context), msgid)
    }

    fn lookup_in(&self, context: Option<&str>, msgid: &str) -> Option<&str> {
        self.form(context, msgid, 0)
    }

    /// Plural form of a message for count `n`.
    ///
    /// Falls back to `singular` when `n` is one and `plural` otherwise if
    /// the catalog has no usable translation.
    pub fn lookup_plural<'a>(&'a self, singular: &'a str, plural: &'a str, n: f64) -> &'a str {
        self.lookup_plural_in(None, singular, plural, n)
    }

    /// Plural form of a message under a message context.
    pub fn lookup_plural_context<'a>(
        &'a self,
        context: &str,
        singular: &'a str,
        plural: &'a str,
        n: f64,
    ) -> &'a str {
        self.lookup_plural_in(Some(context), singular, plural, n)
    }

    fn lookup_plural_in<'a>(
        &'a self,
        context: Option<&str>,
        singular: &'a str,
        plural: &'a str,
        n: f64,
    ) -> &'a str {
        let index = self.plural.index(n);
        self.form(context, singular, index)
            .unwrap_or(if n == 1.0 { singular } else { plural })
    }

    fn form(&self, context: Option<&str>, msgid: &str, index: usize) -> Option<&str> {
        let forms = match context {
            None => self.messages.get(msgid),
            Some(_) => self.messages.get(&context_key(context, msgid)),
        }?;
        forms
            .get(index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn plural_forms(&self) -> &PluralForms {
        &self.plural
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Where translators find catalogs when switching locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// No catalogs; every locale gets an empty catalog.
    #[default]
    Empty,
    /// Catalog files under a directory.
    Dir { root: PathBuf, domain: String },
}

impl CatalogSource {
    /// Loads the catalog for a locale.
    pub fn load(&self, locale: &str) -> Result<Catalog, CatalogError> {
        match self {
            CatalogSource::Empty => Ok(Catalog::empty(locale)),
            CatalogSource::Dir { root, domain } => Catalog::load_from_dir(root, domain, locale),
        }
    }
}

fn context_key(context: Option<&str>, msgid: &str) -> String {
    match context {
        Some(context) => format!("{context}{CONTEXT_GLUE}{msgid}"),
        None => msgid.to_string(),
    }
}

fn parse_entry(msgid: &str, entry: Value) -> Result<Vec<String>, CatalogError> {
    let invalid = || CatalogError::InvalidEntry {
        msgid: msgid.to_string(),
    };
    match entry {
        Value::String(s) => Ok(vec![s]),
        Value::Array(items) => {
            let mut items = items.into_iter().peekable();
            // Jed 0.x puts msgid_plural (or null) before the translations.
            if items.peek().is_some_and(Value::is_null) {
                items.next();
            }
            items
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(invalid()),
                })
                .collect()
        }
        _ => Err(invalid()),
    }
}

fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// `pt-BR` → `["pt-BR", "pt_BR", "pt"]`, without duplicates.
fn locale_candidates(locale: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::with_capacity(3);
    for candidate in [
        locale.to_string(),
        locale.replace('-', "_"),
        language_of(locale).to_string(),
    ] {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}
