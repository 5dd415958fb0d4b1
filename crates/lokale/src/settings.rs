//! Configuration.
//!
//! Settings come from an optional YAML file, then environment variables:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `LOKALE_LOCALE` | `default_locale` |
//! | `LOKALE_CATALOG_DIR` | `catalog_dir` |
//! | `LOKALE_DEBUG` | `debug_marks` (`1`/`true`/`yes`, `0`/`false`/`no`) |
//!
//! ```yaml
//! catalog_dir: locale
//! domain: sentry
//! default_locale: de
//! styles:
//!   a: underlined.cyan
//!   strong: bold
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use console::Style;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogSource, DEFAULT_DOMAIN};
use crate::error::{CatalogError, SettingsError};
use crate::translator::Translator;

pub const ENV_LOCALE: &str = "LOKALE_LOCALE";
pub const ENV_CATALOG_DIR: &str = "LOKALE_CATALOG_DIR";
pub const ENV_DEBUG: &str = "LOKALE_DEBUG";

/// Abstraction over environment variables.
pub trait EnvReader {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, for tests.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Where catalogs live and how translated output is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding catalog files. Without one, every locale uses
    /// source strings.
    pub catalog_dir: Option<PathBuf>,
    /// Catalog domain, the file name under `LC_MESSAGES`.
    pub domain: String,
    /// Locale activated at startup.
    pub default_locale: String,
    /// Wrap translated output in visible markers.
    pub debug_marks: bool,
    /// Terminal styles per element name, as `console` dotted strings.
    pub styles: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        let styles = [
            ("a", "underlined.cyan"),
            ("strong", "bold"),
            ("b", "bold"),
            ("em", "italic"),
            ("i", "italic"),
            ("code", "yellow"),
        ]
        .into_iter()
        .map(|(name, style)| (name.to_string(), style.to_string()))
        .collect();

        Self {
            catalog_dir: None,
            domain: DEFAULT_DOMAIN.to_string(),
            default_locale: "en".to_string(),
            debug_marks: false,
            styles,
        }
    }
}

impl Settings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a YAML settings file. A relative `catalog_dir` is resolved
    /// against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_yaml_str(&yaml)?;
        if let Some(base) = path.parent() {
            settings.catalog_dir = settings
                .catalog_dir
                .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });
        }
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().apply_env(&RealEnv)
    }

    /// Applies `LOKALE_*` overrides.
    pub fn apply_env(mut self, env: &impl EnvReader) -> Self {
        if let Some(locale) = env.var(ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
            self.default_locale = locale.trim().to_string();
        }
        if let Some(dir) = env.var(ENV_CATALOG_DIR).filter(|v| !v.trim().is_empty()) {
            self.catalog_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = env.var(ENV_DEBUG) {
            match parse_flag(&value) {
                Some(flag) => self.debug_marks = flag,
                None => tracing::warn!(value = %value, "ignoring unrecognized {ENV_DEBUG}"),
            }
        }
        self
    }

    pub fn catalog_source(&self) -> CatalogSource {
        match &self.catalog_dir {
            Some(root) => CatalogSource::Dir {
                root: root.clone(),
                domain: self.domain.clone(),
            },
            None => CatalogSource::Empty,
        }
    }

    pub fn load_catalog(&self, locale: &str) -> Result<Catalog, CatalogError> {
        self.catalog_source().load(locale)
    }

    /// A translator for `locale`, honoring `debug_marks`.
    pub fn translator_for(&self, locale: &str) -> Result<Translator, CatalogError> {
        let catalog = self.load_catalog(locale)?;
        Ok(Translator::new(catalog).with_debug_marks(self.debug_marks))
    }

    /// A translator for the default locale.
    pub fn load_translator(&self) -> Result<Translator, CatalogError> {
        self.translator_for(&self.default_locale)
    }

    /// Parsed terminal styles. Invalid style strings map to an unstyled
    /// [`Style`].
    pub fn console_styles(&self) -> HashMap<String, Style> {
        self.styles
            .iter()
            .map(|(name, spec)| (name.clone(), Style::from_dotted_str(spec)))
            .collect()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
