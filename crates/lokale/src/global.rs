//! Process-wide active locale.
//!
//! One [`Translator`] is active at a time. Switching locale swaps it
//! atomically; readers clone the `Arc` and keep using the translator they
//! got even if another thread switches locale meanwhile.
//!
//! Until a locale is set, the active translator has an empty English
//! catalog, so source strings pass through.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use lokale_template::{ComponentMap, Node};

use crate::arg::Arg;
use crate::error::CatalogError;
use crate::format::Rendered;
use crate::settings::Settings;
use crate::translator::Translator;

static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::from_env()));

static ACTIVE: Lazy<RwLock<Arc<Translator>>> =
    Lazy::new(|| RwLock::new(Arc::new(default_translator())));

fn default_translator() -> Translator {
    Translator::default().with_debug_marks(settings().debug_marks)
}

/// The settings used by [`set_locale`].
pub fn settings() -> Settings {
    SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the settings used by [`set_locale`]. The active translator is
/// unchanged.
pub fn configure(settings: Settings) {
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = settings;
}

/// Makes `translator` the active one.
pub fn install(translator: Translator) {
    let translator = Arc::new(translator);
    tracing::debug!(locale = translator.locale(), "activating translator");
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = translator;
}

/// The active translator.
pub fn current() -> Arc<Translator> {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Locale of the active translator.
pub fn locale() -> String {
    current().locale().to_string()
}

/// Loads the catalog for `locale` through the configured settings and
/// activates it.
///
/// On error the active translator is left as it was.
pub fn set_locale(locale: &str) -> Result<(), CatalogError> {
    let translator = settings().translator_for(locale)?;
    install(translator);
    Ok(())
}

/// Restores the initial state: settings from the environment and an empty
/// English catalog.
pub fn reset() {
    configure(Settings::from_env());
    install(default_translator());
}

/// Translates a message with the active translator.
pub fn gettext(msgid: &str, args: &[Arg]) -> Rendered {
    current().gettext(msgid, args)
}

/// Translates a pluralized message with the active translator.
pub fn ngettext(singular: &str, plural: &str, args: &[Arg]) -> Rendered {
    current().ngettext(singular, plural, args)
}

/// Translates and renders a component template with the active translator.
pub fn gettext_component_template(template: &str, components: &ComponentMap) -> Node {
    current().gettext_component_template(template, components)
}

/// Short for [`gettext`].
pub fn t(msgid: &str, args: &[Arg]) -> Rendered {
    gettext(msgid, args)
}

/// Short for [`ngettext`].
pub fn tn(singular: &str, plural: &str, args: &[Arg]) -> Rendered {
    ngettext(singular, plural, args)
}

/// Short for [`gettext_component_template`].
pub fn tct(template: &str, components: &ComponentMap) -> Node {
    gettext_component_template(template, components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use serial_test::serial;

    #[test]
    #[serial]
    fn starts_as_english_passthrough() {
        reset();
        assert_eq!(t("Settings", &[]), "Settings");
        assert_eq!(tn("%s event", "%s events", &[2.into()]), "2 events");
    }

    #[test]
    #[serial]
    fn install_and_reset() {
        install(Translator::new(Catalog::empty("de").with_message("Settings", "Einstellungen")));
        assert_eq!(locale(), "de");
        assert_eq!(t("Settings", &[]), "Einstellungen");

        reset();
        assert_eq!(locale(), "en");
        assert_eq!(t("Settings", &[]), "Settings");
    }

    #[test]
    #[serial]
    fn failed_switch_keeps_active_translator() {
        reset();
        let dir = tempfile::TempDir::new().unwrap();
        configure(Settings {
            catalog_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        });
        install(Translator::new(Catalog::empty("fr")));
        assert!(set_locale("it").is_err());
        assert_eq!(locale(), "fr");
        reset();
    }

    #[test]
    #[serial]
    fn held_translator_survives_switch() {
        install(Translator::new(Catalog::empty("de").with_message("Yes", "Ja")));
        let held = current();
        install(Translator::new(Catalog::empty("fr").with_message("Yes", "Oui")));
        assert_eq!(held.gettext("Yes", &[]), "Ja");
        assert_eq!(t("Yes", &[]), "Oui");
        reset();
    }
}
