//! Translation catalogs, printf-style formatting and component templates.
//!
//! `lokale` looks up UI strings in gettext catalogs (Jed JSON), formats
//! them printf-style, and renders bracket component templates into node
//! trees:
//!
//! ```rust
//! use lokale::{Arg, Catalog, ComponentMap, Element, Translator};
//!
//! let catalog = Catalog::empty("de")
//!     .with_message("Hello %s", "Hallo %s")
//!     .with_plural("%s event", ["%s Ereignis", "%s Ereignisse"])
//!     .with_message("Read [link:the docs]", "Lies [link:die Doku]");
//! let tr = Translator::new(catalog);
//!
//! assert_eq!(tr.gettext("Hello %s", &[Arg::from("Jane")]), "Hallo Jane");
//! assert_eq!(tr.ngettext("%s event", "%s events", &[Arg::from(2500)]), "2.500 Ereignisse");
//!
//! let node = tr.gettext_component_template(
//!     "Read [link:the docs]",
//!     &ComponentMap::new().with("link", Element::new("a").attr("href", "/docs")),
//! );
//! assert_eq!(node.to_html(), "<span>Lies </span><a href=\"/docs\"><span>die Doku</span></a>");
//! ```
//!
//! # Formatting
//!
//! [`format()`] dispatches on the arguments: plain values interpolate into a
//! string ([`sprintf()`]), while a node argument (an [`Element`] such as a
//! link) makes the result a node tree that keeps the element intact. See
//! [`Rendered`].
//!
//! # Active Locale
//!
//! The [`global`] module holds the process-wide translator behind
//! [`t()`], [`tn()`] and [`tct()`] (and the [`t!`], [`tn!`], [`tct!`] macros).
//! [`set_locale`] loads a catalog according to the configured
//! [`Settings`] and activates it.
//!
//! # Failure Model
//!
//! Translation never fails. Missing messages fall back to the source
//! string, bad format strings are logged with `tracing` and returned
//! unformatted, and broken templates render their text. Errors are
//! reserved for loading catalogs and settings.

mod arg;
mod catalog;
mod error;
mod format;
pub mod global;
mod macros;
mod number;
pub mod plural;
pub mod settings;
pub mod sprintf;
mod translator;

pub use arg::Arg;
pub use catalog::{Catalog, CatalogSource, DEFAULT_DOMAIN};
pub use error::{CatalogError, FormatError, PluralError, SettingsError};
pub use format::{args_involve_nodes, format, try_format, Rendered};
pub use global::{set_locale, t, tct, tn};
pub use number::{format_count, symbols_for, NumberSymbols};
pub use plural::PluralForms;
pub use settings::Settings;
pub use sprintf::sprintf;
pub use translator::Translator;

// Template types, so callers need a single dependency.
pub use lokale_template::{
    parse, render_template, Component, ComponentMap, Element, Node, NodeWriter, ParsedTemplate,
    TagTransform, TemplateSubvalue, UnknownTagBehavior,
};
