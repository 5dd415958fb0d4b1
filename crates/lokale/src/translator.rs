//! Catalog-backed translation functions.

use std::sync::Arc;

use lokale_template::{parse, render_template, ComponentMap, Element, Node};

use crate::arg::Arg;
use crate::catalog::Catalog;
use crate::format::{format, Rendered};
use crate::number::format_count;

/// Wraps translated output when debug marks are on.
const DEBUG_MARK: &str = "\u{1f1e6}\u{1f1f9}";

/// Translates and formats messages against one catalog.
///
/// A translator is immutable; switching locale means building a new one
/// (see [`global::set_locale`](crate::global::set_locale)).
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    debug_marks: bool,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Catalog::empty("en"))
    }
}

impl Translator {
    pub fn new(catalog: Catalog) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    pub fn from_shared(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            debug_marks: false,
        }
    }

    /// Wraps every translated result in visible markers, to spot strings
    /// that bypass translation.
    pub fn with_debug_marks(mut self, enabled: bool) -> Self {
        self.debug_marks = enabled;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn locale(&self) -> &str {
        self.catalog.locale()
    }

    pub fn debug_marks(&self) -> bool {
        self.debug_marks
    }

    /// Translates a message and formats it with `args`.
    ///
    /// Without arguments the translation is returned verbatim, so `%%`
    /// stays as written.
    ///
    /// ```rust
    /// use lokale::{Arg, Catalog, Translator};
    ///
    /// let tr = Translator::new(Catalog::empty("de").with_message("Hello %s", "Hallo %s"));
    /// assert_eq!(tr.gettext("Hello %s", &[Arg::from("Jane")]), "Hallo Jane");
    /// assert_eq!(tr.gettext("100%%", &[]), "100%%");
    /// ```
    pub fn gettext(&self, msgid: &str, args: &[Arg]) -> Rendered {
        let translated = self.catalog.lookup(msgid).unwrap_or(msgid);
        self.finish(translated, args)
    }

    /// [`gettext`](Self::gettext) with a message context.
    pub fn pgettext(&self, context: &str, msgid: &str, args: &[Arg]) -> Rendered {
        let translated = self.catalog.lookup_context(context, msgid).unwrap_or(msgid);
        self.finish(translated, args)
    }

    /// Translates a pluralized message.
    ///
    /// The first argument is the count. It selects the plural form, and
    /// unless the message uses `%d` it is replaced by its locale-grouped
    /// text, so messages print counts with `%s`.
    ///
    /// ```rust
    /// use lokale::{Arg, Translator};
    ///
    /// let tr = Translator::default();
    /// assert_eq!(tr.ngettext("%s event", "%s events", &[Arg::from(1)]), "1 event");
    /// assert_eq!(tr.ngettext("%s event", "%s events", &[Arg::from(12345)]), "12,345 events");
    /// ```
    pub fn ngettext(&self, singular: &str, plural: &str, args: &[Arg]) -> Rendered {
        let (count, args) = self.count_args(singular, plural, args);
        let translated = self.catalog.lookup_plural(singular, plural, count);
        self.format_marked(translated, &args)
    }

    /// [`ngettext`](Self::ngettext) with a message context.
    pub fn npgettext(&self, context: &str, singular: &str, plural: &str, args: &[Arg]) -> Rendered {
        let (count, args) = self.count_args(singular, plural, args);
        let translated = self
            .catalog
            .lookup_plural_context(context, singular, plural, count);
        self.format_marked(translated, &args)
    }

    /// Translates a component template and renders it with `components`.
    ///
    /// ```rust
    /// use lokale::{ComponentMap, Element, Translator};
    ///
    /// let tr = Translator::default();
    /// let node = tr.gettext_component_template(
    ///     "See [link:the docs].",
    ///     &ComponentMap::new().with("link", Element::new("a").attr("href", "/docs")),
    /// );
    /// assert_eq!(node.text_content(), "See the docs.");
    /// ```
    pub fn gettext_component_template(&self, template: &str, components: &ComponentMap) -> Node {
        let translated = self.catalog.lookup(template).unwrap_or(template);
        let node = render_template(&parse(translated), components);
        self.mark_node(node)
    }

    /// Count for plural selection, and the arguments with the count
    /// replaced by its grouped text.
    fn count_args(&self, singular: &str, plural: &str, args: &[Arg]) -> (f64, Vec<Arg>) {
        let Some(first) = args.first() else {
            return (0.0, Vec::new());
        };
        let count = first
            .as_number()
            .map(f64::abs)
            .filter(|n| !n.is_nan())
            .unwrap_or(0.0);

        let mut args = args.to_vec();
        if singular.contains("%d") || plural.contains("%d") {
            tracing::error!(
                singular,
                plural,
                "pluralized messages must print the count with %s, not %d"
            );
        } else {
            args[0] = Arg::Str(format_count(count, self.catalog.locale()));
        }
        (count, args)
    }

    fn finish(&self, translated: &str, args: &[Arg]) -> Rendered {
        if args.is_empty() {
            return self.mark(Rendered::Text(translated.to_string()));
        }
        self.format_marked(translated, args)
    }

    fn format_marked(&self, translated: &str, args: &[Arg]) -> Rendered {
        self.mark(format(translated, args))
    }

    fn mark(&self, rendered: Rendered) -> Rendered {
        if !self.debug_marks {
            return rendered;
        }
        match rendered {
            Rendered::Text(text) => Rendered::Text(format!("{DEBUG_MARK}{text}{DEBUG_MARK}")),
            Rendered::Node(node) => Rendered::Node(self.mark_node(node)),
        }
    }

    fn mark_node(&self, node: Node) -> Node {
        if !self.debug_marks {
            return node;
        }
        Element::new("span")
            .child(DEBUG_MARK)
            .child(node)
            .child(DEBUG_MARK)
            .into()
    }
}
