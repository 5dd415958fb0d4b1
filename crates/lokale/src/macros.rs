//! Shorthand macros over the active translator.

/// Translates a message with the active translator.
///
/// Arguments are converted with [`Arg::from`](crate::Arg).
///
/// ```rust
/// use lokale::t;
///
/// assert_eq!(t!("Hello %s, you have %d alerts", "Jane", 3), "Hello Jane, you have 3 alerts");
/// assert_eq!(t!("Settings"), "Settings");
/// ```
#[macro_export]
macro_rules! t {
    ($msgid:expr $(,)?) => {
        $crate::global::t($msgid, &[])
    };
    ($msgid:expr, $($arg:expr),+ $(,)?) => {
        $crate::global::t($msgid, &[$($crate::Arg::from($arg)),+])
    };
}

/// Translates a pluralized message. The first argument is the count.
///
/// ```rust
/// use lokale::tn;
///
/// assert_eq!(tn!("%s project", "%s projects", 1), "1 project");
/// assert_eq!(tn!("%s project in %s", "%s projects in %s", 2500, "acme"), "2,500 projects in acme");
/// ```
#[macro_export]
macro_rules! tn {
    ($singular:expr, $plural:expr $(,)?) => {
        $crate::global::tn($singular, $plural, &[])
    };
    ($singular:expr, $plural:expr, $($arg:expr),+ $(,)?) => {
        $crate::global::tn($singular, $plural, &[$($crate::Arg::from($arg)),+])
    };
}

/// Translates a component template, mapping group names to components.
///
/// ```rust
/// use lokale::{tct, Element};
///
/// let node = tct!("Open [link:the issue] or [strong:ignore] it",
///     link = Element::new("a").attr("href", "/issues/1"),
///     strong = Element::new("strong"),
/// );
/// assert_eq!(node.text_content(), "Open the issue or ignore it");
/// ```
#[macro_export]
macro_rules! tct {
    ($template:expr $(,)?) => {
        $crate::global::tct($template, &$crate::ComponentMap::new())
    };
    ($template:expr, $($name:ident = $component:expr),+ $(,)?) => {
        $crate::global::tct(
            $template,
            &$crate::ComponentMap::new()$(.with(stringify!($name), $component))+,
        )
    };
}
