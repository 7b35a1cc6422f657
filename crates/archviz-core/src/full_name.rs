//! Structure of fully qualified names.
//!
//! `.` separates packages, `$` separates a class from its inner classes.
//! All prefix matching in the fold pipeline must be anchored at a separator:
//! `com.tngtech.Foo` is a prefix of `com.tngtech.Foo$Inner`, but
//! `com.tngtech.Fo` is a prefix of neither.

pub const PACKAGE_SEPARATOR: char = '.';
pub const CLASS_SEPARATOR: char = '$';

pub fn is_separator(c: char) -> bool {
    c == PACKAGE_SEPARATOR || c == CLASS_SEPARATOR
}

/// Whether `full` is `prefix` itself or lies beneath it in the name hierarchy.
pub fn is_prefix(prefix: &str, full: &str) -> bool {
    match full.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.chars().next().is_some_and(is_separator),
        None => false,
    }
}

/// The enclosing package or outer class, `None` for a top-level name.
pub fn parent(full: &str) -> Option<&str> {
    full.rfind(is_separator).map(|idx| &full[..idx])
}

/// The last name segment (`com.tngtech.Foo$Inner` -> `Inner`).
pub fn simple_name(full: &str) -> &str {
    full.rfind(is_separator).map_or(full, |idx| &full[idx + 1..])
}

/// Strips `prefix` and its trailing separator from `full`; `full` must lie
/// beneath `prefix`. Returns the empty string when `full == prefix`.
pub fn relative_to<'a>(prefix: &str, full: &'a str) -> &'a str {
    match full.strip_prefix(prefix) {
        Some(rest) => rest.strip_prefix(is_separator).unwrap_or(rest),
        None => full,
    }
}
