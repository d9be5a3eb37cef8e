//! Documentation reference rewriting.
//!
//! Free-text documentation may embed references such as ``:field:`path` ``
//! or ``:route:`list_folder` ``. Each reference is handed to an injected
//! [`DocRefResolver`], which returns the inline text to put in its place.

use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

static DOC_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":(?P<tag>[A-Za-z_]+):`(?P<value>[^`]*)`").expect("valid regex")
});

/// Rewrites one documentation reference.
pub trait DocRefResolver: Send + Sync {
    /// Returns the replacement text for reference `tag` with `value`.
    fn resolve(&self, tag: &str, value: &str) -> String;
}

impl<F> DocRefResolver for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn resolve(&self, tag: &str, value: &str) -> String {
        self(tag, value)
    }
}

/// Resolver that keeps the referenced value and drops the tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl DocRefResolver for PassThrough {
    fn resolve(&self, _tag: &str, value: &str) -> String {
        value.to_string()
    }
}

impl fmt::Debug for dyn DocRefResolver + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DocRefResolver")
    }
}

/// Replaces every reference in `doc` with the resolver's output.
///
/// # Examples
///
/// ```
/// use apigen_codegen::docs::{process_doc, PassThrough};
///
/// let doc = "Returns :field:`entries` of the :route:`list_folder` call.";
/// assert_eq!(process_doc(doc, &PassThrough), "Returns entries of the list_folder call.");
///
/// let quoted = |_tag: &str, value: &str| format!("`{value}`");
/// assert_eq!(process_doc(":type:`Metadata`", &quoted), "`Metadata`");
/// ```
#[must_use]
pub fn process_doc(doc: &str, resolver: &dyn DocRefResolver) -> String {
    DOC_REF_REGEX
        .replace_all(doc, |caps: &Captures<'_>| {
            resolver.resolve(&caps["tag"], &caps["value"])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_without_references_is_unchanged() {
        let doc = "Plain text with `code` and a: colon.";
        assert_eq!(process_doc(doc, &PassThrough), doc);
    }

    #[test]
    fn test_resolver_sees_tag_and_value() {
        let tagged = |tag: &str, value: &str| format!("<{tag}={value}>");
        assert_eq!(
            process_doc(":field:`path` and :link:`docs https://x`", &tagged),
            "<field=path> and <link=docs https://x>"
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(process_doc("a :val:`` b", &PassThrough), "a  b");
    }
}
