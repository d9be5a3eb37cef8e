//! Identifier formatting.
//!
//! Converts abstract, word-delimited names from the API model into
//! identifiers that are safe in the target ecosystem. Formatting is a pure
//! function of the name, the case style and the profile, and never fails:
//! any input produces some identifier.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::naming::IdentifierFormatter;
//! use apigen_codegen::profile::{CaseStyle, TypeProfile};
//!
//! let profile = TypeProfile::builtin("objc").unwrap();
//! let names = IdentifierFormatter::new(&profile);
//!
//! assert_eq!(names.format("list_folder", CaseStyle::LowerCamel), "listFolder");
//! assert_eq!(names.format("description", CaseStyle::LowerCamel), "description_");
//! assert_eq!(names.format("copy_ref", CaseStyle::LowerCamel), "theCopyRef");
//! ```

use crate::profile::{CaseStyle, TypeProfile};

/// Splits a name into words.
///
/// Words break at any non-alphanumeric character, at lower-to-upper
/// transitions, before the last capital of an acronym followed by a
/// lowercase letter, and between digits and letters. Empty words are
/// dropped.
///
/// # Examples
///
/// ```
/// use apigen_codegen::naming::split_words;
///
/// assert_eq!(split_words("get_HTTPResponse-v2"), ["get", "HTTP", "Response", "v", "2"]);
/// assert!(split_words("__").is_empty());
/// ```
#[must_use]
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
    {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let acronym_end = prev.is_uppercase()
                && cur.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || acronym_end
                || prev.is_numeric() != cur.is_numeric();
            if boundary {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        words.push(chars[start..].iter().collect());
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Formats names under a profile's reserved-word and reserved-prefix rules.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierFormatter<'p> {
    profile: &'p TypeProfile,
}

impl<'p> IdentifierFormatter<'p> {
    /// Creates a formatter for `profile`.
    #[must_use]
    pub const fn new(profile: &'p TypeProfile) -> Self {
        Self { profile }
    }

    /// The profile this formatter applies.
    #[must_use]
    pub const fn profile(&self) -> &'p TypeProfile {
        self.profile
    }

    /// Formats `name` in `style`, escaping reserved words and prefixes.
    ///
    /// A result equal to a reserved word gains the profile's escape suffix
    /// (repeatedly, until it no longer collides). A result starting with a
    /// reserved prefix gets the profile's lead word injected in front.
    #[must_use]
    pub fn format(&self, name: &str, style: CaseStyle) -> String {
        let mut ident = self.format_unescaped(name, style);

        if self.profile.reserved_prefix_of(&ident).is_some() {
            ident = self.inject_lead_word(&ident, style);
        }
        while self.profile.is_reserved_word(&ident) {
            ident.push_str(&self.profile.escape_suffix);
        }
        ident
    }

    /// Formats `name` in `style` without reserved-word handling.
    ///
    /// Used for names that only appear inside a larger identifier, such as
    /// the example part of a test method name.
    #[must_use]
    pub fn format_unescaped(&self, name: &str, style: CaseStyle) -> String {
        let words = split_words(name);
        let mut ident = match style {
            CaseStyle::LowerCamel => words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    if i == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect::<String>(),
            CaseStyle::UpperCamel => words.iter().map(|word| capitalize(word)).collect(),
            CaseStyle::Snake => words
                .iter()
                .map(|word| word.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
        };

        if ident.is_empty() {
            ident.push('_');
        } else if ident.starts_with(|c: char| c.is_numeric()) {
            ident.insert(0, '_');
        }
        ident
    }

    /// Formats a field, variable or function name in the profile's field case.
    #[must_use]
    pub fn field(&self, name: &str) -> String {
        self.format(name, self.profile.field_case)
    }

    /// Formats a type or namespace name in upper camel case.
    #[must_use]
    pub fn type_name(&self, name: &str) -> String {
        self.format(name, CaseStyle::UpperCamel)
    }

    fn inject_lead_word(&self, ident: &str, style: CaseStyle) -> String {
        let lead = &self.profile.prefix_lead_word;
        match style {
            CaseStyle::LowerCamel => format!("{}{}", lead.to_lowercase(), upper_first(ident)),
            CaseStyle::UpperCamel => format!("{}{ident}", capitalize(lead)),
            CaseStyle::Snake => format!("{}_{ident}", lead.to_lowercase()),
        }
    }
}
