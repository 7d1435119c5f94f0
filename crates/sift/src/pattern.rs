//! Wildcard patterns for the like family.
//!
//! Patterns use the where-clause wildcards: `%` matches any run of characters
//! (including none) and `_` matches exactly one character. Keywords are NOT
//! escaped when a pattern is built from them, so wildcards typed by a user
//! keep their wildcard meaning. Keep that in mind when keywords come from
//! untrusted input.

use std::fmt;

use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Any run of characters.
pub const MULTI_WILDCARD: char = '%';
/// Exactly one character.
pub const SINGLE_WILDCARD: char = '_';

/// Floor for the compiled size of a pattern, matching the `regex` default.
const MIN_SIZE_LIMIT: usize = 10 * (1 << 20);
/// Compiled bytes allowed per byte of translated pattern.
const SIZE_PER_PATTERN_BYTE: usize = 256;

/// A like pattern and its lazily compiled matcher.
///
/// ```
/// use sift::LikePattern;
///
/// assert_eq!(LikePattern::contains("r").as_str(), "%r%");
/// assert_eq!(LikePattern::ends_with("s").as_str(), "%s");
/// assert_eq!(LikePattern::starts_with("R").as_str(), "R%");
///
/// assert!(LikePattern::starts_with("R").is_match("Ross").unwrap());
/// assert!(!LikePattern::starts_with("R").is_match("Carol").unwrap());
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LikePattern {
    pattern: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    compiled: OnceCell<Regex>,
}

impl LikePattern {
    /// Wraps a raw pattern as-is.
    pub fn new(pattern: impl Into<String>) -> Self {
        LikePattern {
            pattern: pattern.into(),
            compiled: OnceCell::new(),
        }
    }

    /// `%keyword%`: keyword anywhere in the text.
    pub fn contains(keyword: &str) -> Self {
        Self::new(format!("{MULTI_WILDCARD}{keyword}{MULTI_WILDCARD}"))
    }

    /// `%keyword`: text ends with the keyword.
    pub fn ends_with(keyword: &str) -> Self {
        Self::new(format!("{MULTI_WILDCARD}{keyword}"))
    }

    /// `keyword%`: text starts with the keyword.
    pub fn starts_with(keyword: &str) -> Self {
        Self::new(format!("{keyword}{MULTI_WILDCARD}"))
    }

    /// Returns the raw pattern.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Tests the whole of `text` against the pattern. Case-sensitive.
    ///
    /// The compile size budget grows with the pattern, so long keywords
    /// evaluate like short ones.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        let regex = self.compiled.get_or_try_init(|| compile(&self.pattern))?;
        Ok(regex.is_match(text))
    }
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let translated = translate(pattern);
    let limit = translated
        .len()
        .saturating_mul(SIZE_PER_PATTERN_BYTE)
        .max(MIN_SIZE_LIMIT);
    RegexBuilder::new(&translated).size_limit(limit).build()
}

/// Translates a like pattern into an anchored regular expression.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            MULTI_WILDCARD => out.push_str(".*"),
            SINGLE_WILDCARD => out.push('.'),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl fmt::Debug for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LikePattern").field(&self.pattern).finish()
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.pattern.replace('\'', "''"))
    }
}
