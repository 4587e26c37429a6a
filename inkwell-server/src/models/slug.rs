//! Slug validation and derivation
//!
//! Slugs are the human-readable unique keys of blogs and tags. The store's
//! unique constraints are the authority on uniqueness; this type only checks
//! that a slug can live in a URL path segment.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ValidationError;

/// Maximum length for slugs
const MAX_SLUG_LEN: usize = 200;

/// No whitespace and no characters that would split a path segment.
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s/?#]+$").expect("invalid slug regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Validated slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug from user input.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Non-empty, max 200 characters
    /// - No internal whitespace, `/`, `?` or `#`
    ///
    /// # Example
    /// ```
    /// use inkwell_server::models::Slug;
    ///
    /// assert!(Slug::new("hello-world").is_ok());
    /// assert!(Slug::new("hello world").is_err());
    /// assert!(Slug::new("a/b").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "slug" });
        }

        if trimmed.chars().count() > MAX_SLUG_LEN {
            return Err(ValidationError::TooLong {
                field: "slug",
                max: MAX_SLUG_LEN,
            });
        }

        if !SLUG_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "slug",
                reason: "must not contain whitespace, '/', '?' or '#'",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Derive a slug from a tag name: lowercase, whitespace runs collapsed to
    /// a single hyphen. The name is expected to be trimmed already.
    pub fn derive(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        Self(WHITESPACE_RE.replace_all(&lowered, "-").into_owned())
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        assert!(Slug::new("intro").is_ok());
        assert!(Slug::new("my-first_post-2024").is_ok());
        assert!(Slug::new("rust-入门").is_ok());
        assert_eq!(Slug::new("  padded ").unwrap().as_str(), "padded");
    }

    #[test]
    fn rejects_empty() {
        let err = Slug::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "slug" }));
    }

    #[test]
    fn rejects_path_breaking_characters() {
        for bad in ["two words", "a/b", "what?", "frag#ment", "tab\tbed"] {
            let err = Slug::new(bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn max_length() {
        assert!(Slug::new(&"a".repeat(200)).is_ok());
        let err = Slug::new(&"a".repeat(201)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 200, .. }));
    }

    #[test]
    fn derive_lowercases_and_hyphenates() {
        assert_eq!(Slug::derive("Go").as_str(), "go");
        assert_eq!(Slug::derive("Machine   Learning").as_str(), "machine-learning");
        assert_eq!(Slug::derive("web\tdev ops").as_str(), "web-dev-ops");
        assert_eq!(Slug::derive("go ").as_str(), "go");
    }
}
