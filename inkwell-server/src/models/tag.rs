//! Tag name validation and request-level tag list normalisation

use std::collections::HashSet;

use super::validation::require;
use super::{Slug, ValidationError};

/// Maximum length for tag names
const MAX_TAG_NAME_LEN: usize = 64;

/// Validated tag name (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a tag name.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Non-empty, max 64 characters
    ///
    /// # Example
    /// ```
    /// use inkwell_server::models::TagName;
    ///
    /// assert_eq!(TagName::new("go ").unwrap().as_str(), "go");
    /// assert!(TagName::new("  ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "tag name" });
        }

        if trimmed.chars().count() > MAX_TAG_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "tag name",
                max: MAX_TAG_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Slug derived from this name.
    pub fn slug(&self) -> Slug {
        Slug::derive(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalise the tag list submitted with a new blog.
///
/// Blank entries are dropped and names whose derived slug was already seen
/// are skipped, so `["go", "go ", "Go"]` resolves to a single `go`.
pub fn normalize_tag_names<S: AsRef<str>>(raw: &[S]) -> Result<Vec<TagName>, ValidationError> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(raw.len());

    for name in raw {
        if name.as_ref().trim().is_empty() {
            continue;
        }
        let name = TagName::new(name.as_ref())?;
        if seen.insert(name.slug()) {
            names.push(name);
        }
    }

    Ok(names)
}

/// Validated input for an explicit tag create
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: TagName,
    pub slug: Slug,
}

impl NewTag {
    /// Both name and slug are required.
    pub fn new(name: Option<&str>, slug: Option<&str>) -> Result<Self, ValidationError> {
        let name = TagName::new(require(name, "tag name")?)?;
        let slug = Slug::new(require(slug, "slug")?)?;
        Ok(Self { name, slug })
    }
}
