//! Blog input validation
//!
//! `NewBlog` is what the blog repository inserts; `BlogPatch` is a partial
//! update where every field distinguishes "not provided" from a provided value.

use super::tag::normalize_tag_names;
use super::validation::require;
use super::{Slug, TagName, ValidationError};

/// Maximum length for blog titles
const MAX_TITLE_LEN: usize = 256;

/// Validated blog title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogTitle(String);

impl BlogTitle {
    /// Create a new blog title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 256 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Blog body. Stored verbatim; only a blank body is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogContent(String);

impl BlogContent {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated input for creating a blog
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: BlogTitle,
    pub slug: Slug,
    pub content: BlogContent,
    pub summary: Option<String>,
    pub header: Option<String>,
    pub published: bool,
    /// De-duplicated by derived slug, in submission order
    pub tags: Vec<TagName>,
}

impl NewBlog {
    /// Title, slug and content are required; the blog is published unless
    /// told otherwise and carries no tags.
    ///
    /// # Example
    /// ```
    /// use inkwell_server::models::NewBlog;
    ///
    /// let blog = NewBlog::new(Some("Intro"), Some("intro"), Some("hello")).unwrap();
    /// assert!(blog.published);
    /// assert!(NewBlog::new(Some(""), Some("intro"), Some("hello")).is_err());
    /// ```
    pub fn new(
        title: Option<&str>,
        slug: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let title = BlogTitle::new(require(title, "title")?)?;
        let slug = Slug::new(require(slug, "slug")?)?;
        let content = BlogContent::new(require(content, "content")?)?;

        Ok(Self {
            title,
            slug,
            content,
            summary: None,
            header: None,
            published: true,
            tags: Vec::new(),
        })
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Attach tags, normalising the submitted names.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Result<Self, ValidationError> {
        self.tags = normalize_tag_names(tags)?;
        Ok(self)
    }
}

/// Partial blog update.
///
/// `None` leaves a column untouched. For the nullable columns the inner
/// option is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<BlogTitle>,
    pub slug: Option<Slug>,
    pub content: Option<BlogContent>,
    pub summary: Option<Option<String>>,
    pub header: Option<Option<String>>,
    pub published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blog_defaults() {
        let blog = NewBlog::new(Some("Intro"), Some("intro"), Some("hello")).unwrap();
        assert_eq!(blog.title.as_str(), "Intro");
        assert_eq!(blog.slug.as_str(), "intro");
        assert_eq!(blog.content.as_str(), "hello");
        assert!(blog.published);
        assert!(blog.tags.is_empty());
        assert!(blog.summary.is_none());
    }

    #[test]
    fn new_blog_requires_title_slug_content() {
        let err = NewBlog::new(Some(""), Some("intro"), Some("hello")).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "title" });

        let err = NewBlog::new(Some("Intro"), None, Some("hello")).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "slug" });

        let err = NewBlog::new(Some("Intro"), Some("intro"), Some("")).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "content" });
    }

    #[test]
    fn content_is_stored_verbatim() {
        let content = BlogContent::new("  # Heading\n\nbody\n").unwrap();
        assert_eq!(content.as_str(), "  # Heading\n\nbody\n");
    }

    #[test]
    fn title_too_long() {
        let err = BlogTitle::new(&"x".repeat(257)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));
    }

    #[test]
    fn builder_sets_optional_fields() {
        let blog = NewBlog::new(Some("Intro"), Some("intro"), Some("hello"))
            .unwrap()
            .with_summary(Some("short".into()))
            .with_header(Some("/img/cover.png".into()))
            .with_published(false)
            .with_tags(&["go", "go "])
            .unwrap();

        assert_eq!(blog.summary.as_deref(), Some("short"));
        assert_eq!(blog.header.as_deref(), Some("/img/cover.png"));
        assert!(!blog.published);
        assert_eq!(blog.tags.len(), 1);
        assert_eq!(blog.tags[0].as_str(), "go");
    }
}
