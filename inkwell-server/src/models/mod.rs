//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod slug;
pub mod blog;
pub mod tag;
pub mod pagination;

pub use validation::ValidationError;
pub use slug::Slug;
pub use blog::{BlogContent, BlogPatch, BlogTitle, NewBlog};
pub use tag::{normalize_tag_names, NewTag, TagName};
pub use pagination::{Paginated, Pagination};
