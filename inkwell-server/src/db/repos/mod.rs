//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles conflicts via ON CONFLICT or the unique-violation signal
//! - Borrows the shared pool; no repository holds a connection between calls

pub mod associations;
pub mod blogs;
pub mod tags;

pub use blogs::{Blog, BlogRepo, BlogWithTags};
pub use tags::{Tag, TagRepo, TagWithCount};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A unique constraint rejected the write.
    #[error("conflict: unique constraint '{constraint}' violated")]
    Conflict { constraint: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return Self::Conflict {
                    constraint: db.constraint().unwrap_or("unique").to_owned(),
                };
            }
        }
        Self::Sqlx(e)
    }
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_sqlx() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[test]
    fn display() {
        let err = DbError::not_found("blog", "intro");
        assert_eq!(err.to_string(), "not found: blog 'intro'");

        let err = DbError::Conflict {
            constraint: "blog_slug_key".into(),
        };
        assert_eq!(
            err.to_string(),
            "conflict: unique constraint 'blog_slug_key' violated"
        );
    }
}
