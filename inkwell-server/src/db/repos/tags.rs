//! Tag repository
//!
//! - list: LEFT JOIN with link count (no N+1), orphaned tags included
//! - create: plain INSERT, duplicates surface as conflicts
//! - get_or_create: upsert keyed on name, falling back to the slug owner

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::{NewTag, TagName};

/// Unique constraint on `tag.slug`.
const TAG_SLUG_CONSTRAINT: &str = "tag_slug_key";

/// Tag record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Tag with the number of blogs linked to it
#[derive(Debug, Clone, FromRow)]
pub struct TagWithCount {
    #[sqlx(flatten)]
    pub tag: Tag,
    pub blog_count: i64,
}

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every tag by name with its blog count.
    pub async fn list(&self) -> Result<Vec<TagWithCount>, DbError> {
        let tags = sqlx::query_as::<_, TagWithCount>(
            r#"
            SELECT
                t.id,
                t.name,
                t.slug,
                t.created_at,
                COUNT(bt.id) AS blog_count
            FROM tag t
            LEFT JOIN blog_tag bt ON bt.tag_id = t.id
            GROUP BY t.id
            ORDER BY t.name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(tags)
    }

    /// Insert a new tag. Duplicate name or slug is a conflict, not an upsert.
    pub async fn create(&self, new: &NewTag) -> Result<Tag, DbError> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tag (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, created_at
            "#,
        )
        .bind(new.name.as_str())
        .bind(new.slug.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(tag)
    }

    /// Return the tag for this name, creating it if absent (idempotent).
    ///
    /// The no-op `DO UPDATE` makes RETURNING yield the existing row, so two
    /// concurrent callers with the same name both get the one stored tag.
    /// A spelling that only differs in case or spacing ("Rust" vs "rust")
    /// derives a slug that is already taken; that tag is reused as is.
    pub async fn get_or_create(&self, name: &TagName) -> Result<Tag, DbError> {
        let slug = name.slug();
        let upserted = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tag (name, slug)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, slug, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(slug.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(DbError::from);

        match upserted {
            Err(DbError::Conflict { constraint }) if constraint == TAG_SLUG_CONSTRAINT => {
                tracing::debug!(name = name.as_str(), slug = %slug, "reusing tag with same slug");
                self.get_by_slug(slug.as_str()).await
            }
            other => other,
        }
    }

    /// Get a tag by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Tag, DbError> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, slug, created_at
            FROM tag
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("tag", slug))
    }
}
