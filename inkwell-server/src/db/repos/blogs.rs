//! Blog repository
//!
//! - list: one COUNT query plus one aggregated page query (no N+1)
//! - create: INSERT, then concurrent tag upsert+link, then read back
//! - update: dynamic SET list built from the provided fields only
//! - delete: the store cascades the blog's tag links

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::associations::{self, BLOG_WITH_TAGS_SELECT};
use super::DbError;
use crate::models::{BlogPatch, NewBlog, Paginated, Pagination};

const BLOG_COLUMNS: &str =
    "id, title, slug, content, summary, header, published, created_at, updated_at";

/// Blog record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub header: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Blog with its tag names (ordered by name), assembled per read
#[derive(Debug, Clone, FromRow)]
pub struct BlogWithTags {
    #[sqlx(flatten)]
    pub blog: Blog,
    pub tags: Vec<String>,
}

/// Blog repository
pub struct BlogRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List blogs by publication state, newest first.
    ///
    /// With `tag`, only blogs linked to a tag of exactly that name are
    /// counted and returned; each still carries its full tag list. A page
    /// past the end is empty, and `total` is still the full match count.
    pub async fn list(
        &self,
        page: Pagination,
        published: bool,
        tag: Option<&str>,
    ) -> Result<Paginated<BlogWithTags>, DbError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blog b");
        push_filters(&mut count, published, tag);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new(BLOG_WITH_TAGS_SELECT);
        push_filters(&mut query, published, tag);
        query
            .push(" GROUP BY b.id ORDER BY b.created_at DESC, b.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let items = query
            .build_query_as::<BlogWithTags>()
            .fetch_all(self.pool)
            .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    /// Get a published blog by slug. Drafts are invisible here.
    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogWithTags, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(BLOG_WITH_TAGS_SELECT);
        query
            .push(" WHERE b.slug = ")
            .push_bind(slug)
            .push(" AND b.published GROUP BY b.id");

        query
            .build_query_as::<BlogWithTags>()
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("blog", slug))
    }

    /// Whether any blog, published or not, uses this slug.
    pub async fn exists(&self, slug: &str) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM blog WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool)
            .await?;

        Ok(exists)
    }

    /// Create a blog and link its tags.
    ///
    /// The blog row and the tag links are separate statements; a failing
    /// link returns its error but the blog row stays. A taken slug surfaces
    /// as [`DbError::Conflict`] from the store's unique constraint.
    pub async fn create(&self, new: &NewBlog) -> Result<BlogWithTags, DbError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"
            INSERT INTO blog (title, slug, content, summary, header, published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(new.title.as_str())
        .bind(new.slug.as_str())
        .bind(new.content.as_str())
        .bind(new.summary.as_deref())
        .bind(new.header.as_deref())
        .bind(new.published)
        .fetch_one(self.pool)
        .await?;

        let linked = associations::link_tags(self.pool, blog.id, &new.tags).await?;
        tracing::debug!(slug = %blog.slug, linked, "blog created");

        self.get_by_id(blog.id).await
    }

    /// Apply the provided fields to the blog with this slug.
    ///
    /// Drafts are matched too. `updated_at` is always bumped.
    pub async fn update(&self, slug: &str, patch: &BlogPatch) -> Result<Blog, DbError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE blog SET updated_at = NOW()");

        if let Some(title) = &patch.title {
            query.push(", title = ").push_bind(title.as_str());
        }
        if let Some(new_slug) = &patch.slug {
            query.push(", slug = ").push_bind(new_slug.as_str());
        }
        if let Some(content) = &patch.content {
            query.push(", content = ").push_bind(content.as_str());
        }
        if let Some(summary) = &patch.summary {
            query.push(", summary = ").push_bind(summary.as_deref());
        }
        if let Some(header) = &patch.header {
            query.push(", header = ").push_bind(header.as_deref());
        }
        if let Some(published) = patch.published {
            query.push(", published = ").push_bind(published);
        }

        query
            .push(" WHERE slug = ")
            .push_bind(slug)
            .push(" RETURNING ")
            .push(BLOG_COLUMNS);

        query
            .build_query_as::<Blog>()
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("blog", slug))
    }

    /// Delete the blog with this slug; its tag links go with it.
    pub async fn delete(&self, slug: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM blog WHERE slug = $1")
            .bind(slug)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("blog", slug));
        }

        Ok(())
    }

    /// Get a blog by id regardless of publication state.
    pub async fn get_by_id(&self, id: Uuid) -> Result<BlogWithTags, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(BLOG_WITH_TAGS_SELECT);
        query.push(" WHERE b.id = ").push_bind(id).push(" GROUP BY b.id");

        query
            .build_query_as::<BlogWithTags>()
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("blog", id.to_string()))
    }
}

fn push_filters<'q>(query: &mut QueryBuilder<'q, Postgres>, published: bool, tag: Option<&'q str>) {
    query.push(" WHERE b.published = ").push_bind(published);

    if let Some(tag) = tag {
        query
            .push(
                " AND EXISTS (SELECT 1 FROM blog_tag ft JOIN tag f ON f.id = ft.tag_id \
                 WHERE ft.blog_id = b.id AND f.name = ",
            )
            .push_bind(tag)
            .push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_without_tag() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blog b");
        push_filters(&mut query, true, None);
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM blog b WHERE b.published = $1");
    }

    #[test]
    fn filters_with_tag_use_exists() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blog b");
        push_filters(&mut query, false, Some("rust"));
        let sql = query.sql();
        assert!(sql.contains("b.published = $1"));
        assert!(sql.contains("AND EXISTS ("));
        assert!(sql.contains("f.name = $2)"));
    }
}
