//! Blog <-> tag links
//!
//! Not a repository of its own: the blog repository reads through
//! [`BLOG_WITH_TAGS_SELECT`] and links tags with [`link_tags`] when a blog is
//! created.

use futures::future::join_all;
use sqlx::PgPool;
use uuid::Uuid;

use super::{DbError, TagRepo};
use crate::models::TagName;

/// Blog columns plus the blog's tag names, ordered by name.
///
/// Callers append a WHERE clause and must finish with `GROUP BY b.id`.
pub(crate) const BLOG_WITH_TAGS_SELECT: &str = r#"
    SELECT
        b.id,
        b.title,
        b.slug,
        b.content,
        b.summary,
        b.header,
        b.published,
        b.created_at,
        b.updated_at,
        COALESCE(
            array_agg(t.name ORDER BY t.name) FILTER (WHERE t.id IS NOT NULL),
            '{}'
        ) AS tags
    FROM blog b
    LEFT JOIN blog_tag bt ON bt.blog_id = b.id
    LEFT JOIN tag t ON t.id = bt.tag_id
"#;

/// Link a blog to a tag. Returns false when the pair already existed.
pub async fn attach(pool: &PgPool, blog_id: Uuid, tag_id: Uuid) -> Result<bool, DbError> {
    let result = sqlx::query(
        r#"
        INSERT INTO blog_tag (blog_id, tag_id)
        VALUES ($1, $2)
        ON CONFLICT (blog_id, tag_id) DO NOTHING
        "#,
    )
    .bind(blog_id)
    .bind(tag_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Resolve each name to a tag (creating it if needed) and link it to the blog.
///
/// All upsert+link pairs run concurrently and every one is awaited, even
/// after a failure. The first error in input order is returned; links that
/// did succeed are left in place. Returns the number of new links.
pub async fn link_tags(pool: &PgPool, blog_id: Uuid, names: &[TagName]) -> Result<usize, DbError> {
    let outcomes = join_all(names.iter().map(|name| async move {
        let tag = TagRepo::new(pool).get_or_create(name).await?;
        attach(pool, blog_id, tag.id).await
    }))
    .await;

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    if failed > 0 {
        tracing::warn!(
            %blog_id,
            failed,
            attempted = names.len(),
            "some tag links failed; blog keeps the links that succeeded"
        );
    }

    let mut linked = 0;
    for outcome in outcomes {
        if outcome? {
            linked += 1;
        }
    }

    Ok(linked)
}
