//! Blog endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::db::repos::{Blog, BlogRepo, BlogWithTags};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery};
use crate::http::server::AppState;
use crate::models::{
    BlogContent, BlogPatch, BlogTitle, NewBlog, Paginated, Pagination, Slug, ValidationError,
};

/// Query parameters for GET /blogs
#[derive(Debug, Default, Deserialize)]
pub struct ListBlogsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Anything but the literal `false` lists published blogs
    pub published: Option<String>,
    pub tag: Option<String>,
}

impl ListBlogsParams {
    fn published(&self) -> bool {
        self.published.as_deref() != Some("false")
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }
}

/// Create blog request
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub header: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

impl TryFrom<CreateBlogRequest> for NewBlog {
    type Error = ValidationError;

    fn try_from(req: CreateBlogRequest) -> Result<Self, Self::Error> {
        NewBlog::new(
            req.title.as_deref(),
            req.slug.as_deref(),
            req.content.as_deref(),
        )?
        .with_summary(req.summary)
        .with_header(req.header)
        .with_published(req.published.unwrap_or(true))
        .with_tags(req.tags.as_deref().unwrap_or_default())
    }
}

/// Update blog request; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub header: Option<Option<String>>,
    pub published: Option<bool>,
}

/// Marks a field that appeared in the body, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TryFrom<UpdateBlogRequest> for BlogPatch {
    type Error = ValidationError;

    fn try_from(req: UpdateBlogRequest) -> Result<Self, Self::Error> {
        Ok(BlogPatch {
            title: req.title.as_deref().map(BlogTitle::new).transpose()?,
            slug: req.slug.as_deref().map(Slug::new).transpose()?,
            content: req.content.as_deref().map(BlogContent::new).transpose()?,
            summary: req.summary,
            header: req.header,
            published: req.published,
        })
    }
}

/// Blog response
#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub header: Option<String>,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Blog> for BlogResponse {
    fn from(b: Blog) -> Self {
        Self {
            id: b.id,
            title: b.title,
            slug: b.slug,
            content: b.content,
            summary: b.summary,
            header: b.header,
            published: b.published,
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

/// Blog response with tag names
#[derive(Debug, Serialize)]
pub struct BlogWithTagsResponse {
    #[serde(flatten)]
    pub blog: BlogResponse,
    pub tags: Vec<String>,
}

impl From<BlogWithTags> for BlogWithTagsResponse {
    fn from(b: BlogWithTags) -> Self {
        Self {
            blog: BlogResponse::from(b.blog),
            tags: b.tags,
        }
    }
}

/// Page metadata for blog listings
#[derive(Debug, Serialize)]
pub struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// GET /blogs response
#[derive(Debug, Serialize)]
pub struct BlogListResponse {
    pub blogs: Vec<BlogWithTagsResponse>,
    pub pagination: PaginationResponse,
}

impl From<Paginated<BlogWithTags>> for BlogListResponse {
    fn from(page: Paginated<BlogWithTags>) -> Self {
        let pagination = PaginationResponse {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages(),
        };

        Self {
            blogs: page.map(BlogWithTagsResponse::from).items,
            pagination,
        }
    }
}

/// GET /blogs - newest first, optionally filtered by tag name
async fn list_blogs(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListBlogsParams>,
) -> Result<Json<BlogListResponse>, ApiError> {
    let page = Pagination::from_params(params.page, params.limit);
    let result = BlogRepo::new(&state.pool)
        .list(page, params.published(), params.tag())
        .await?;

    Ok(Json(BlogListResponse::from(result)))
}

/// POST /blogs - create a blog and its tag links
async fn create_blog(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogWithTagsResponse>), ApiError> {
    let new = NewBlog::try_from(req)?;
    let repo = BlogRepo::new(&state.pool);

    // Fast path only; the unique constraint still decides under races.
    if repo.exists(new.slug.as_str()).await? {
        return Err(ApiError::Conflict {
            message: "a blog with this slug already exists",
        });
    }

    let blog = repo.create(&new).await?;
    tracing::info!(
        slug = %blog.blog.slug,
        published = blog.blog.published,
        tags = blog.tags.len(),
        "blog created"
    );

    Ok((StatusCode::CREATED, Json(BlogWithTagsResponse::from(blog))))
}

/// GET /blogs/{slug} - a single published blog
async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<BlogWithTagsResponse>, ApiError> {
    let blog = BlogRepo::new(&state.pool).get_by_slug(&slug).await?;
    Ok(Json(BlogWithTagsResponse::from(blog)))
}

/// PUT /blogs/{slug} - partial update
async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    ApiJson(req): ApiJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, ApiError> {
    let patch = BlogPatch::try_from(req)?;
    let blog = BlogRepo::new(&state.pool).update(&slug, &patch).await?;
    Ok(Json(BlogResponse::from(blog)))
}

/// DELETE /blogs/{slug}
async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    BlogRepo::new(&state.pool).delete(&slug).await?;
    tracing::info!(%slug, "blog deleted");

    Ok(Json(serde_json::json!({
        "message": "Blog deleted successfully"
    })))
}

/// Blog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route(
            "/blogs/{slug}",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}
