//! Tag endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Tag, TagRepo, TagWithCount};
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::NewTag;

/// Create tag request
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Tag response
#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: String,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            slug: t.slug,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// Tag response with the number of linked blogs
#[derive(Debug, Serialize)]
pub struct TagWithCountResponse {
    #[serde(flatten)]
    pub tag: TagResponse,
    pub blog_count: i64,
}

impl From<TagWithCount> for TagWithCountResponse {
    fn from(t: TagWithCount) -> Self {
        Self {
            tag: TagResponse::from(t.tag),
            blog_count: t.blog_count,
        }
    }
}

/// GET /tags - every tag by name, with blog counts
async fn list_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TagWithCountResponse>>, ApiError> {
    let tags = TagRepo::new(&state.pool).list().await?;
    Ok(Json(tags.into_iter().map(TagWithCountResponse::from).collect()))
}

/// POST /tags - create a tag
async fn create_tag(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let new = NewTag::new(req.name.as_deref(), req.slug.as_deref())?;
    let tag = TagRepo::new(&state.pool).create(&new).await?;

    Ok((StatusCode::CREATED, Json(TagResponse::from(tag))))
}

/// Tag routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/tags", get(list_tags).post(create_tag))
}
