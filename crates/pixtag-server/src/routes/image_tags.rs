//! Image tag CRUD route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::AppError;

/// Tag response.
#[derive(Debug, Serialize)]
pub struct ImageTagResponse {
    pub id: i64,
    pub name: String,
}

impl ImageTagResponse {
    fn from_model(tag: &pixtag_db::models::ImageTag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}

/// Request body for creating one tag.
#[derive(Debug, Deserialize)]
pub struct RegisterImageTagRequest {
    pub name: String,
}

/// Request body for creating several tags at once.
#[derive(Debug, Deserialize)]
pub struct RegisterImageTagsRequest {
    pub names: Vec<String>,
}

/// Response carrying the ids of bulk-registered tags, in input order.
#[derive(Debug, Serialize)]
pub struct RegisterImageTagsResponse {
    pub ids: Vec<i64>,
}

/// Request body for deleting several tags at once.
#[derive(Debug, Deserialize)]
pub struct DeleteImageTagsRequest {
    pub ids: Vec<i64>,
}

/// GET /image-tags
pub async fn list_image_tags(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ImageTagResponse>>, AppError> {
    let tags = ctx.image_tags.list.exec()?;
    Ok(Json(tags.iter().map(ImageTagResponse::from_model).collect()))
}

/// GET /image-tags/{id}
pub async fn get_image_tag(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<ImageTagResponse>, AppError> {
    let tag = ctx.image_tags.get.exec(id)?;
    Ok(Json(ImageTagResponse::from_model(&tag)))
}

/// POST /image-tags
pub async fn register_image_tag(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterImageTagRequest>,
) -> Result<Json<ImageTagResponse>, AppError> {
    if req.name.is_empty() {
        return Err(pixtag_core::Error::Validation("name is required".into()).into());
    }

    let tag = ctx.image_tags.register.exec(&req.name)?;
    Ok(Json(ImageTagResponse::from_model(&tag)))
}

/// DELETE /image-tags/{id}
pub async fn delete_image_tag(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    ctx.image_tags.delete.exec(id)?;
    Ok(Json(json!({"status": "image tag deleted successfully"})))
}

/// POST /image-tags/batch
pub async fn register_image_tags(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterImageTagsRequest>,
) -> Result<Json<RegisterImageTagsResponse>, AppError> {
    if req.names.is_empty() {
        return Err(pixtag_core::Error::Validation("names is required".into()).into());
    }

    let ids = ctx.image_tags.register_many.exec(&req.names)?;
    Ok(Json(RegisterImageTagsResponse { ids }))
}

/// DELETE /image-tags/batch
pub async fn delete_image_tags(
    State(ctx): State<AppContext>,
    Json(req): Json<DeleteImageTagsRequest>,
) -> Result<Json<Value>, AppError> {
    if req.ids.is_empty() {
        return Err(pixtag_core::Error::Validation("ids is required".into()).into());
    }

    ctx.image_tags.delete_many.exec(&req.ids)?;
    Ok(Json(json!({"status": "image tags deleted successfully"})))
}
