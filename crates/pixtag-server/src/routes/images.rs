//! Image route handlers.
//!
//! Upload and delete touch object storage directly from the handler, then
//! hand the persistence side to a use case. Storage failures short-circuit
//! with a handler-built JSON body; use-case failures on the register path
//! fall through to [`AppError`].

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::AppError;

/// Tag projection nested in image responses.
#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

/// Image with its full tag set, as returned from list endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: i64,
    pub image_path: String,
    pub display_flag: bool,
    pub tags: Vec<TagResponse>,
}

impl ImageResponse {
    fn from_model(image: &pixtag_db::models::Image) -> Self {
        Self {
            id: image.id,
            image_path: image.image_path.clone(),
            display_flag: image.display_flag,
            tags: image
                .tags
                .iter()
                .map(|tag| TagResponse {
                    id: tag.id,
                    name: tag.name.clone(),
                })
                .collect(),
        }
    }
}

/// Single-image response. Tags are not included on this path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetailResponse {
    pub id: i64,
    pub image_path: String,
    pub display_flag: bool,
}

/// Result of one upload: DB path plus the externally-reachable URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub path: String,
    pub uploaded_path: String,
}

/// Tag-id filter for the untagged listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntaggedImagesRequest {
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// GET /images
pub async fn list_images(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ImageResponse>>, AppError> {
    let images = ctx.images.list.exec()?;
    Ok(Json(images.iter().map(ImageResponse::from_model).collect()))
}

/// GET /images/{id}
pub async fn get_image(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<ImageDetailResponse>, AppError> {
    let image = ctx.images.get.exec(id)?;
    Ok(Json(ImageDetailResponse {
        id: image.id,
        image_path: image.image_path,
        display_flag: image.display_flag,
    }))
}

/// DELETE /images/{path}
///
/// Storage first, then DB. A storage failure aborts before the DB is
/// touched; a DB failure after a successful storage delete leaves an
/// orphaned DB row (acknowledged inconsistency, surfaced as a distinct
/// error body).
pub async fn delete_image(State(ctx): State<AppContext>, Path(path): Path<String>) -> Response {
    if let Err(e) = ctx.storage.delete_object(&path).await {
        tracing::error!("failed to delete object from storage: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "failed to delete image from storage"})),
        )
            .into_response();
    }

    if let Err(e) = ctx.images.delete.exec(&path) {
        tracing::error!("failed to delete image from database: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "failed to delete image from database"})),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(json!({"status": "image deleted successfully"})),
    )
        .into_response()
}

/// POST /images (multipart field `image`)
pub async fn register_image(State(ctx): State<AppContext>, mut multipart: Multipart) -> Response {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => break field,
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "failed to get file"})),
                )
                    .into_response()
            }
        }
    };

    match process_upload(&ctx, field).await {
        Ok(uploaded) => (StatusCode::OK, Json(uploaded)).into_response(),
        Err(failure) => failure.into_response(),
    }
}

/// POST /images/batch (multipart field `images`, repeated)
///
/// Files are processed sequentially; the first failure aborts the batch and
/// discards partial results. Objects already uploaded are not rolled back.
pub async fn register_images(State(ctx): State<AppContext>, mut multipart: Multipart) -> Response {
    let mut uploaded = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "failed to parse multipart form"})),
                )
                    .into_response()
            }
        };

        if field.name() != Some("images") {
            continue;
        }

        match process_upload(&ctx, field).await {
            Ok(result) => uploaded.push(result),
            Err(failure) => return failure.into_response(),
        }
    }

    if uploaded.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "no files uploaded"})),
        )
            .into_response();
    }

    (StatusCode::OK, Json(uploaded)).into_response()
}

/// POST /images/untagged
pub async fn untagged_images(
    State(ctx): State<AppContext>,
    Json(req): Json<UntaggedImagesRequest>,
) -> Result<Json<Vec<ImageResponse>>, AppError> {
    let images = ctx.images.list_untagged.exec(&req.tag_ids)?;
    Ok(Json(images.iter().map(ImageResponse::from_model).collect()))
}

/// Failure points of the per-file upload pipeline, each with its own body.
enum UploadFailure {
    Read,
    Storage,
    Register(pixtag_core::Error),
}

impl UploadFailure {
    fn into_response(self) -> Response {
        match self {
            UploadFailure::Read => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "failed to read file"})),
            )
                .into_response(),
            UploadFailure::Storage => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "failed to upload to storage"})),
            )
                .into_response(),
            // Registration failures keep their original error shape.
            UploadFailure::Register(e) => AppError::from(e).into_response(),
        }
    }
}

/// Read one multipart file, upload it under a fresh UUID key, and register
/// the key in the database.
async fn process_upload(
    ctx: &AppContext,
    field: Field<'_>,
) -> Result<UploadResponse, UploadFailure> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field.bytes().await.map_err(|_| UploadFailure::Read)?;

    let key = Uuid::new_v4().to_string();

    ctx.storage
        .put_object(&key, data, &content_type)
        .await
        .map_err(|e| {
            tracing::error!("failed to upload file to storage: {e}");
            UploadFailure::Storage
        })?;

    let uploaded_path = format!(
        "{}/{}/{}",
        ctx.config.storage.endpoint_external, ctx.config.storage.bucket, key
    );

    let path = ctx
        .images
        .register
        .exec(&key)
        .map_err(UploadFailure::Register)?;

    Ok(UploadResponse {
        path,
        uploaded_path,
    })
}
