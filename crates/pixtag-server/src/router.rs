//! Axum router construction.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Images. Static segments (batch, untagged) are registered on their
        // own paths; axum prefers them over the {id} capture.
        .route(
            "/images",
            get(routes::images::list_images).post(routes::images::register_image),
        )
        .route("/images/batch", post(routes::images::register_images))
        .route("/images/untagged", post(routes::images::untagged_images))
        .route(
            "/images/{id}",
            get(routes::images::get_image).delete(routes::images::delete_image),
        )
        // Tags
        .route(
            "/image-tags",
            get(routes::image_tags::list_image_tags).post(routes::image_tags::register_image_tag),
        )
        .route(
            "/image-tags/batch",
            post(routes::image_tags::register_image_tags)
                .delete(routes::image_tags::delete_image_tags),
        )
        .route(
            "/image-tags/{id}",
            get(routes::image_tags::get_image_tag).delete(routes::image_tags::delete_image_tag),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}
