//! Shared application context.
//!
//! [`AppContext`] is passed to all route handlers as Axum state. It wires
//! the SQLite repositories into per-operation use cases and carries the
//! object-storage client and configuration.

use std::sync::Arc;

use pixtag_core::Config;
use pixtag_db::pool::DbPool;

use crate::repository::{
    ImageRepository, ImageTagRepository, SqliteImageRepository, SqliteImageTagRepository,
};
use crate::storage::ObjectStorage;
use crate::usecase::{ImageTagUseCases, ImageUseCases};

/// Shared, cloneable state for all handlers.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub storage: Arc<dyn ObjectStorage>,
    pub images: ImageUseCases,
    pub image_tags: ImageTagUseCases,
}

impl AppContext {
    /// Wire the full context from a database pool, storage client, and
    /// configuration.
    pub fn new(db: DbPool, storage: Arc<dyn ObjectStorage>, config: Arc<Config>) -> Self {
        let image_repo: Arc<dyn ImageRepository> = Arc::new(SqliteImageRepository::new(db.clone()));
        let tag_repo: Arc<dyn ImageTagRepository> = Arc::new(SqliteImageTagRepository::new(db));

        Self {
            config,
            storage,
            images: ImageUseCases::new(image_repo),
            image_tags: ImageTagUseCases::new(tag_repo),
        }
    }
}
