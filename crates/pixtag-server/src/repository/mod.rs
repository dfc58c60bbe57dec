//! Persistence contracts for images and tags.
//!
//! Use cases depend on these traits only; the SQLite implementations live
//! in [`sqlite`] and test doubles implement the same contracts.

use pixtag_core::Result;
use pixtag_db::models::{Image, ImageTag};

mod sqlite;

pub use sqlite::{SqliteImageRepository, SqliteImageTagRepository};

/// Persistence contract for images.
pub trait ImageRepository: Send + Sync {
    /// All images with their full tag sets.
    fn list_images(&self) -> Result<Vec<Image>>;

    /// A single image by id, or `None` when absent.
    fn get_image(&self, id: i64) -> Result<Option<Image>>;

    /// Remove the record identified by storage path. NotFound when no such
    /// row exists.
    fn delete_image(&self, path: &str) -> Result<()>;

    /// Persist a new record referencing an uploaded object key.
    fn register_image(&self, key: &str) -> Result<Image>;

    /// Images carrying none of the given tags; an empty filter returns all.
    fn list_images_not_tagged(&self, tag_ids: &[i64]) -> Result<Vec<Image>>;
}

/// Persistence contract for image tags.
pub trait ImageTagRepository: Send + Sync {
    fn list_image_tags(&self) -> Result<Vec<ImageTag>>;

    fn get_image_tag(&self, id: i64) -> Result<Option<ImageTag>>;

    /// Remove a tag by id. NotFound when no such row exists.
    fn delete_image_tag(&self, id: i64) -> Result<()>;

    /// Remove several tags, all-or-nothing.
    fn delete_image_tags(&self, ids: &[i64]) -> Result<()>;

    fn register_image_tag(&self, name: &str) -> Result<ImageTag>;

    /// Insert several tags, all-or-nothing, returning ids in input order.
    fn register_image_tags(&self, names: &[String]) -> Result<Vec<i64>>;
}
