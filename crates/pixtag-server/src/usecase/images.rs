//! Image use cases.

use std::sync::Arc;

use pixtag_core::{Error, Result};
use pixtag_db::models::Image;

use crate::repository::ImageRepository;

/// List all images with tags.
#[derive(Clone)]
pub struct ListImagesUseCase {
    repo: Arc<dyn ImageRepository>,
}

impl ListImagesUseCase {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self) -> Result<Vec<Image>> {
        self.repo.list_images()
    }
}

/// Fetch a single image by id.
#[derive(Clone)]
pub struct GetImageUseCase {
    repo: Arc<dyn ImageRepository>,
}

impl GetImageUseCase {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, id: i64) -> Result<Image> {
        self.repo
            .get_image(id)?
            .ok_or_else(|| Error::not_found("image", id))
    }
}

/// Delete the DB record identified by storage path.
#[derive(Clone)]
pub struct DeleteImageUseCase {
    repo: Arc<dyn ImageRepository>,
}

impl DeleteImageUseCase {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, path: &str) -> Result<()> {
        self.repo.delete_image(path)
    }
}

/// Persist a new image record for an uploaded object key, returning the
/// stored path.
#[derive(Clone)]
pub struct RegisterImageUseCase {
    repo: Arc<dyn ImageRepository>,
}

impl RegisterImageUseCase {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, key: &str) -> Result<String> {
        let image = self.repo.register_image(key)?;
        Ok(image.image_path)
    }
}

/// List images excluded from the given tag set.
#[derive(Clone)]
pub struct ListImagesNotTaggedUseCase {
    repo: Arc<dyn ImageRepository>,
}

impl ListImagesNotTaggedUseCase {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, tag_ids: &[i64]) -> Result<Vec<Image>> {
        self.repo.list_images_not_tagged(tag_ids)
    }
}
