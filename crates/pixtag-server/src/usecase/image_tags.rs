//! Image tag use cases.

use std::sync::Arc;

use pixtag_core::{Error, Result};
use pixtag_db::models::ImageTag;

use crate::repository::ImageTagRepository;

/// List all tags.
#[derive(Clone)]
pub struct ListImageTagsUseCase {
    repo: Arc<dyn ImageTagRepository>,
}

impl ListImageTagsUseCase {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self) -> Result<Vec<ImageTag>> {
        self.repo.list_image_tags()
    }
}

/// Fetch a single tag by id.
#[derive(Clone)]
pub struct GetImageTagUseCase {
    repo: Arc<dyn ImageTagRepository>,
}

impl GetImageTagUseCase {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, id: i64) -> Result<ImageTag> {
        self.repo
            .get_image_tag(id)?
            .ok_or_else(|| Error::not_found("image tag", id))
    }
}

/// Delete a single tag.
#[derive(Clone)]
pub struct DeleteImageTagUseCase {
    repo: Arc<dyn ImageTagRepository>,
}

impl DeleteImageTagUseCase {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, id: i64) -> Result<()> {
        self.repo.delete_image_tag(id)
    }
}

/// Delete several tags, all-or-nothing.
#[derive(Clone)]
pub struct DeleteImageTagsUseCase {
    repo: Arc<dyn ImageTagRepository>,
}

impl DeleteImageTagsUseCase {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, ids: &[i64]) -> Result<()> {
        self.repo.delete_image_tags(ids)
    }
}

/// Register a single tag, returning the stored row.
#[derive(Clone)]
pub struct RegisterImageTagUseCase {
    repo: Arc<dyn ImageTagRepository>,
}

impl RegisterImageTagUseCase {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, name: &str) -> Result<ImageTag> {
        self.repo.register_image_tag(name)
    }
}

/// Register several tags, returning the new ids in input order.
#[derive(Clone)]
pub struct RegisterImageTagsUseCase {
    repo: Arc<dyn ImageTagRepository>,
}

impl RegisterImageTagsUseCase {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self { repo }
    }

    pub fn exec(&self, names: &[String]) -> Result<Vec<i64>> {
        self.repo.register_image_tags(names)
    }
}
