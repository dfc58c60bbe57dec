//! Application-layer use cases.
//!
//! One struct per operation; each `exec` invokes exactly one repository
//! method and shapes its result for presentation. Errors propagate
//! unchanged.

use std::sync::Arc;

use crate::repository::{ImageRepository, ImageTagRepository};

pub mod image_tags;
pub mod images;

pub use image_tags::{
    DeleteImageTagUseCase, DeleteImageTagsUseCase, GetImageTagUseCase, ListImageTagsUseCase,
    RegisterImageTagUseCase, RegisterImageTagsUseCase,
};
pub use images::{
    DeleteImageUseCase, GetImageUseCase, ListImagesNotTaggedUseCase, ListImagesUseCase,
    RegisterImageUseCase,
};

/// All image use cases wired over one repository.
#[derive(Clone)]
pub struct ImageUseCases {
    pub list: ListImagesUseCase,
    pub get: GetImageUseCase,
    pub delete: DeleteImageUseCase,
    pub register: RegisterImageUseCase,
    pub list_untagged: ListImagesNotTaggedUseCase,
}

impl ImageUseCases {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self {
            list: ListImagesUseCase::new(repo.clone()),
            get: GetImageUseCase::new(repo.clone()),
            delete: DeleteImageUseCase::new(repo.clone()),
            register: RegisterImageUseCase::new(repo.clone()),
            list_untagged: ListImagesNotTaggedUseCase::new(repo),
        }
    }
}

/// All image-tag use cases wired over one repository.
#[derive(Clone)]
pub struct ImageTagUseCases {
    pub list: ListImageTagsUseCase,
    pub get: GetImageTagUseCase,
    pub delete: DeleteImageTagUseCase,
    pub delete_many: DeleteImageTagsUseCase,
    pub register: RegisterImageTagUseCase,
    pub register_many: RegisterImageTagsUseCase,
}

impl ImageTagUseCases {
    pub fn new(repo: Arc<dyn ImageTagRepository>) -> Self {
        Self {
            list: ListImageTagsUseCase::new(repo.clone()),
            get: GetImageTagUseCase::new(repo.clone()),
            delete: DeleteImageTagUseCase::new(repo.clone()),
            delete_many: DeleteImageTagsUseCase::new(repo.clone()),
            register: RegisterImageTagUseCase::new(repo.clone()),
            register_many: RegisterImageTagsUseCase::new(repo),
        }
    }
}
