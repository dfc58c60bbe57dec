//! HTTP route handlers and response DTOs.

pub mod image_tags;
pub mod images;
