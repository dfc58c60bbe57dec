//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. `Image.tags` is hydrated by a second query, not by
//! `from_row`.

use serde::{Deserialize, Serialize};

/// A stored image: object-storage key plus DB metadata and its tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    /// Object-storage key of the uploaded file.
    pub image_path: String,
    pub display_flag: bool,
    /// Associated tags, ordered by tag id. Always the full current set.
    pub tags: Vec<ImageTag>,
}

impl Image {
    /// Build an `Image` from a row of `id, image_path, display_flag`.
    /// Tags start empty; callers attach them afterwards.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            image_path: row.get(1)?,
            display_flag: row.get(2)?,
            tags: Vec::new(),
        })
    }
}

/// A named label attachable to images, many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTag {
    pub id: i64,
    pub name: String,
}

impl ImageTag {
    /// Build an `ImageTag` from a row of `id, name`.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}
