//! Image CRUD operations.
//!
//! List queries hydrate each image's tag set with a follow-up query so
//! responses always carry the full current tags (never a partial set).

use chrono::Utc;
use rusqlite::Connection;
use pixtag_core::{Error, Result};

use crate::models::{Image, ImageTag};
use crate::queries::placeholders;

const COLS: &str = "id, image_path, display_flag";

/// Fetch the tags attached to an image, ordered by tag id.
fn tags_for_image(conn: &Connection, image_id: i64) -> Result<Vec<ImageTag>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.id, t.name
             FROM image_tags t
             JOIN image_tag_relations r ON r.tag_id = t.id
             WHERE r.image_id = ?1
             ORDER BY t.id",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let tags = stmt
        .query_map([image_id], ImageTag::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(tags)
}

fn hydrate_tags(conn: &Connection, mut images: Vec<Image>) -> Result<Vec<Image>> {
    for image in &mut images {
        image.tags = tags_for_image(conn, image.id)?;
    }
    Ok(images)
}

/// List all images with their tags. No pagination, no filtering.
pub fn list_images(conn: &Connection) -> Result<Vec<Image>> {
    let q = format!("SELECT {COLS} FROM images ORDER BY id");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let images = stmt
        .query_map([], Image::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    hydrate_tags(conn, images)
}

/// Get a single image by id, tags included.
pub fn get_image(conn: &Connection, id: i64) -> Result<Option<Image>> {
    let q = format!("SELECT {COLS} FROM images WHERE id = ?1");
    let result = conn.query_row(&q, [id], Image::from_row);

    match result {
        Ok(mut image) => {
            image.tags = tags_for_image(conn, image.id)?;
            Ok(Some(image))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Insert a new image record referencing an uploaded object key.
///
/// `display_flag` defaults to true for fresh uploads.
pub fn insert_image(conn: &Connection, image_path: &str) -> Result<Image> {
    conn.execute(
        "INSERT INTO images (image_path, display_flag, created_at) VALUES (?1, 1, ?2)",
        rusqlite::params![image_path, Utc::now().to_rfc3339()],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Image {
        id: conn.last_insert_rowid(),
        image_path: image_path.to_string(),
        display_flag: true,
        tags: Vec::new(),
    })
}

/// Delete an image record by its storage path. Returns whether a row was
/// removed.
pub fn delete_image_by_path(conn: &Connection, image_path: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM images WHERE image_path = ?1", [image_path])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// List images carrying none of the given tags, with their tags hydrated.
///
/// An empty `tag_ids` filter excludes nothing, so all images are returned.
pub fn list_images_not_tagged(conn: &Connection, tag_ids: &[i64]) -> Result<Vec<Image>> {
    if tag_ids.is_empty() {
        return list_images(conn);
    }

    let q = format!(
        "SELECT {COLS} FROM images
         WHERE id NOT IN (
             SELECT image_id FROM image_tag_relations WHERE tag_id IN ({})
         )
         ORDER BY id",
        placeholders(tag_ids.len())
    );
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let images = stmt
        .query_map(rusqlite::params_from_iter(tag_ids.iter()), Image::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    hydrate_tags(conn, images)
}

/// Attach a tag to an image. A duplicate attach is a no-op.
pub fn tag_image(conn: &Connection, image_id: i64, tag_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO image_tag_relations (image_id, tag_id) VALUES (?1, ?2)",
        [image_id, tag_id],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}

/// Detach a tag from an image.
pub fn untag_image(conn: &Connection, image_id: i64, tag_id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM image_tag_relations WHERE image_id = ?1 AND tag_id = ?2",
        [image_id, tag_id],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}
