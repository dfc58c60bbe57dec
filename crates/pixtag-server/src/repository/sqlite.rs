//! SQLite-backed repository implementations over the r2d2 pool.

use pixtag_core::{Error, Result};
use pixtag_db::models::{Image, ImageTag};
use pixtag_db::pool::{get_conn, DbPool};
use pixtag_db::queries::{image_tags, images};

use super::{ImageRepository, ImageTagRepository};

/// [`ImageRepository`] over a pooled SQLite connection.
pub struct SqliteImageRepository {
    pool: DbPool,
}

impl SqliteImageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ImageRepository for SqliteImageRepository {
    fn list_images(&self) -> Result<Vec<Image>> {
        let conn = get_conn(&self.pool)?;
        images::list_images(&conn)
    }

    fn get_image(&self, id: i64) -> Result<Option<Image>> {
        let conn = get_conn(&self.pool)?;
        images::get_image(&conn, id)
    }

    fn delete_image(&self, path: &str) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        if !images::delete_image_by_path(&conn, path)? {
            return Err(Error::not_found("image", path));
        }
        Ok(())
    }

    fn register_image(&self, key: &str) -> Result<Image> {
        let conn = get_conn(&self.pool)?;
        images::insert_image(&conn, key)
    }

    fn list_images_not_tagged(&self, tag_ids: &[i64]) -> Result<Vec<Image>> {
        let conn = get_conn(&self.pool)?;
        images::list_images_not_tagged(&conn, tag_ids)
    }
}

/// [`ImageTagRepository`] over a pooled SQLite connection.
pub struct SqliteImageTagRepository {
    pool: DbPool,
}

impl SqliteImageTagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ImageTagRepository for SqliteImageTagRepository {
    fn list_image_tags(&self) -> Result<Vec<ImageTag>> {
        let conn = get_conn(&self.pool)?;
        image_tags::list_image_tags(&conn)
    }

    fn get_image_tag(&self, id: i64) -> Result<Option<ImageTag>> {
        let conn = get_conn(&self.pool)?;
        image_tags::get_image_tag(&conn, id)
    }

    fn delete_image_tag(&self, id: i64) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        if !image_tags::delete_image_tag(&conn, id)? {
            return Err(Error::not_found("image tag", id));
        }
        Ok(())
    }

    fn delete_image_tags(&self, ids: &[i64]) -> Result<()> {
        let mut conn = get_conn(&self.pool)?;
        image_tags::delete_image_tags(&mut conn, ids)
    }

    fn register_image_tag(&self, name: &str) -> Result<ImageTag> {
        let conn = get_conn(&self.pool)?;
        image_tags::insert_image_tag(&conn, name)
    }

    fn register_image_tags(&self, names: &[String]) -> Result<Vec<i64>> {
        let mut conn = get_conn(&self.pool)?;
        image_tags::insert_image_tags(&mut conn, names)
    }
}
