//! Image tag CRUD operations, single and bulk.
//!
//! Bulk operations are all-or-nothing: they run in one transaction and a
//! missing id rolls the whole batch back.

use chrono::Utc;
use rusqlite::Connection;
use pixtag_core::{Error, Result};

use crate::models::ImageTag;
use crate::queries::placeholders;

/// List all tags, ordered by id.
pub fn list_image_tags(conn: &Connection) -> Result<Vec<ImageTag>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM image_tags ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;
    let tags = stmt
        .query_map([], ImageTag::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(tags)
}

/// Get a single tag by id.
pub fn get_image_tag(conn: &Connection, id: i64) -> Result<Option<ImageTag>> {
    let result = conn.query_row(
        "SELECT id, name FROM image_tags WHERE id = ?1",
        [id],
        ImageTag::from_row,
    );

    match result {
        Ok(tag) => Ok(Some(tag)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Insert a new tag.
pub fn insert_image_tag(conn: &Connection, name: &str) -> Result<ImageTag> {
    conn.execute(
        "INSERT INTO image_tags (name, created_at) VALUES (?1, ?2)",
        rusqlite::params![name, Utc::now().to_rfc3339()],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(ImageTag {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Insert several tags in one transaction, returning their new ids in
/// input order. Any failure (e.g. a duplicate name) rolls back the batch.
pub fn insert_image_tags(conn: &mut Connection, names: &[String]) -> Result<Vec<i64>> {
    let tx = conn
        .transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        tx.execute(
            "INSERT INTO image_tags (name, created_at) VALUES (?1, ?2)",
            rusqlite::params![name, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
        ids.push(tx.last_insert_rowid());
    }

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(ids)
}

/// Delete a tag by id. Returns whether a row was removed.
pub fn delete_image_tag(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM image_tags WHERE id = ?1", [id])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete several tags in one transaction. If any id does not exist the
/// whole batch is rolled back with a NotFound error. Duplicate ids in the
/// batch are collapsed.
pub fn delete_image_tags(conn: &mut Connection, ids: &[i64]) -> Result<()> {
    // An empty IN () list is a SQLite syntax error.
    if ids.is_empty() {
        return Ok(());
    }

    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let tx = conn
        .transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let q = format!(
        "SELECT COUNT(*) FROM image_tags WHERE id IN ({})",
        placeholders(unique.len())
    );
    let present: i64 = tx
        .query_row(&q, rusqlite::params_from_iter(unique.iter()), |row| {
            row.get(0)
        })
        .map_err(|e| Error::database(e.to_string()))?;
    if present != unique.len() as i64 {
        return Err(Error::not_found("image tag", format_ids(ids)));
    }

    let q = format!(
        "DELETE FROM image_tags WHERE id IN ({})",
        placeholders(unique.len())
    );
    tx.execute(&q, rusqlite::params_from_iter(unique.iter()))
        .map_err(|e| Error::database(e.to_string()))?;

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}

fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;

    #[test]
    fn insert_get_list() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let tag = insert_image_tag(&conn, "portrait").unwrap();
        let found = get_image_tag(&conn, tag.id).unwrap().unwrap();
        assert_eq!(found.name, "portrait");

        insert_image_tag(&conn, "landscape").unwrap();
        assert_eq!(list_image_tags(&conn).unwrap().len(), 2);
    }

    #[test]
    fn get_missing_is_none() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        assert!(get_image_tag(&conn, 123).unwrap().is_none());
    }

    #[test]
    fn duplicate_name_rejected() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert_image_tag(&conn, "dup").unwrap();
        assert!(insert_image_tag(&conn, "dup").is_err());
    }

    #[test]
    fn delete_single() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let tag = insert_image_tag(&conn, "gone").unwrap();
        assert!(delete_image_tag(&conn, tag.id).unwrap());
        assert!(!delete_image_tag(&conn, tag.id).unwrap());
    }

    #[test]
    fn bulk_insert_returns_ids_in_order() {
        let pool = init_memory_pool().unwrap();
        let mut conn = pool.get().unwrap();

        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let ids = insert_image_tags(&mut conn, &names).unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);

        let tags = list_image_tags(&conn).unwrap();
        assert_eq!(tags[0].name, "a");
        assert_eq!(tags[2].name, "c");
    }

    #[test]
    fn bulk_insert_rolls_back_on_duplicate() {
        let pool = init_memory_pool().unwrap();
        let mut conn = pool.get().unwrap();

        insert_image_tag(&conn, "existing").unwrap();
        let names = vec!["fresh".to_string(), "existing".to_string()];
        assert!(insert_image_tags(&mut conn, &names).is_err());

        // "fresh" must not have been committed.
        assert_eq!(list_image_tags(&conn).unwrap().len(), 1);
    }

    #[test]
    fn bulk_delete_all_or_nothing() {
        let pool = init_memory_pool().unwrap();
        let mut conn = pool.get().unwrap();

        let a = insert_image_tag(&conn, "a").unwrap();
        let b = insert_image_tag(&conn, "b").unwrap();

        // One missing id aborts the whole batch.
        let err = delete_image_tags(&mut conn, &[a.id, 999]).unwrap_err();
        assert_eq!(err.http_status(), 404);
        assert_eq!(list_image_tags(&conn).unwrap().len(), 2);

        delete_image_tags(&mut conn, &[a.id, b.id]).unwrap();
        assert!(list_image_tags(&conn).unwrap().is_empty());
    }

    #[test]
    fn bulk_delete_collapses_duplicate_ids() {
        let pool = init_memory_pool().unwrap();
        let mut conn = pool.get().unwrap();

        let a = insert_image_tag(&conn, "a").unwrap();

        // The same id twice still names an existing tag; not a NotFound.
        delete_image_tags(&mut conn, &[a.id, a.id]).unwrap();
        assert!(list_image_tags(&conn).unwrap().is_empty());
    }

    #[test]
    fn bulk_delete_empty_is_a_noop() {
        let pool = init_memory_pool().unwrap();
        let mut conn = pool.get().unwrap();

        insert_image_tag(&conn, "keep").unwrap();
        delete_image_tags(&mut conn, &[]).unwrap();
        assert_eq!(list_image_tags(&conn).unwrap().len(), 1);
    }
}
