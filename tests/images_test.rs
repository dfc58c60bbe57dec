//! End-to-end tests for the image endpoints.

mod common;

use common::{TestHarness, TEST_BUCKET, TEST_ENDPOINT_EXTERNAL};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

fn png_part(bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name("photo.png")
        .mime_str("image/png")
        .unwrap()
}

#[tokio::test]
async fn upload_stores_object_and_registers_row() {
    let h = TestHarness::spawn().await;

    let form = Form::new().part("image", png_part(b"png-bytes"));
    let resp = h
        .client
        .post(h.url("/images"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let key = body["path"].as_str().unwrap().to_string();
    assert_eq!(
        body["uploadedPath"].as_str().unwrap(),
        format!("{TEST_ENDPOINT_EXTERNAL}/{TEST_BUCKET}/{key}")
    );

    // Exactly one object stored, under the key returned in the response.
    let puts = h.storage.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].key, key);
    assert_eq!(puts[0].data, b"png-bytes");
    assert_eq!(puts[0].content_type, "image/png");

    // The database row references the same key.
    let resp = h.client.get(h.url("/images")).send().await.unwrap();
    let images: Value = resp.json().await.unwrap();
    assert_eq!(images.as_array().unwrap().len(), 1);
    assert_eq!(images[0]["imagePath"].as_str().unwrap(), key);
    assert_eq!(images[0]["displayFlag"], true);
}

#[tokio::test]
async fn upload_defaults_content_type() {
    let h = TestHarness::spawn().await;

    let form = Form::new().part("image", Part::bytes(b"raw".to_vec()).file_name("blob"));
    let resp = h
        .client
        .post(h.url("/images"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let puts = h.storage.puts();
    assert_eq!(puts[0].content_type, "application/octet-stream");
}

#[tokio::test]
async fn upload_without_image_field_is_rejected() {
    let h = TestHarness::spawn().await;

    let form = Form::new().part("attachment", png_part(b"png-bytes"));
    let resp = h
        .client
        .post(h.url("/images"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "failed to get file");
    assert!(h.storage.puts().is_empty());
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn upload_storage_failure_skips_database() {
    let h = TestHarness::spawn().await;
    h.storage.fail_put_at(1);

    let form = Form::new().part("image", png_part(b"png-bytes"));
    let resp = h
        .client
        .post(h.url("/images"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "failed to upload to storage");
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn batch_upload_processes_files_in_order() {
    let h = TestHarness::spawn().await;

    let form = Form::new()
        .part("images", png_part(b"first"))
        .part("images", png_part(b"second"))
        .part("images", png_part(b"third"));
    let resp = h
        .client
        .post(h.url("/images/batch"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 3);

    let puts = h.storage.puts();
    assert_eq!(puts.len(), 3);
    assert_eq!(puts[0].data, b"first");
    assert_eq!(puts[1].data, b"second");
    assert_eq!(puts[2].data, b"third");

    // Response order matches upload order.
    for (result, put) in results.iter().zip(&puts) {
        assert_eq!(result["path"].as_str().unwrap(), put.key);
    }
    assert_eq!(h.image_count(), 3);
}

#[tokio::test]
async fn batch_upload_halts_on_first_failure() {
    let h = TestHarness::spawn().await;
    h.storage.fail_put_at(2);

    let form = Form::new()
        .part("images", png_part(b"first"))
        .part("images", png_part(b"second"))
        .part("images", png_part(b"third"));
    let resp = h
        .client
        .post(h.url("/images/batch"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "failed to upload to storage");

    // The first file went through before the batch aborted; the third was
    // never attempted.
    assert_eq!(h.storage.puts().len(), 1);
    assert_eq!(h.image_count(), 1);
}

#[tokio::test]
async fn batch_upload_without_files_is_rejected() {
    let h = TestHarness::spawn().await;

    let form = Form::new().text("note", "no files here");
    let resp = h
        .client
        .post(h.url("/images/batch"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "no files uploaded");
}

#[tokio::test]
async fn list_includes_full_tag_set() {
    let h = TestHarness::spawn().await;
    let image_id = h.seed_image("key-1");
    let nature = h.seed_tag("nature");
    let city = h.seed_tag("city");
    h.attach_tag(image_id, nature);
    h.attach_tag(image_id, city);

    let resp = h.client.get(h.url("/images")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let images = body.as_array().unwrap();
    assert_eq!(images.len(), 1);

    let tags = images[0]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["id"].as_i64().unwrap(), nature);
    assert_eq!(tags[0]["name"], "nature");
    assert_eq!(tags[1]["id"].as_i64().unwrap(), city);
    assert_eq!(tags[1]["name"], "city");
}

#[tokio::test]
async fn get_image_omits_tags() {
    let h = TestHarness::spawn().await;
    let image_id = h.seed_image("key-1");
    let tag = h.seed_tag("nature");
    h.attach_tag(image_id, tag);

    let resp = h
        .client
        .get(h.url(&format!("/images/{image_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"].as_i64().unwrap(), image_id);
    assert_eq!(body["imagePath"], "key-1");
    assert_eq!(body["displayFlag"], true);
    assert!(body.get("tags").is_none());
}

#[tokio::test]
async fn get_missing_image_is_not_found() {
    let h = TestHarness::spawn().await;

    let resp = h.client.get(h.url("/images/9999")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_removes_object_then_row() {
    let h = TestHarness::spawn().await;
    h.seed_image("key-1");

    let resp = h
        .client
        .delete(h.url("/images/key-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "image deleted successfully");
    assert_eq!(h.storage.deletes(), vec!["key-1".to_string()]);
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn delete_storage_failure_leaves_row() {
    let h = TestHarness::spawn().await;
    h.seed_image("key-1");
    h.storage.fail_delete();

    let resp = h
        .client
        .delete(h.url("/images/key-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "failed to delete image from storage");
    assert_eq!(h.image_count(), 1);
}

#[tokio::test]
async fn delete_unknown_path_reports_database_failure() {
    let h = TestHarness::spawn().await;

    // The object delete succeeds but there is no matching row.
    let resp = h
        .client
        .delete(h.url("/images/no-such-key"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "failed to delete image from database");
    assert_eq!(h.storage.deletes().len(), 1);
}

#[tokio::test]
async fn untagged_filter_excludes_tagged_images() {
    let h = TestHarness::spawn().await;
    let tagged = h.seed_image("tagged");
    let plain_a = h.seed_image("plain-a");
    let plain_b = h.seed_image("plain-b");
    let tag = h.seed_tag("nature");
    h.attach_tag(tagged, tag);

    let resp = h
        .client
        .post(h.url("/images/untagged"))
        .json(&serde_json::json!({"tagIds": [tag]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let images = body.as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["id"].as_i64().unwrap(), plain_a);
    assert_eq!(images[1]["id"].as_i64().unwrap(), plain_b);
}

#[tokio::test]
async fn untagged_empty_filter_returns_all() {
    let h = TestHarness::spawn().await;
    h.seed_image("a");
    h.seed_image("b");

    let resp = h
        .client
        .post(h.url("/images/untagged"))
        .json(&serde_json::json!({"tagIds": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}
