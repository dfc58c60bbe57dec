//! Shared integration-test harness.
//!
//! Spawns the real router on a random local port over an in-memory database,
//! with a recording object-storage mock in place of the S3 client.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use pixtag_core::config::{Config, StorageConfig};
use pixtag_core::{Error, Result};
use pixtag_db::pool::{get_conn, init_memory_pool, DbPool};
use pixtag_db::queries;
use pixtag_server::storage::ObjectStorage;
use pixtag_server::{build_router, AppContext};

pub const TEST_BUCKET: &str = "test-bucket";
pub const TEST_ENDPOINT_EXTERNAL: &str = "http://storage.local:9000";

/// One recorded successful upload.
#[derive(Debug, Clone)]
pub struct PutRecord {
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Storage mock that records calls and can be told to fail on demand.
#[derive(Default)]
pub struct MockStorage {
    puts: Mutex<Vec<PutRecord>>,
    deletes: Mutex<Vec<String>>,
    put_calls: AtomicUsize,
    /// 1-based index of the put call that should fail; 0 means never.
    fail_put_at: AtomicUsize,
    fail_delete: AtomicBool,
}

impl MockStorage {
    /// Make the `n`-th put call (1-based) fail.
    pub fn fail_put_at(&self, n: usize) {
        self.fail_put_at.store(n, Ordering::SeqCst);
    }

    pub fn fail_delete(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn puts(&self) -> Vec<PutRecord> {
        self.puts.lock().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let call = self.put_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_put_at.load(Ordering::SeqCst) {
            return Err(Error::storage("injected put failure"));
        }

        self.puts.lock().push(PutRecord {
            key: key.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::storage("injected delete failure"));
        }
        self.deletes.lock().push(key.to_string());
        Ok(())
    }
}

/// A running server plus handles to its database and storage mock.
pub struct TestHarness {
    pub base_url: String,
    pub client: reqwest::Client,
    pub storage: Arc<MockStorage>,
    pub pool: DbPool,
}

impl TestHarness {
    pub async fn spawn() -> Self {
        let pool = init_memory_pool().expect("in-memory pool");
        let storage = Arc::new(MockStorage::default());

        let config = Config {
            storage: StorageConfig {
                bucket: TEST_BUCKET.into(),
                endpoint: String::new(),
                endpoint_external: TEST_ENDPOINT_EXTERNAL.into(),
                ..StorageConfig::default()
            },
            ..Config::default()
        };

        let ctx = AppContext::new(pool.clone(), storage.clone(), Arc::new(config));
        let app = build_router(ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            storage,
            pool,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // Seed helpers go straight at the database, bypassing the HTTP surface.

    pub fn seed_image(&self, path: &str) -> i64 {
        let conn = get_conn(&self.pool).unwrap();
        queries::images::insert_image(&conn, path).unwrap().id
    }

    pub fn seed_tag(&self, name: &str) -> i64 {
        let conn = get_conn(&self.pool).unwrap();
        queries::image_tags::insert_image_tag(&conn, name).unwrap().id
    }

    pub fn attach_tag(&self, image_id: i64, tag_id: i64) {
        let conn = get_conn(&self.pool).unwrap();
        queries::images::tag_image(&conn, image_id, tag_id).unwrap();
    }

    pub fn image_count(&self) -> i64 {
        let conn = get_conn(&self.pool).unwrap();
        conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
            .unwrap()
    }

    pub fn tag_count(&self) -> i64 {
        let conn = get_conn(&self.pool).unwrap();
        conn.query_row("SELECT COUNT(*) FROM image_tags", [], |row| row.get(0))
            .unwrap()
    }
}
