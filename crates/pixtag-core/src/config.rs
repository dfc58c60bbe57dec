//! Application configuration, sourced from the environment.
//!
//! Every deployment knob lives in an environment variable. [`Config::from_env`]
//! reads the process environment; the lookup-function seam exists so unit
//! tests can feed a plain map instead of mutating global env state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".into(),
        }
    }
}

/// SQLite database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "pixtag.db".into(),
        }
    }
}

/// S3-compatible object storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket that holds uploaded objects.
    pub bucket: String,
    /// Endpoint the server talks to (empty = AWS default resolution).
    pub endpoint: String,
    /// Endpoint clients use to fetch objects; part of the `uploadedPath`
    /// returned from upload responses.
    pub endpoint_external: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "pixtag".into(),
            endpoint: String::new(),
            endpoint_external: String::new(),
            region: "us-east-1".into(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Build a `Config` from the process environment.
    ///
    /// `AWS_S3_BUCKET_NAME` is required; everything else falls back to a
    /// sensible default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a `Config` from an arbitrary variable lookup.
    ///
    /// Variables:
    /// - `PIXTAG_LISTEN` (default `0.0.0.0:8080`)
    /// - `PIXTAG_DB_PATH` (default `pixtag.db`)
    /// - `AWS_S3_BUCKET_NAME` (required)
    /// - `AWS_S3_ENDPOINT` (default empty = AWS endpoint resolution)
    /// - `AWS_S3_ENDPOINT_EXTERNAL` (default: same as `AWS_S3_ENDPOINT`)
    /// - `AWS_REGION` (default `us-east-1`)
    /// - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (optional)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bucket = lookup("AWS_S3_BUCKET_NAME")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config("AWS_S3_BUCKET_NAME is not set"))?;

        let endpoint = lookup("AWS_S3_ENDPOINT").unwrap_or_default();
        let endpoint_external = lookup("AWS_S3_ENDPOINT_EXTERNAL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| endpoint.clone());

        Ok(Self {
            server: ServerConfig {
                listen: lookup("PIXTAG_LISTEN")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| ServerConfig::default().listen),
            },
            database: DatabaseConfig {
                path: lookup("PIXTAG_DB_PATH")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DatabaseConfig::default().path),
            },
            storage: StorageConfig {
                bucket,
                endpoint,
                endpoint_external,
                region: lookup("AWS_REGION")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| StorageConfig::default().region),
                access_key_id: lookup("AWS_ACCESS_KEY_ID").filter(|v| !v.is_empty()),
                secret_access_key: lookup("AWS_SECRET_ACCESS_KEY").filter(|v| !v.is_empty()),
            },
        })
    }
}
