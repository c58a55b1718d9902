use std::path::PathBuf;
use std::time::Duration;

use wikimasters_db::cache::DEFAULT_CACHE_TTL;
use wikimasters_db::file_store::DEFAULT_DATA_FILE;

/// Where pages are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file, rewritten on every mutation.
    File { path: PathBuf },
    /// PostgreSQL, optionally fronted by the page-list cache.
    Postgres { database_url: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    /// Page-list cache expiry; `None` disables the cache.
    pub cache_ttl: Option<Duration>,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_BACKEND`      | `file` (or `postgres`)     |
    /// | `DATA_FILE`            | `.data/pages.json`         |
    /// | `DATABASE_URL`         | required for `postgres`    |
    /// | `CACHE_TTL_SECS`       | `60` (`0` disables)        |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `COOKIE_SECURE`        | `false`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "file".into())
            .as_str()
        {
            "file" => StorageBackend::File {
                path: std::env::var("DATA_FILE")
                    .unwrap_or_else(|_| DEFAULT_DATA_FILE.into())
                    .into(),
            },
            "postgres" => StorageBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when STORAGE_BACKEND=postgres"),
            },
            other => panic!("STORAGE_BACKEND must be 'file' or 'postgres', got '{other}'"),
        };

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .map(|v| v.parse().expect("CACHE_TTL_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_CACHE_TTL.as_secs());
        let cache_ttl = (cache_ttl_secs > 0).then(|| Duration::from_secs(cache_ttl_secs));

        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".into())
            .into();

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            cache_ttl,
            upload_dir,
            cookie_secure,
        }
    }
}
