// src/config.rs
use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} tidak ditemukan di .env")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub storage_backend: StorageBackend,
    pub s3_bucket: String,
    pub aws_region: String,
    pub upload_dir: PathBuf,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let storage_backend = match get("STORAGE_BACKEND").as_deref() {
            None | Some("s3") => StorageBackend::S3,
            Some("local") => StorageBackend::Local,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("APP_PORT", get("APP_PORT"), 8080)?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_hours: parse_or("JWT_TTL_HOURS", get("JWT_TTL_HOURS"), 48)?,
            storage_backend,
            s3_bucket: get("S3_BUCKET").unwrap_or_else(|| "masjid-nurul-iman".to_string()),
            aws_region: get("AWS_REGION").unwrap_or_else(|| "ap-northeast-1".to_string()),
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
