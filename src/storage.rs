// src/storage.rs
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of {key} failed: {message}")]
    Upload { key: String, message: String },

    #[error("delete of {location} failed: {message}")]
    Delete { location: String, message: String },

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where banner images live. References returned by `upload` are what gets
/// persisted in `announcements.images`.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Releases a stored reference. An object that is already gone is not an error.
    async fn remove(&self, location: &str) -> Result<(), StorageError>;
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('.') && !key.contains(['/', '\\'])
}

/// Public-read objects in a single bucket.
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    base_url: String,
}

impl S3Storage {
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;
        Self::new(S3Client::new(&sdk_config), &config.s3_bucket, &config.aws_region)
    }

    pub fn new(client: S3Client, bucket: &str, region: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            base_url: format!("https://{}.s3.{}.amazonaws.com/", bucket, region),
        }
    }

    /// Bucket URLs are stripped back to the key; anything else is taken as a raw key.
    fn key_for<'a>(&self, location: &'a str) -> &'a str {
        location.strip_prefix(self.base_url.as_str()).unwrap_or(location)
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        log::info!("uploaded s3://{}/{}", self.bucket, key);
        Ok(format!("{}{}", self.base_url, key))
    }

    async fn remove(&self, location: &str) -> Result<(), StorageError> {
        if location.is_empty() {
            return Ok(());
        }

        let key = self.key_for(location);
        // DeleteObject succeeds for keys that no longer exist.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                location: location.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        log::info!("deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

/// Files on local disk, served by the `/uploads` static route.
pub struct LocalStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves a stored reference back to its file on disk.
    pub fn path_for(&self, location: &str) -> Option<PathBuf> {
        let key = location
            .strip_prefix(self.public_prefix.as_str())
            .map(|rest| rest.trim_start_matches('/'))
            .or_else(|| Path::new(location).file_name().and_then(|n| n.to_str()))?;

        is_valid_key(key).then(|| self.root.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(key), body).await?;

        Ok(format!("{}/{}", self.public_prefix, key))
    }

    async fn remove(&self, location: &str) -> Result<(), StorageError> {
        if location.is_empty() {
            return Ok(());
        }

        let path = self
            .path_for(location)
            .ok_or_else(|| StorageError::InvalidKey(location.to_string()))?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} already absent", path.display());
                Ok(())
            }
            Err(e) => Err(StorageError::Delete {
                location: location.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
