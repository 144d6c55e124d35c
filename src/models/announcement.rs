// src/models/announcement.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Announcement row with the owning user's name joined in.
///
/// `images` is empty, a local upload path, or a full bucket URL.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Announcement {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub images: String,
    pub user_id: u64,
    pub author_name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
    pub images: String,
    pub user_id: u64,
    pub slug: String,
}

/// Text fields of the create/update multipart form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnnouncementInput {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    /// Derived from the title when blank.
    #[serde(default)]
    pub slug: String,
}

/// A `banner` file part read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
