// src/repositories/announcement_repository.rs
use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::models::announcement::{Announcement, NewAnnouncement};
use crate::pagination::Pagination;

// Author name comes from a single join; listing never re-fetches users per row.
const SELECT_ANNOUNCEMENT: &str = r#"
    SELECT a.id, a.title, a.description, a.images, a.user_id, u.name AS author_name,
           a.slug, a.created_at, a.updated_at
    FROM announcements a
    JOIN users u ON u.id = a.user_id
"#;

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn add_announcement(&self, announcement: NewAnnouncement) -> sqlx::Result<Announcement>;
    async fn detail_announcement(&self, id: u64) -> sqlx::Result<Option<Announcement>>;
    /// Newest first; the total is the unscoped row count.
    async fn list_announcements(&self, page: Pagination) -> sqlx::Result<(Vec<Announcement>, i64)>;
    /// Overwrites every mutable column with the values in `announcement`.
    async fn update_announcement(&self, announcement: &Announcement) -> sqlx::Result<Announcement>;
    async fn delete_announcement(&self, id: u64) -> sqlx::Result<bool>;
}

#[derive(Clone)]
pub struct MySqlAnnouncementRepository {
    pool: MySqlPool,
}

impl MySqlAnnouncementRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for MySqlAnnouncementRepository {
    async fn add_announcement(&self, announcement: NewAnnouncement) -> sqlx::Result<Announcement> {
        let result = sqlx::query(
            r#"
            INSERT INTO announcements (title, description, images, user_id, slug)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(&announcement.images)
        .bind(announcement.user_id)
        .bind(&announcement.slug)
        .execute(&self.pool)
        .await?;

        self.detail_announcement(result.last_insert_id())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn detail_announcement(&self, id: u64) -> sqlx::Result<Option<Announcement>> {
        sqlx::query_as::<_, Announcement>(&format!("{} WHERE a.id = ?", SELECT_ANNOUNCEMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_announcements(&self, page: Pagination) -> sqlx::Result<(Vec<Announcement>, i64)> {
        let items = sqlx::query_as::<_, Announcement>(&format!(
            "{} ORDER BY a.created_at DESC, a.id DESC LIMIT ? OFFSET ?",
            SELECT_ANNOUNCEMENT
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements")
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn update_announcement(&self, announcement: &Announcement) -> sqlx::Result<Announcement> {
        let result = sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, description = ?, images = ?, user_id = ?, slug = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(&announcement.images)
        .bind(announcement.user_id)
        .bind(&announcement.slug)
        .bind(announcement.id)
        .execute(&self.pool)
        .await?;

        // MySQL reports 0 affected rows when nothing changed, so re-read instead.
        log::debug!(
            "announcement {} updated ({} rows)",
            announcement.id,
            result.rows_affected()
        );

        self.detail_announcement(announcement.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn delete_announcement(&self, id: u64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
