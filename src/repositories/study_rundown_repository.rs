// src/repositories/study_rundown_repository.rs
use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::models::study_rundown::{NewStudyRundown, StudyRundown};
use crate::pagination::Pagination;

const SELECT_RUNDOWN: &str = r#"
    SELECT s.id, s.title, s.on_scheduled, s.schedule_date, s.time, s.user_id,
           u.name AS ustadz_name, s.created_at, s.updated_at
    FROM study_rundowns s
    JOIN users u ON u.id = s.user_id
"#;

#[async_trait]
pub trait StudyRundownRepository: Send + Sync {
    async fn add_rundown(&self, rundown: NewStudyRundown) -> sqlx::Result<StudyRundown>;
    async fn detail_rundown(&self, id: u64) -> sqlx::Result<Option<StudyRundown>>;
    async fn list_rundowns(&self, page: Pagination) -> sqlx::Result<(Vec<StudyRundown>, i64)>;
    async fn update_rundown(&self, rundown: &StudyRundown) -> sqlx::Result<StudyRundown>;
    async fn delete_rundown(&self, id: u64) -> sqlx::Result<bool>;
}

#[derive(Clone)]
pub struct MySqlStudyRundownRepository {
    pool: MySqlPool,
}

impl MySqlStudyRundownRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudyRundownRepository for MySqlStudyRundownRepository {
    async fn add_rundown(&self, rundown: NewStudyRundown) -> sqlx::Result<StudyRundown> {
        let result = sqlx::query(
            r#"
            INSERT INTO study_rundowns (title, on_scheduled, schedule_date, time, user_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&rundown.title)
        .bind(rundown.on_scheduled)
        .bind(&rundown.schedule_date)
        .bind(&rundown.time)
        .bind(rundown.user_id)
        .execute(&self.pool)
        .await?;

        self.detail_rundown(result.last_insert_id())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn detail_rundown(&self, id: u64) -> sqlx::Result<Option<StudyRundown>> {
        sqlx::query_as::<_, StudyRundown>(&format!("{} WHERE s.id = ?", SELECT_RUNDOWN))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_rundowns(&self, page: Pagination) -> sqlx::Result<(Vec<StudyRundown>, i64)> {
        let items = sqlx::query_as::<_, StudyRundown>(&format!(
            "{} ORDER BY s.created_at DESC, s.id DESC LIMIT ? OFFSET ?",
            SELECT_RUNDOWN
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM study_rundowns")
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn update_rundown(&self, rundown: &StudyRundown) -> sqlx::Result<StudyRundown> {
        sqlx::query(
            r#"
            UPDATE study_rundowns
            SET title = ?, on_scheduled = ?, schedule_date = ?, time = ?, user_id = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&rundown.title)
        .bind(rundown.on_scheduled)
        .bind(&rundown.schedule_date)
        .bind(&rundown.time)
        .bind(rundown.user_id)
        .bind(rundown.id)
        .execute(&self.pool)
        .await?;

        self.detail_rundown(rundown.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn delete_rundown(&self, id: u64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM study_rundowns WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
