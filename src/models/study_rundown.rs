// src/models/study_rundown.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudyRundown {
    pub id: u64,
    pub title: String,
    pub on_scheduled: bool,
    pub schedule_date: String,
    pub time: String,
    pub user_id: u64,
    pub ustadz_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStudyRundown {
    pub title: String,
    pub on_scheduled: bool,
    pub schedule_date: String,
    pub time: String,
    pub user_id: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StudyRundownInput {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub on_scheduled: bool,
    #[serde(default)]
    pub schedule_date: String,
    pub user_id: u64,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
}

/// Full replacement of a rundown. A missing `user_id` keeps the current presenter.
#[derive(Debug, Deserialize, Validate)]
pub struct StudyRundownUpdateInput {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub on_scheduled: bool,
    #[serde(default)]
    pub schedule_date: String,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    pub user_id: Option<u64>,
}
