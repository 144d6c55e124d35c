// src/formatters.rs
//! JSON projections of the entities returned by the handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::announcement::Announcement;
use crate::models::role::Role;
use crate::models::study_rundown::StudyRundown;
use crate::models::user::User;

#[derive(Debug, Serialize)]
pub struct UserFormatter {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub fn format_user(user: &User, token: Option<String>) -> UserFormatter {
    UserFormatter {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role_name.clone(),
        token,
    }
}

#[derive(Debug, Serialize)]
pub struct RoleFormatter {
    pub id: u64,
    pub role_name: String,
}

pub fn format_role(role: &Role) -> RoleFormatter {
    RoleFormatter {
        id: role.id,
        role_name: role.role_name.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct AnnouncementFormatter {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub slug: String,
    pub user_id: u64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn format_announcement(announcement: &Announcement) -> AnnouncementFormatter {
    AnnouncementFormatter {
        id: announcement.id,
        title: announcement.title.clone(),
        description: announcement.description.clone(),
        image_url: announcement.images.clone(),
        slug: announcement.slug.clone(),
        user_id: announcement.user_id,
        created_by: announcement.author_name.clone(),
        created_at: announcement.created_at,
        updated_at: announcement.updated_at,
    }
}

pub fn format_announcements(announcements: &[Announcement]) -> Vec<AnnouncementFormatter> {
    announcements.iter().map(format_announcement).collect()
}

#[derive(Debug, Serialize)]
pub struct StudyRundownFormatter {
    pub id: u64,
    pub title: String,
    pub on_scheduled: bool,
    pub date: String,
    pub time: String,
    pub ustadz_id: u64,
    pub ustadz_name: String,
}

pub fn format_rundown(rundown: &StudyRundown) -> StudyRundownFormatter {
    StudyRundownFormatter {
        id: rundown.id,
        title: rundown.title.clone(),
        on_scheduled: rundown.on_scheduled,
        date: rundown.schedule_date.clone(),
        time: rundown.time.clone(),
        ustadz_id: rundown.user_id,
        ustadz_name: rundown.ustadz_name.clone(),
    }
}

pub fn format_rundowns(rundowns: &[StudyRundown]) -> Vec<StudyRundownFormatter> {
    rundowns.iter().map(format_rundown).collect()
}

#[derive(Debug, Serialize)]
pub struct UstadzFormatter {
    pub id: u64,
    pub name: String,
}

pub fn format_ustadz_list(users: &[User]) -> Vec<UstadzFormatter> {
    users
        .iter()
        .map(|u| UstadzFormatter {
            id: u.id,
            name: u.name.clone(),
        })
        .collect()
}
