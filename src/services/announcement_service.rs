// src/services/announcement_service.rs
//! Announcement lifecycle, including the banner object it points at.
//!
//! Ordering is upload new → write row → release old, so a failure never
//! leaves a row pointing at a missing object. When the row write fails the
//! fresh upload is removed again; when releasing the old object fails it is
//! logged as an orphan and the request still succeeds.

use std::sync::Arc;

use chrono::Local;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::announcement::{Announcement, AnnouncementInput, NewAnnouncement, UploadedFile};
use crate::models::user::User;
use crate::pagination::Pagination;
use crate::policy::{self, Action};
use crate::repositories::AnnouncementRepository;
use crate::storage::ObjectStorage;
use crate::utils;

#[derive(Clone)]
pub struct AnnouncementService {
    repository: Arc<dyn AnnouncementRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl AnnouncementService {
    pub fn new(repository: Arc<dyn AnnouncementRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { repository, storage }
    }

    pub async fn add_announcement(
        &self,
        current: &User,
        input: AnnouncementInput,
        banner: UploadedFile,
    ) -> AppResult<Announcement> {
        policy::authorize(current, Action::CreateAnnouncement)?;
        let input = normalize(input)?;

        let images = self.upload_banner(&input.slug, &banner).await?;

        let created = self
            .repository
            .add_announcement(NewAnnouncement {
                title: input.title,
                description: input.description,
                images: images.clone(),
                user_id: current.id,
                slug: input.slug,
            })
            .await;

        match created {
            Ok(announcement) => {
                log::info!("announcement {} created by user {}", announcement.id, current.id);
                Ok(announcement)
            }
            Err(e) => {
                self.discard(&images).await;
                Err(e.into())
            }
        }
    }

    pub async fn list_announcements(&self, page: Pagination) -> AppResult<(Vec<Announcement>, i64)> {
        Ok(self.repository.list_announcements(page).await?)
    }

    pub async fn detail_announcement(&self, id: u64) -> AppResult<Announcement> {
        self.repository
            .detail_announcement(id)
            .await?
            .ok_or(AppError::NotFound("announcement"))
    }

    /// Full overwrite of title, description and slug. The banner is replaced
    /// only when a new one is supplied.
    pub async fn update_announcement(
        &self,
        current: &User,
        id: u64,
        input: AnnouncementInput,
        banner: Option<UploadedFile>,
    ) -> AppResult<Announcement> {
        policy::authorize(current, Action::UpdateAnnouncement)?;
        let input = normalize(input)?;
        let existing = self.detail_announcement(id).await?;

        let new_images = match &banner {
            Some(file) => Some(self.upload_banner(&input.slug, file).await?),
            None => None,
        };

        let updated = Announcement {
            title: input.title,
            description: input.description,
            slug: input.slug,
            images: new_images.clone().unwrap_or_else(|| existing.images.clone()),
            ..existing.clone()
        };

        let saved = match self.repository.update_announcement(&updated).await {
            Ok(saved) => saved,
            Err(e) => {
                if let Some(images) = &new_images {
                    self.discard(images).await;
                }
                return Err(e.into());
            }
        };

        if saved.images != existing.images {
            self.release(&existing.images).await;
        }

        Ok(saved)
    }

    pub async fn delete_announcement(&self, current: &User, id: u64) -> AppResult<()> {
        policy::authorize(current, Action::DeleteAnnouncement)?;
        let existing = self.detail_announcement(id).await?;

        if !self.repository.delete_announcement(id).await? {
            return Err(AppError::NotFound("announcement"));
        }

        self.release(&existing.images).await;
        log::info!("announcement {} deleted by user {}", id, current.id);
        Ok(())
    }

    async fn upload_banner(&self, slug: &str, banner: &UploadedFile) -> AppResult<String> {
        let key = utils::banner_key(
            slug,
            Local::now().date_naive(),
            &banner.file_name,
            &utils::unique_suffix(),
        );

        let location = self
            .storage
            .upload(&key, banner.bytes.clone(), &utils::content_type_for(banner))
            .await?;
        Ok(location)
    }

    /// Compensates an upload whose row never got written.
    async fn discard(&self, location: &str) {
        if let Err(e) = self.storage.remove(location).await {
            log::error!("failed to roll back upload {}: {}", location, e);
        }
    }

    /// Releases an object the row no longer references.
    async fn release(&self, location: &str) {
        if location.is_empty() {
            return;
        }
        if let Err(e) = self.storage.remove(location).await {
            log::warn!("orphaned banner {} left in storage: {}", location, e);
        }
    }
}

fn normalize(mut input: AnnouncementInput) -> AppResult<AnnouncementInput> {
    input.validate()?;

    let source = if input.slug.trim().is_empty() {
        &input.title
    } else {
        &input.slug
    };
    let slug = utils::generate_slug(source);
    if slug.is_empty() {
        return Err(AppError::Validation(vec!["slug: could not be derived from title".to_string()]));
    }

    input.slug = slug;
    Ok(input)
}
