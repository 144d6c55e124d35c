// src/services/study_rundown_service.rs
use std::sync::Arc;

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::role::ROLE_USTADZ;
use crate::models::study_rundown::{
    NewStudyRundown, StudyRundown, StudyRundownInput, StudyRundownUpdateInput,
};
use crate::models::user::User;
use crate::pagination::Pagination;
use crate::policy::{self, Action};
use crate::repositories::{StudyRundownRepository, UserRepository};

#[derive(Clone)]
pub struct StudyRundownService {
    rundowns: Arc<dyn StudyRundownRepository>,
    users: Arc<dyn UserRepository>,
}

impl StudyRundownService {
    pub fn new(rundowns: Arc<dyn StudyRundownRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { rundowns, users }
    }

    pub async fn add_rundown(&self, current: &User, input: StudyRundownInput) -> AppResult<StudyRundown> {
        policy::authorize(current, Action::CreateRundown)?;
        input.validate()?;
        self.ensure_ustadz(input.user_id).await?;

        let rundown = self
            .rundowns
            .add_rundown(NewStudyRundown {
                title: input.title.trim().to_string(),
                on_scheduled: input.on_scheduled,
                schedule_date: input.schedule_date.trim().to_string(),
                time: input.time.trim().to_string(),
                user_id: input.user_id,
            })
            .await?;

        log::info!("rundown {} created by user {}", rundown.id, current.id);
        Ok(rundown)
    }

    pub async fn list_rundowns(&self, page: Pagination) -> AppResult<(Vec<StudyRundown>, i64)> {
        Ok(self.rundowns.list_rundowns(page).await?)
    }

    pub async fn detail_rundown(&self, id: u64) -> AppResult<StudyRundown> {
        self.rundowns
            .detail_rundown(id)
            .await?
            .ok_or(AppError::NotFound("rundown"))
    }

    pub async fn update_rundown(
        &self,
        current: &User,
        id: u64,
        input: StudyRundownUpdateInput,
    ) -> AppResult<StudyRundown> {
        policy::authorize(current, Action::UpdateRundown)?;
        input.validate()?;
        let existing = self.detail_rundown(id).await?;

        let user_id = match input.user_id {
            Some(user_id) if user_id != existing.user_id => {
                self.ensure_ustadz(user_id).await?;
                user_id
            }
            _ => existing.user_id,
        };

        let updated = StudyRundown {
            title: input.title.trim().to_string(),
            on_scheduled: input.on_scheduled,
            schedule_date: input.schedule_date.trim().to_string(),
            time: input.time.trim().to_string(),
            user_id,
            ..existing
        };

        Ok(self.rundowns.update_rundown(&updated).await?)
    }

    pub async fn delete_rundown(&self, current: &User, id: u64) -> AppResult<()> {
        policy::authorize(current, Action::DeleteRundown)?;

        if !self.rundowns.delete_rundown(id).await? {
            return Err(AppError::NotFound("rundown"));
        }

        log::info!("rundown {} deleted by user {}", id, current.id);
        Ok(())
    }

    async fn ensure_ustadz(&self, user_id: u64) -> AppResult<()> {
        let presenter = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("ustadz"))?;

        if presenter.role_name != ROLE_USTADZ {
            return Err(AppError::BadRequest(format!(
                "User {} is not an ustadz",
                presenter.id
            )));
        }
        Ok(())
    }
}
