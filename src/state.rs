// src/state.rs
use std::sync::Arc;

use sqlx::MySqlPool;

use crate::auth::JwtService;
use crate::repositories::{
    MySqlAnnouncementRepository, MySqlRoleRepository, MySqlStudyRundownRepository,
    MySqlUserRepository,
};
use crate::services::{AnnouncementService, RoleService, StudyRundownService, UserService};
use crate::storage::ObjectStorage;

/// Shared across workers via `web::Data`.
pub struct AppState {
    pub jwt: JwtService,
    pub users: UserService,
    pub roles: RoleService,
    pub announcements: AnnouncementService,
    pub rundowns: StudyRundownService,
}

impl AppState {
    pub fn new(pool: MySqlPool, storage: Arc<dyn ObjectStorage>, jwt: JwtService) -> Self {
        let users = Arc::new(MySqlUserRepository::new(pool.clone()));
        let roles = Arc::new(MySqlRoleRepository::new(pool.clone()));
        let announcements = Arc::new(MySqlAnnouncementRepository::new(pool.clone()));
        let rundowns = Arc::new(MySqlStudyRundownRepository::new(pool));

        Self {
            jwt,
            users: UserService::new(users.clone(), roles.clone()),
            roles: RoleService::new(roles),
            announcements: AnnouncementService::new(announcements, storage),
            rundowns: StudyRundownService::new(rundowns, users),
        }
    }
}
