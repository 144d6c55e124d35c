// src/services/role_service.rs
use std::sync::Arc;

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::role::{Role, RoleInput};
use crate::models::user::User;
use crate::policy::{self, Action};
use crate::repositories::RoleRepository;

#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    pub async fn save_role(&self, current: &User, input: RoleInput) -> AppResult<Role> {
        policy::authorize(current, Action::CreateRole)?;
        input.validate()?;

        let role_name = input.role_name.trim().to_lowercase();
        if self.roles.find_by_name(&role_name).await?.is_some() {
            return Err(AppError::Conflict(format!("Role '{}' already exists", role_name)));
        }

        Ok(self.roles.create_role(&role_name).await?)
    }

    pub async fn get_roles(&self, current: &User) -> AppResult<Vec<Role>> {
        policy::authorize(current, Action::ListRoles)?;
        Ok(self.roles.list_roles().await?)
    }
}
