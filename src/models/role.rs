// src/models/role.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const ROLE_SUPER_ADMIN: &str = "super-admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USTADZ: &str = "ustadz";
pub const ROLE_USER: &str = "user";

/// Seeded at startup, in this order.
pub const DEFAULT_ROLES: [&str; 4] = [ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_USTADZ, ROLE_USER];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Role {
    pub id: u64,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoleInput {
    #[validate(length(min = 1, max = 50, message = "role_name must be 1-50 characters"))]
    pub role_name: String,
}
