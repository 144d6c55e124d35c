// src/repositories/role_repository.rs
use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::models::role::Role;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create_role(&self, role_name: &str) -> sqlx::Result<Role>;
    async fn find_by_name(&self, role_name: &str) -> sqlx::Result<Option<Role>>;
    async fn list_roles(&self) -> sqlx::Result<Vec<Role>>;
}

#[derive(Clone)]
pub struct MySqlRoleRepository {
    pool: MySqlPool,
}

impl MySqlRoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn create_role(&self, role_name: &str) -> sqlx::Result<Role> {
        let result = sqlx::query("INSERT INTO roles (role_name) VALUES (?)")
            .bind(role_name)
            .execute(&self.pool)
            .await?;

        sqlx::query_as::<_, Role>(
            "SELECT id, role_name, created_at, updated_at FROM roles WHERE id = ?",
        )
        .bind(result.last_insert_id())
        .fetch_one(&self.pool)
        .await
    }

    async fn find_by_name(&self, role_name: &str) -> sqlx::Result<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT id, role_name, created_at, updated_at FROM roles WHERE role_name = ? LIMIT 1",
        )
        .bind(role_name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_roles(&self) -> sqlx::Result<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT id, role_name, created_at, updated_at FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
    }
}
