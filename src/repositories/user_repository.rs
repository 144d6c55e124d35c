// src/repositories/user_repository.rs
use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::models::user::{NewUser, User};

const SELECT_USER: &str = r#"
    SELECT u.id, u.name, u.email, u.password_hash, u.role_id, r.role_name,
           u.created_at, u.updated_at
    FROM users u
    JOIN roles r ON r.id = u.role_id
"#;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> sqlx::Result<User>;
    async fn find_by_id(&self, id: u64) -> sqlx::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> sqlx::Result<Option<User>>;
    async fn list_by_role(&self, role_name: &str) -> sqlx::Result<Vec<User>>;
}

#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create_user(&self, user: NewUser) -> sqlx::Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, role_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_id())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn find_by_id(&self, id: u64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{} WHERE u.id = ?", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_email(&self, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{} WHERE u.email = ? LIMIT 1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_by_role(&self, role_name: &str) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "{} WHERE r.role_name = ? ORDER BY u.name ASC",
            SELECT_USER
        ))
        .bind(role_name)
        .fetch_all(&self.pool)
        .await
    }
}
