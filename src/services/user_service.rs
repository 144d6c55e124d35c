// src/services/user_service.rs
use std::sync::Arc;

use bcrypt::{DEFAULT_COST, hash, verify};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::role::{ROLE_USER, ROLE_USTADZ};
use crate::models::user::{LoginInput, NewUser, RegisterInput, User};
use crate::policy::{self, Action};
use crate::repositories::{RoleRepository, UserRepository};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    hash_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self {
            users,
            roles,
            hash_cost: DEFAULT_COST,
        }
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// New accounts always start with the `user` role.
    pub async fn register_user(&self, input: RegisterInput) -> AppResult<User> {
        input.validate()?;
        let email = input.email.trim().to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email has been registered".to_string()));
        }

        let role = self
            .roles
            .find_by_name(ROLE_USER)
            .await?
            .ok_or(AppError::NotFound("role"))?;

        let password_hash = hash(&input.password, self.hash_cost)?;

        let user = self
            .users
            .create_user(NewUser {
                name: input.name.trim().to_string(),
                email,
                password_hash,
                role_id: role.id,
            })
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict("Email has been registered".to_string())
                }
                other => AppError::Persistence(other),
            })?;

        log::info!("registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn login_user(&self, input: LoginInput) -> AppResult<User> {
        input.validate()?;
        let invalid = || AppError::BadRequest("Login failed".to_string());

        let user = self
            .users
            .find_by_email(&input.email.trim().to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify(&input.password, &user.password_hash)? {
            return Err(invalid());
        }

        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: u64) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    pub async fn list_ustadz(&self, current: &User) -> AppResult<Vec<User>> {
        policy::authorize(current, Action::ListUstadz)?;
        Ok(self.users.list_by_role(ROLE_USTADZ).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::ROLE_ADMIN;
    use crate::testing::TestApp;

    fn register(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Ahmad".into(),
            email: email.into(),
            password: "rahasia123".into(),
        }
    }

    #[actix_web::test]
    async fn register_then_login() {
        let ctx = TestApp::new();
        let service = ctx.state().users.clone();

        let user = service.register_user(register("Ahmad@Example.com")).await.unwrap();
        assert_eq!(user.email, "ahmad@example.com");
        assert_eq!(user.role_name, ROLE_USER);
        assert_ne!(user.password_hash, "rahasia123");

        let logged_in = service
            .login_user(LoginInput {
                email: "ahmad@example.com".into(),
                password: "rahasia123".into(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[actix_web::test]
    async fn duplicate_email_and_bad_password_are_rejected() {
        let ctx = TestApp::new();
        let service = ctx.state().users.clone();
        service.register_user(register("a@example.com")).await.unwrap();

        let err = service.register_user(register("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service
            .login_user(LoginInput {
                email: "a@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::BadRequest(msg) if msg == "Login failed"));
    }

    #[actix_web::test]
    async fn register_validates_input() {
        let ctx = TestApp::new();
        let err = ctx
            .state()
            .users
            .register_user(RegisterInput {
                name: "".into(),
                email: "not-an-email".into(),
                password: "123".into(),
            })
            .await
            .unwrap_err();

        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[actix_web::test]
    async fn lists_only_ustadz() {
        let ctx = TestApp::new();
        let admin = ctx.user("Admin", ROLE_ADMIN);
        ctx.user("Ustadz Abdul Somad", ROLE_USTADZ);
        ctx.user("Jamaah", ROLE_USER);

        let ustadz = ctx.state().users.list_ustadz(&admin).await.unwrap();
        assert_eq!(ustadz.len(), 1);
        assert_eq!(ustadz[0].name, "Ustadz Abdul Somad");
    }
}
