// src/controllers/auth_controller.rs
use actix_web::{HttpResponse, post, web};

use crate::error::AppError;
use crate::formatters::format_user;
use crate::models::user::{LoginInput, RegisterInput};
use crate::response;
use crate::state::AppState;

#[post("/user/register")]
pub async fn register_user(
    state: web::Data<AppState>,
    payload: web::Json<RegisterInput>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .users
        .register_user(payload.into_inner())
        .await
        .map_err(|e| e.context("Register account failed"))?;

    let token = state.jwt.generate_token(user.id).map_err(|e| {
        log::error!("Gagal menghasilkan JWT: {:?}", e);
        AppError::from(e).context("Register account failed")
    })?;

    Ok(response::success(
        "Account has been registered",
        format_user(&user, Some(token)),
    ))
}

#[post("/user/login")]
pub async fn login_user(
    state: web::Data<AppState>,
    payload: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .users
        .login_user(payload.into_inner())
        .await
        .map_err(|e| e.context("Login failed"))?;

    let token = state.jwt.generate_token(user.id).map_err(|e| {
        log::error!("Gagal menghasilkan JWT: {:?}", e);
        AppError::from(e).context("Login failed")
    })?;

    Ok(response::success("Successfully logged in", format_user(&user, Some(token))))
}
