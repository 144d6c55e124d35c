// src/controllers/role_controller.rs
use actix_web::{HttpResponse, get, post, web};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::formatters::format_role;
use crate::models::role::RoleInput;
use crate::response;
use crate::state::AppState;

#[post("/role/add")]
pub async fn save_role(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    payload: web::Json<RoleInput>,
) -> Result<HttpResponse, AppError> {
    let role = state
        .roles
        .save_role(&current_user, payload.into_inner())
        .await
        .map_err(|e| e.context("Failed to add role"))?;

    Ok(response::success("Success to add role", format_role(&role)))
}

#[get("/roles")]
pub async fn get_roles(
    state: web::Data<AppState>,
    current_user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let roles = state
        .roles
        .get_roles(&current_user)
        .await
        .map_err(|e| e.context("Failed to get roles"))?;

    let data: Vec<_> = roles.iter().map(format_role).collect();
    Ok(response::success("List Role", data))
}
