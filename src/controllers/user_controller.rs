// src/controllers/user_controller.rs
use actix_web::{HttpResponse, get, web};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::formatters::format_ustadz_list;
use crate::response;
use crate::state::AppState;

#[get("/user/ustadz")]
pub async fn get_list_ustadz_name(
    state: web::Data<AppState>,
    current_user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let ustadz = state
        .users
        .list_ustadz(&current_user)
        .await
        .map_err(|e| e.context("Failed to get ustadz"))?;

    Ok(response::success("List Ustadz", format_ustadz_list(&ustadz)))
}
