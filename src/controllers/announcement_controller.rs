// src/controllers/announcement_controller.rs
use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::formatters::{format_announcement, format_announcements};
use crate::pagination::{PageQuery, Pagination};
use crate::response;
use crate::state::AppState;
use crate::utils::{self, AnnouncementForm};

/// Validation first (422), then banner presence/size (400).
fn check_form(form: &AnnouncementForm, banner_required: bool) -> Result<(), AppError> {
    form.input.validate()?;

    if form.banner_too_large {
        return Err(AppError::BadRequest("Image too large, max 1MB".to_string()));
    }
    if banner_required && form.banner.is_none() {
        return Err(AppError::BadRequest("Failed to upload banner image".to_string()));
    }
    Ok(())
}

#[post("/announcement/add")]
pub async fn add_announcement(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = utils::read_announcement_form(payload).await?;
    check_form(&form, true)?;
    let Some(banner) = form.banner else {
        return Err(AppError::BadRequest("Failed to upload banner image".to_string()));
    };

    let announcement = state
        .announcements
        .add_announcement(&current_user, form.input, banner)
        .await
        .map_err(|e| e.context("Failed to add announcement"))?;

    Ok(response::success(
        "Success to add announcement",
        format_announcement(&announcement),
    ))
}

#[get("/announcements")]
pub async fn get_all_announcement(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = Pagination::from(query.into_inner());

    let (announcements, total) = state
        .announcements
        .list_announcements(page)
        .await
        .map_err(|e| e.context("Error to get announcements"))?;

    Ok(response::success_list(
        "List Announcement",
        page.page,
        page.per_page,
        total,
        format_announcements(&announcements),
    ))
}

#[get("/announcements/{id}")]
pub async fn get_detail_announcement(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let announcement = state
        .announcements
        .detail_announcement(path.into_inner())
        .await
        .map_err(|e| e.context("Failed to get detail announcement"))?;

    Ok(response::success(
        "Announcement Detail",
        format_announcement(&announcement),
    ))
}

#[put("/announcements/{id}")]
pub async fn update_announcement(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    path: web::Path<u64>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form = utils::read_announcement_form(payload).await?;
    check_form(&form, false)?;

    let announcement = state
        .announcements
        .update_announcement(&current_user, id, form.input, form.banner)
        .await
        .map_err(|e| e.context("Failed to update announcement"))?;

    Ok(response::success(
        "Success to update announcement",
        format_announcement(&announcement),
    ))
}

#[delete("/announcements/{id}")]
pub async fn delete_announcement(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    state
        .announcements
        .delete_announcement(&current_user, path.into_inner())
        .await
        .map_err(|e| e.context("Delete failed"))?;

    Ok(response::success("Delete Success", serde_json::Value::Null))
}
