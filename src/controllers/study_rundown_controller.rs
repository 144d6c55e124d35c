// src/controllers/study_rundown_controller.rs
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::formatters::{format_rundown, format_rundowns};
use crate::models::study_rundown::{StudyRundownInput, StudyRundownUpdateInput};
use crate::pagination::{PageQuery, Pagination};
use crate::response;
use crate::state::AppState;

#[post("/rundown/add")]
pub async fn add_study(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    form: web::Form<StudyRundownInput>,
) -> Result<HttpResponse, AppError> {
    let rundown = state
        .rundowns
        .add_rundown(&current_user, form.into_inner())
        .await
        .map_err(|e| e.context("Failed to add study rundown"))?;

    Ok(response::success("Success to add study rundown", format_rundown(&rundown)))
}

#[get("/rundown")]
pub async fn get_all_rundown(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = Pagination::from(query.into_inner());

    let (rundowns, total) = state
        .rundowns
        .list_rundowns(page)
        .await
        .map_err(|e| e.context("Error to get study rundown"))?;

    Ok(response::success_list(
        "List Study Rundown",
        page.page,
        page.per_page,
        total,
        format_rundowns(&rundowns),
    ))
}

#[get("/rundown/{id}")]
pub async fn get_detail_study_rundown(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let rundown = state
        .rundowns
        .detail_rundown(path.into_inner())
        .await
        .map_err(|e| e.context("Failed to get detail study rundown"))?;

    Ok(response::success("Study Rundown Detail", format_rundown(&rundown)))
}

#[put("/rundown/{id}")]
pub async fn update_study_rundown(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    path: web::Path<u64>,
    form: web::Form<StudyRundownUpdateInput>,
) -> Result<HttpResponse, AppError> {
    let rundown = state
        .rundowns
        .update_rundown(&current_user, path.into_inner(), form.into_inner())
        .await
        .map_err(|e| e.context("Failed to update study rundown"))?;

    Ok(response::success("Success to update study rundown", format_rundown(&rundown)))
}

#[delete("/rundown/{id}")]
pub async fn delete_study_rundown(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    state
        .rundowns
        .delete_rundown(&current_user, path.into_inner())
        .await
        .map_err(|e| e.context("Delete failed"))?;

    Ok(response::success("Delete Success", serde_json::Value::Null))
}
