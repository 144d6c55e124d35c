// src/response.rs
use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub code: u16,
    pub status: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ApiResponseList<T> {
    pub message: String,
    pub code: u16,
    pub status: &'static str,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub data: T,
}

pub fn success<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        message: message.to_string(),
        code: StatusCode::OK.as_u16(),
        status: "success",
        data,
    })
}

pub fn success_list<T: Serialize>(
    message: &str,
    page: u32,
    per_page: u32,
    total: i64,
    data: T,
) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponseList {
        message: message.to_string(),
        code: StatusCode::OK.as_u16(),
        status: "success",
        page,
        per_page,
        total,
        data,
    })
}

pub fn failure(message: &str, status: StatusCode, data: serde_json::Value) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse {
        message: message.to_string(),
        code: status.as_u16(),
        status: "error",
        data,
    })
}
