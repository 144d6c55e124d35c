// src/error.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::response;
use crate::storage::StorageError;

pub type AppResult<T> = Result<T, AppError>;

/// Internal error kinds. Externally the shape stays coarse (422 / 401 / 400)
/// but callers and tests can still tell the causes apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("You must completed field")]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("{message}")]
    Context {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Attach the static message shown to clients. Kinds that already carry a
    /// client-facing message are returned unchanged.
    pub fn context(self, message: &'static str) -> Self {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Unauthorized
            | AppError::Forbidden(_)
            | AppError::Conflict(_)
            | AppError::Context { .. } => self,
            other => AppError::Context {
                message,
                source: Box::new(other),
            },
        }
    }

    pub fn root(&self) -> &AppError {
        match self {
            AppError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    fn is_internal(&self) -> bool {
        matches!(
            self.root(),
            AppError::Storage(_) | AppError::Persistence(_) | AppError::Token(_) | AppError::Hash(_)
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.root() {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            log::error!("{}: {}", self, self.root());
        }

        let message = match self {
            AppError::Context { message, .. } => message.to_string(),
            AppError::Storage(_) | AppError::Persistence(_) | AppError::Token(_) | AppError::Hash(_) => {
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let data = match self.root() {
            AppError::Validation(errors) => json!({ "errors": errors }),
            _ => serde_json::Value::Null,
        };

        response::failure(&message, self.status_code(), data)
    }
}
