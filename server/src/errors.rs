// src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use techport_core::{CoreError, StoreError, WorkflowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Storage Error: {0}")]
  Store(#[from] StoreError),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: WorkflowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<CoreError> for AppError {
  fn from(err: CoreError) -> Self {
    match err {
      CoreError::Validation(m) => AppError::Validation(m),
      CoreError::NotFound(m) => AppError::NotFound(m),
      CoreError::Store(e) => AppError::Store(e),
      CoreError::Workflow { source } => AppError::Workflow { source },
    }
  }
}

// Handlers occasionally use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Store(_) => HttpResponse::InternalServerError().json(json!({"error": "Storage operation failed"})),
      AppError::Workflow { source } => HttpResponse::InternalServerError()
        .json(json!({"error": "Workflow processing error", "detail": source.to_string()})),
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
