// src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Invalid cart item: {0}")]
  Validation(String),

  #[error("Customer id {payload} in the payload does not match customer id {path} in the path")]
  CustomerMismatch { path: i64, payload: i64 },

  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  // Swallowed at the checkout call site; the HTTP mapping below is
  // defense-in-depth should it ever escape.
  #[error("Order Gateway Error: {0}")]
  Gateway(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Lets handlers use `?` on helpers returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::CustomerMismatch { .. } | AppError::InvalidQuantity(_) => {
        StatusCode::BAD_REQUEST
      }
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    // Database details stay in the logs, not on the wire.
    let message = match self {
      AppError::Sqlx(_) => "Database operation failed".to_string(),
      other => other.to_string(),
    };
    HttpResponse::build(status).json(json!({
      "status": status.as_u16(),
      "error": status.canonical_reason().unwrap_or("Error"),
      "message": message,
    }))
  }
}

// Result type alias used throughout the application.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn client_errors_map_to_4xx() {
    assert_eq!(
      AppError::Validation("missing field 'price'".into()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      AppError::CustomerMismatch { path: 1, payload: 2 }.status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      AppError::InvalidQuantity("quantity must be at least 1".into()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(AppError::NotFound("gone".into()).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
  }

  #[test]
  fn infrastructure_errors_map_to_5xx() {
    assert_eq!(AppError::Gateway("down".into()).status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(
      AppError::Config("bad port".into()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      AppError::Internal("boom".into()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
