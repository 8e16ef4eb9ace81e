//! Error types and axum `IntoResponse` implementation.
//!
//! Every error response body is JSON, including rejections from the body,
//! query and path extractors. Server-side failures are logged here and
//! reported to the caller without detail.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use jobmela_core::registration::FieldError;
use serde_json::json;
use thiserror::Error;

use crate::auth::CHALLENGE;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed on {} field(s)", .0.len())]
  Validation(Vec<FieldError>),
  #[error("email or mobile already registered")]
  Duplicate,
  #[error("unauthorized")]
  Unauthorized,
  #[error("not found")]
  NotFound,
  #[error("request body too large")]
  PayloadTooLarge,
  #[error("attachment error: {0}")]
  Attachment(#[from] jobmela_core::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  fn invalid(field: &'static str, message: String) -> Self {
    Error::Validation(vec![FieldError::new(field, message)])
  }
}

/// A body axum could not turn into a form: too large, not JSON, or not an
/// object.
impl From<JsonRejection> for Error {
  fn from(rejection: JsonRejection) -> Self {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
      Error::PayloadTooLarge
    } else {
      Error::invalid("body", rejection.body_text())
    }
  }
}

impl From<QueryRejection> for Error {
  fn from(rejection: QueryRejection) -> Self {
    Error::invalid("query", rejection.body_text())
  }
}

/// Only `{id}` segments are extracted, so a path rejection is always a bad id.
impl From<PathRejection> for Error {
  fn from(rejection: PathRejection) -> Self {
    Error::invalid("id", rejection.body_text())
  }
}

fn message(status: StatusCode, msg: &str) -> Response {
  (status, Json(json!({ "message": msg }))).into_response()
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Validation(errors) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
      }
      Error::Duplicate => {
        message(StatusCode::CONFLICT, "Email or mobile already registered")
      }
      Error::Unauthorized => {
        let mut res = message(StatusCode::UNAUTHORIZED, "Unauthorized");
        res
          .headers_mut()
          .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
        res
      }
      Error::NotFound => message(StatusCode::NOT_FOUND, "Candidate not found"),
      Error::PayloadTooLarge => {
        message(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
      }
      e @ (Error::Attachment(_) | Error::Store(_)) => {
        tracing::error!(error = %e, "request failed");
        message(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
      }
    }
  }
}
