use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::repository::gateway::StoreError;
use crate::validation::FieldErrors;

pub const DATABASE_ERROR: &str = "Database error occurred. Please try again later.";
pub const NOT_FOUND: &str = "Not found.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later.";

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0:?}")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("unsupported media type {0:?}")]
    UnsupportedMediaType(String),
    /// `detail` is what the client sees; `source` is only logged.
    #[error("{detail}: {source}")]
    Store {
        detail: String,
        #[source]
        source: StoreError,
    },
    #[error("unexpected error")]
    Unexpected,
}

impl ApiError {
    pub fn store(detail: impl Into<String>, source: StoreError) -> Self {
        ApiError::Store { detail: detail.into(), source }
    }
}

impl ApiError {
    /// Rejection of a JSON body. A missing or foreign content type is a 415, anything else a 400.
    pub fn from_json(err: JsonPayloadError, req: &HttpRequest) -> Self {
        match err {
            JsonPayloadError::ContentType => {
                let content_type = req
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                ApiError::UnsupportedMediaType(content_type.to_string())
            }
            err => ApiError::BadRequest(format!("JSON parse error - {err}")),
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        error!(error = %err, "blocking task did not complete");
        ApiError::Unexpected
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Store { .. } | ApiError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::Validation(errors) => response.json(errors),
            ApiError::BadRequest(detail) => response.json(Detail::new(detail.as_str())),
            ApiError::NotFound(detail) => response.json(Detail::new(*detail)),
            ApiError::UnsupportedMediaType(content_type) => {
                response.json(Detail::new(format!("Unsupported media type \"{content_type}\" in request.")))
            }
            ApiError::Store { detail, .. } => response.json(Detail::new(detail.as_str())),
            ApiError::Unexpected => response.json(Detail::new(UNEXPECTED_ERROR)),
        }
    }
}
