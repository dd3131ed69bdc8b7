use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use stockroom_core::{ErrorBody, Violation};

use crate::api::json_response;

/// Every rejected request parameter, collected in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("Invalid request parameters{}", list_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns true if any violation names `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn list_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let sep = if i == 0 { ": " } else { "; " };
            format!("{}{}: {}", sep, v.field, v.message)
        })
        .collect()
}

/// A query the store cannot run against the target record type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Catalog unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::Query(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status_code();
        let body = match self {
            Error::Validation(e) => ErrorBody {
                error: "Invalid request parameters".to_string(),
                violations: e.violations,
            },
            other => ErrorBody {
                error: other.to_string(),
                violations: Vec::new(),
            },
        };
        let body = serde_json::to_vec(&body)
            .unwrap_or_else(|_| br#"{"error":"Internal error"}"#.to_vec());
        json_response(status, Bytes::from(body))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
