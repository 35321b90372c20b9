//! Errors surfaced by the HTTP handlers.
//!
//! Every variant ends the request. Client mistakes map to 400 and re-render
//! the form; everything else maps to a 5xx error page.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use data_loader::DataLoadError;
use thiserror::Error;
use tracing::{error, warn};

use crate::render::{self, PageView};

#[derive(Error, Debug)]
pub enum ApiError {
    /// A required form field was absent
    #[error("Missing required form field: {0}")]
    MissingParameter(&'static str),

    /// Dataset file missing, unreadable, malformed, or lacking a column
    #[error("Failed to load dataset: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Dataset load timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::DataLoad(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            warn!("Rejected request: {}", self);
        } else {
            error!("Request failed: {:#}", self);
        }

        let page = render::render_page(&PageView::notice(self.to_string()));
        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingParameter("genre").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::DataLoad(DataLoadError::SchemaError {
                file: "movies.csv".to_string(),
                column: "genres".to_string(),
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(1)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
