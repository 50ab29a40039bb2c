use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clausewise_ai::BackendError;
use clausewise_core::NormalizeError;
use serde::Serialize;
use thiserror::Error;

/// Every way an analysis request can fail.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid contract text")]
    InvalidInput,

    #[error("request body too large")]
    BodyTooLarge,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{var} not found")]
    MissingCredential { var: &'static str },

    #[error("invalid response format from model: {0}")]
    UpstreamFormat(#[from] NormalizeError),

    #[error("analysis failed: {0}")]
    Failed(#[from] BackendError),
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            hint: None,
            message: None,
            details: None,
        }
    }
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingCredential { .. } | Self::UpstreamFormat(_) | Self::Failed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::InvalidInput => ErrorBody::new("Invalid contract text"),
            Self::BodyTooLarge => ErrorBody::new("Contract text too large"),
            Self::MethodNotAllowed => ErrorBody::new("Method not allowed"),
            Self::MissingCredential { var } => ErrorBody {
                hint: Some(format!("Add {var} to the server environment")),
                ..ErrorBody::new(format!("{var} not found!"))
            },
            Self::UpstreamFormat(e) => ErrorBody {
                details: Some(e.to_string()),
                ..ErrorBody::new("Invalid response format from model")
            },
            Self::Failed(e) => ErrorBody {
                message: Some(e.to_string()),
                ..ErrorBody::new("Analysis failed")
            },
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
