//! axum router for the analysis endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router, middleware};
use clausewise_core::{AnalysisRequest, AnalysisResult};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::analyzer::Analyzer;
use crate::error::AnalysisError;

pub const ANALYZE_PATH: &str = "/api/analyze";

const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET,OPTIONS,PATCH,DELETE,POST,PUT",
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, \
         Content-MD5, Content-Type, Date, X-Api-Version",
    ),
];

/// Build the router: `POST` analyses, `OPTIONS` answers pre-flight, anything
/// else is 405. Every response carries the CORS headers.
pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route(
            ANALYZE_PATH,
            post(analyze).options(preflight).fallback(method_not_allowed),
        )
        .layer(middleware::map_response(with_cors_headers))
        .with_state(analyzer)
}

/// Serve the router on `listener` until the process is stopped.
pub async fn serve(listener: TcpListener, analyzer: Arc<Analyzer>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(
        %addr,
        path = ANALYZE_PATH,
        provider = %analyzer.config().provider,
        model = %analyzer.config().model,
        "listening"
    );
    axum::serve(listener, router(analyzer)).await
}

async fn analyze(
    State(analyzer): State<Arc<Analyzer>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisResult>, AnalysisError> {
    let body = body.map_err(|rejection| {
        debug!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "unreadable request body"
        );
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AnalysisError::BodyTooLarge
        } else {
            AnalysisError::InvalidInput
        }
    })?;
    let request: AnalysisRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "rejecting request body");
        AnalysisError::InvalidInput
    })?;
    let result = analyzer.analyze(&request).await?;
    Ok(Json(result))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AnalysisError {
    AnalysisError::MethodNotAllowed
}

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}
