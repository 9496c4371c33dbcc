//! Unified API router for Pokedex Explorer
//!
//! Merges the module routers into a single axum `Router` with CORS, request
//! tracing, a JSON 404 fallback and one response envelope.
//!
//! ## Endpoint Map
//!
//! | Prefix            | Module     | Description                          |
//! |-------------------|------------|--------------------------------------|
//! | `/api/health`     | api        | Liveness probe                       |
//! | `/api/pokemon*`   | catalog    | Generation pages, list, search, detail |
//! | `/api/caught*`    | collection | Caught records per client            |
//! | `/api/teams*`     | collection | Teams per client                     |
//!
//! Successful responses are `{"success": true, "data": ...}`; failures are
//! `{"success": false, "message": ...}`.

use crate::catalog::{catalog_router, CatalogState};
use crate::collection::{collection_router, CollectionState};
use crate::error::Error;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// Wrap `data` in a success envelope
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

/// JSON request body whose decode failures answer 400 with the failure
/// envelope instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

/// Handler result: errors render through `IntoResponse for Error`
pub type ApiResult<T> = std::result::Result<T, Error>;

/// Failure envelope with the given status
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({"success": false, "message": message.into()})),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Io(_) | Error::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            Error::Validation(msg) | Error::NotFound(msg) => msg,
            other => {
                tracing::error!("Request failed: {}", other);
                other.to_string()
            }
        };

        failure(status, message)
    }
}

/// Build the complete HTTP application
pub fn build_app(
    catalog_state: CatalogState,
    collection_state: CollectionState,
    cors_origins: &[String],
) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(catalog_router(catalog_state))
        .merge(collection_router(collection_state))
        .fallback(route_not_found)
        .layer(build_cors(cors_origins))
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    timestamp: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn route_not_found() -> Response {
    failure(StatusCode::NOT_FOUND, "Route not found")
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
