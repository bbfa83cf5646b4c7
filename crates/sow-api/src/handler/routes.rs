//! Route definitions for the SOW service
//!
//! - POST `<route_path>` - render the mock SOW (bearer key required)
//! - GET /health - liveness probe

use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use super::{
    cors_layer, request_logging_middleware, ApiKey, BearerAuth, ErrorBody, HealthResponse,
};
use crate::config::ServiceConfig;
use crate::sow::{DocumentRequest, SowResponse};
use crate::{SERVICE_NAME, SERVICE_VERSION};

/// Detail message returned with every 401
pub const UNAUTHORIZED_DETAIL: &str = "Invalid or missing API Key";

/// State shared by all routes
///
/// Read-only after construction; cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub api_key: ApiKey,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            started_at: Utc::now(),
        }
    }
}

impl FromRef<AppState> for ApiKey {
    fn from_ref(state: &AppState) -> Self {
        state.api_key.clone()
    }
}

/// Request-time errors
#[derive(Debug)]
pub enum ApiError {
    /// Authorization header missing or not equal to `Bearer <key>`
    Unauthorized,
    /// The body was rejected by the JSON extractor
    InvalidBody { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidBody { status, .. } => *status,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::Unauthorized => UNAUTHORIZED_DETAIL,
            ApiError::InvalidBody { message, .. } => message,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.detail()))).into_response()
    }
}

/// Create the router for a resolved configuration
pub fn create_router(config: &ServiceConfig) -> Router {
    router_with_state(&config.route_path, AppState::new(config.api_key.clone()))
}

fn router_with_state(route_path: &str, state: AppState) -> Router {
    Router::new()
        .route(route_path, post(extract_sow))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// POST `<route_path>` - render the mock SOW
///
/// `BearerAuth` runs before the body is read, so a bad key always yields 401
/// whatever the payload looks like.
pub async fn extract_sow(
    _auth: BearerAuth,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<SowResponse>, ApiError> {
    let Json(request) = payload?;

    tracing::debug!(
        contract_type_len = request.contract_type.len(),
        filename_count = request.filenames.len(),
        "Rendering SOW"
    );

    Ok(Json(SowResponse::from(&request)))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        started_at: state.started_at.to_rfc3339(),
    })
}
