//! Middleware for request processing
//!
//! - request id propagation and request logging
//! - the CORS policy
//!
//! Request and response bodies are never logged.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use uuid::Uuid;

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware
///
/// Reuses an incoming `x-request-id` or assigns a fresh UUID, logs the start
/// and completion of the request with timing, and echoes the id on the
/// response.
pub async fn request_logging_middleware(mut request: Request, next: Next) -> Response {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);
    let existing = request.headers().get(&header_name).cloned();
    let request_id = match existing {
        Some(value) => value,
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            request
                .headers_mut()
                .insert(header_name.clone(), generated.clone());
            generated
        }
    };
    let request_id_str = request_id.to_str().unwrap_or("invalid").to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    tracing::info!(
        request_id = %request_id_str,
        method = %method,
        path = %path,
        "Request started"
    );

    let mut response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        request_id = %request_id_str,
        method = %method,
        path = %path,
        status = %response.status(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response.headers_mut().insert(header_name, request_id);
    response
}

/// CORS policy: any origin, method and header, with credentials
///
/// Wildcards cannot be combined with credentials, so the origin, method and
/// headers of the request are mirrored back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
