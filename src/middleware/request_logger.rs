use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with an id and logs its outcome.
///
/// A well-formed `x-request-id` sent by the client is kept, otherwise a fresh
/// UUID is assigned. The id is echoed on the response.
pub async fn request_logger_middleware(mut req: Request<Body>, next: Next<Body>) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4)
        .to_string();
    let header_value = HeaderValue::from_str(&request_id).ok();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    if let Some(value) = &header_value {
        req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let mut response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis();
    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = %latency_ms,
            "Request failed"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = %latency_ms,
            "Request completed"
        );
    }

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
