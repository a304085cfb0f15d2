use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonschema::JSONSchema;
use serde_json::{json, Value};

#[derive(Debug, serde::Serialize)]
struct ValidationErrorResponse {
    success: bool,
    error: String,
    details: Vec<ValidationDetail>,
}

#[derive(Debug, serde::Serialize)]
struct ValidationDetail {
    field: String,
    message: String,
}

fn reject(error: &str, field: &str, message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": error,
            "details": [{"field": field, "message": message}]
        })),
    )
        .into_response()
}

/// Validate request body against JSON schema
pub async fn validate_with_schema(
    schema: &'static JSONSchema,
    request: Request<Body>,
    next: Next<Body>,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match hyper::body::to_bytes(body).await {
        Ok(b) => b,
        Err(e) => return reject("Failed to read request body", "body", e.to_string()),
    };

    let payload: Value = match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => return reject("Invalid JSON", "body", e.to_string()),
    };

    if let Err(errors) = schema.validate(&payload) {
        let details: Vec<ValidationDetail> = errors
            .map(|e| ValidationDetail {
                field: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        tracing::debug!(errors = details.len(), "Request body failed schema validation");

        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                success: false,
                error: "Payload validation failed".to_string(),
                details,
            }),
        )
            .into_response();
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    next.run(request).await
}

pub async fn validate_register(request: Request<Body>, next: Next<Body>) -> Response {
    validate_with_schema(
        &crate::validation::schemas::SCHEMAS.register_v1,
        request,
        next,
    )
    .await
}

pub async fn validate_login(request: Request<Body>, next: Next<Body>) -> Response {
    validate_with_schema(&crate::validation::schemas::SCHEMAS.login_v1, request, next).await
}

pub async fn validate_vehicle(request: Request<Body>, next: Next<Body>) -> Response {
    validate_with_schema(
        &crate::validation::schemas::SCHEMAS.vehicle_v1,
        request,
        next,
    )
    .await
}

pub async fn validate_payment(request: Request<Body>, next: Next<Body>) -> Response {
    validate_with_schema(
        &crate::validation::schemas::SCHEMAS.payment_v1,
        request,
        next,
    )
    .await
}
