use crate::auth::AuthContext;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiQuery};
use crate::ports::PaymentFilter;
use crate::schemas::{
    PaymentCreateRequest, PaymentCreatedResponse, PaymentListQuery, PaymentListResponse,
};
use crate::use_cases::PaymentInput;
use crate::utils::date_range;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

const MAX_LIST_LIMIT: i64 = 500;

/// Settle a vehicle's stay
///
/// Prices the stay, records the payment and marks the vehicle paid in one
/// database transaction.
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = PaymentCreateRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentCreatedResponse),
        (status = 400, description = "Invalid payload or no price for this size/package"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Vehicle or package not found"),
        (status = 409, description = "Vehicle already paid")
    ),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(payload): ApiJson<PaymentCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state
        .process_payment
        .execute(PaymentInput {
            vehicle_id: payload.vehicle_id,
            package_id: payload.package_id,
            operator_id: auth.identity.user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentCreatedResponse {
            success: true,
            message: "Payment recorded successfully".to_string(),
            payment_id: payment.payment_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            entry_time: payment.entry_time,
            exit_time: payment.exit_time,
        }),
    ))
}

/// List payments, newest first
#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentListQuery),
    responses(
        (status = 200, description = "Payments", body = PaymentListResponse),
        (status = 400, description = "Invalid filter")
    ),
    tag = "Payments"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PaymentListQuery>,
) -> Result<Json<PaymentListResponse>, AppError> {
    let range = date_range::optional_range(query.start_date, query.end_date)
        .map_err(AppError::BadRequest)?;

    if let Some(limit) = query.limit {
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }
    }

    let filter = PaymentFilter {
        from: range.map(|(from, _)| from),
        until: range.map(|(_, until)| until),
        vehicle_id: query.vehicle_id,
        limit: query.limit,
    };

    let payments = state.payments.list(&filter).await?;
    Ok(Json(PaymentListResponse {
        success: true,
        payments,
    }))
}
