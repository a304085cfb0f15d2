use crate::auth::AuthContext;
use crate::domain::VehicleDetails;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::schemas::{
    MessageResponse, VehicleCreatedResponse, VehicleExitResponse, VehicleHistoryResponse,
    VehicleListResponse, VehicleRequest, VehicleResponse, VehicleStatusResponse,
};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

fn details_from(payload: &VehicleRequest) -> Result<VehicleDetails, AppError> {
    VehicleDetails::new(
        &payload.license_plate,
        &payload.vehicle_type,
        &payload.vehicle_size,
        &payload.owner_name,
        &payload.owner_phone,
    )
    .map_err(AppError::ValidationError)
}

fn vehicle_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Vehicle {} not found", id))
}

pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let vehicles = state.vehicles.list().await?;
    Ok(Json(VehicleListResponse {
        success: true,
        vehicles,
    }))
}

pub async fn list_active_vehicles(
    State(state): State<AppState>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let vehicles = state.vehicles.list_active().await?;
    Ok(Json(VehicleListResponse {
        success: true,
        vehicles,
    }))
}

/// Register a vehicle entering the bay
#[utoipa::path(
    post,
    path = "/api/vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle added", body = VehicleCreatedResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Plate already in the bay")
    ),
    tag = "Vehicles"
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(payload): ApiJson<VehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let details = details_from(&payload)?;
    let vehicle = state.vehicles.insert(&details).await?;

    tracing::info!(
        vehicle_id = vehicle.vehicle_id,
        license_plate = %vehicle.license_plate,
        operator = %auth.identity.username,
        "Vehicle entered the bay"
    );

    Ok((
        StatusCode::CREATED,
        Json(VehicleCreatedResponse {
            success: true,
            message: "Vehicle added successfully".to_string(),
            vehicle_id: vehicle.vehicle_id,
            entry_time: vehicle.entry_time,
        }),
    ))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<VehicleResponse>, AppError> {
    let vehicle = state
        .vehicles
        .find(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(VehicleResponse {
        success: true,
        vehicle,
    }))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<VehicleRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let details = details_from(&payload)?;
    let vehicle = state
        .vehicles
        .update(id, &details)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(VehicleResponse {
        success: true,
        vehicle,
    }))
}

/// Delete a vehicle record
#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted", body = MessageResponse),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle has a recorded payment")
    ),
    tag = "Vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.vehicles.delete(id).await? {
        return Err(vehicle_not_found(id));
    }

    tracing::info!(vehicle_id = id, operator = %auth.identity.username, "Vehicle deleted");
    Ok(Json(MessageResponse::ok("Vehicle deleted successfully")))
}

pub async fn record_exit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<VehicleExitResponse>, AppError> {
    let exit_time = state.vehicles.mark_exited(id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Vehicle {} not found or already exited", id))
    })?;

    tracing::info!(vehicle_id = id, %exit_time, "Vehicle left the bay");
    Ok(Json(VehicleExitResponse {
        success: true,
        message: "Vehicle exit recorded successfully".to_string(),
        exit_time,
    }))
}

pub async fn payment_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<VehicleStatusResponse>, AppError> {
    let vehicle = state
        .vehicles
        .find(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(VehicleStatusResponse {
        success: true,
        status: vehicle.payment_status,
    }))
}

pub async fn vehicle_history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<VehicleHistoryResponse>, AppError> {
    let history = state
        .vehicles
        .history(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(VehicleHistoryResponse {
        success: true,
        history,
    }))
}
