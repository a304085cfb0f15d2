use crate::auth::UserIdentity;
use crate::db::models::{
    DailySummaryRow, Package, PaymentDetail, TimeAnalysisRow, Vehicle, VehicleHistory,
    VehicleTypeSummaryRow,
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// ---- auth ----

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserIdentity,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatusResponse {
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}

// ---- vehicles ----

#[derive(Debug, Deserialize, ToSchema)]
pub struct VehicleRequest {
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_size: String,
    pub owner_name: String,
    #[serde(default)]
    pub owner_phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleCreatedResponse {
    pub success: bool,
    pub message: String,
    pub vehicle_id: i64,
    pub entry_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleResponse {
    pub success: bool,
    pub vehicle: Vehicle,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleListResponse {
    pub success: bool,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleExitResponse {
    pub success: bool,
    pub message: String,
    pub exit_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleStatusResponse {
    pub success: bool,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleHistoryResponse {
    pub success: bool,
    pub history: VehicleHistory,
}

// ---- packages ----

/// Base price of a package for each vehicle size, absent when not offered.
#[derive(Debug, Serialize, ToSchema)]
pub struct PackagePricing {
    #[schema(value_type = Option<String>)]
    pub small: Option<BigDecimal>,
    #[schema(value_type = Option<String>)]
    pub medium: Option<BigDecimal>,
    #[schema(value_type = Option<String>)]
    pub big: Option<BigDecimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageWithPricing {
    #[serde(flatten)]
    pub package: Package,
    pub pricing: PackagePricing,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageListResponse {
    pub success: bool,
    pub packages: Vec<PackageWithPricing>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageResponse {
    pub success: bool,
    pub package: PackageWithPricing,
}

// ---- payments ----

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentCreateRequest {
    pub vehicle_id: i64,
    pub package_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentCreatedResponse {
    pub success: bool,
    pub message: String,
    pub payment_id: i64,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub payment_date: DateTime<Utc>,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaymentListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub vehicle_id: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentListResponse {
    pub success: bool,
    pub payments: Vec<PaymentDetail>,
}

// ---- reports ----

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailySummaryQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailySummaryResponse {
    pub success: bool,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub summary: Vec<DailySummaryRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimeAnalysisResponse {
    pub success: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub report: Vec<TimeAnalysisRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleTypeSummaryResponse {
    pub success: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub summary: Vec<VehicleTypeSummaryRow>,
}
