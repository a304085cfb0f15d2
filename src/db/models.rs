use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_size: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub payment_status: String,
}

/// A vehicle with time spent in the bay and its payment, if settled.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct VehicleHistory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub minutes_in_bay: i64,
    #[schema(value_type = Option<String>)]
    pub amount: Option<BigDecimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub package_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Package {
    pub pack_id: i64,
    pub package_name: String,
    pub description: Option<String>,
}

/// Payment row joined with the vehicle, package and cashier it refers to.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct PaymentDetail {
    pub payment_id: i64,
    pub vehicle_id: i64,
    pub package_id: i64,
    pub user_id: i64,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub payment_date: DateTime<Utc>,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_size: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub package_name: String,
    pub cashier: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct DailySummaryRow {
    pub vehicle_size: String,
    pub package_name: String,
    pub total_payments: i64,
    #[schema(value_type = String)]
    pub total_revenue: BigDecimal,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct TimeAnalysisRow {
    pub vehicle_type: String,
    pub avg_time_minutes: f64,
    pub total_vehicles: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct VehicleTypeSummaryRow {
    pub vehicle_type: String,
    pub total_payments: i64,
    #[schema(value_type = String)]
    pub total_revenue: BigDecimal,
}
