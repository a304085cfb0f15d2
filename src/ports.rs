//! Repository interfaces.
//! Handlers and use cases depend on these traits; `db` provides the Postgres side.

use crate::db::models::{
    DailySummaryRow, Package, PaymentDetail, TimeAnalysisRow, User, Vehicle, VehicleHistory,
    VehicleTypeSummaryRow,
};
use crate::domain::{Payment, PaymentRequest, PricingError, PricingTable, VehicleDetails};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Vehicle {0} has already been paid for")]
    AlreadyPaid(i64),
    #[error(transparent)]
    InvalidPricing(#[from] PricingError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl RepositoryError {
    /// Maps constraint violations to `Conflict`, everything else to `Database`.
    pub fn from_write(err: sqlx::Error, conflict_message: impl Into<String>) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|c| c.into_owned());
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => {
                Self::Conflict(conflict_message.into())
            }
            _ => Self::Database(err),
        }
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<User>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Vehicle>>;
    /// Vehicles still in the bay.
    async fn list_active(&self) -> RepoResult<Vec<Vehicle>>;
    async fn find(&self, id: i64) -> RepoResult<Option<Vehicle>>;
    async fn insert(&self, details: &VehicleDetails) -> RepoResult<Vehicle>;
    async fn update(&self, id: i64, details: &VehicleDetails) -> RepoResult<Option<Vehicle>>;
    /// Returns false when no row had that id.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    /// Stamps the exit time of a vehicle still in the bay.
    async fn mark_exited(&self, id: i64) -> RepoResult<Option<DateTime<Utc>>>;
    async fn history(&self, id: i64) -> RepoResult<Option<VehicleHistory>>;
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Package>>;
    async fn find(&self, id: i64) -> RepoResult<Option<Package>>;
}

/// Filters for the payment listing. Bounds are a half-open range.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub vehicle_id: Option<i64>,
    pub limit: Option<i64>,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Records a payment and marks the vehicle paid as one transaction.
    ///
    /// Either both writes are committed or neither is.
    async fn record_payment(
        &self,
        request: PaymentRequest,
        pricing: &PricingTable,
    ) -> RepoResult<Payment>;
    async fn list(&self, filter: &PaymentFilter) -> RepoResult<Vec<PaymentDetail>>;
}

/// Aggregates over settled payments. Bounds are half-open `[from, until)`.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn daily_summary(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<DailySummaryRow>>;
    async fn time_analysis(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<TimeAnalysisRow>>;
    async fn vehicle_type_summary(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VehicleTypeSummaryRow>>;
}
