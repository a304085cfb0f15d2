//! Payment domain entity.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A settled stay, as persisted by the payment transaction.
///
/// Created exactly once per vehicle intake and never modified afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Payment {
    pub payment_id: i64,
    pub vehicle_id: i64,
    pub package_id: i64,
    pub user_id: i64,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub payment_date: DateTime<Utc>,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
}

/// Everything the payment writer needs from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRequest {
    pub vehicle_id: i64,
    pub package_id: i64,
    /// Cashier recording the payment.
    pub operator_id: i64,
}
