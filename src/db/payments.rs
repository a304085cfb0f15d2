//! Payment persistence.
//!
//! `record_payment` is the only multi-statement write in the service. It locks
//! the vehicle row, prices the stay, inserts the payment and flips the vehicle
//! to paid inside one transaction. Any early return drops the transaction,
//! which rolls it back.

use crate::db::models::PaymentDetail;
use crate::domain::{Payment, PaymentRequest, PaymentStatus, PricingTable};
use crate::ports::{PaymentFilter, PaymentRepository, RepoResult, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LockedVehicle {
    vehicle_size: String,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
    payment_status: String,
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn record_payment(
        &self,
        request: PaymentRequest,
        pricing: &PricingTable,
    ) -> RepoResult<Payment> {
        let mut tx = self.pool.begin().await?;

        // Row lock: a concurrent payment for the same vehicle waits here and
        // then sees the committed 'paid' status.
        let vehicle = sqlx::query_as::<_, LockedVehicle>(
            "SELECT vehicle_size, entry_time, exit_time, payment_status \
             FROM vehicles WHERE vehicle_id = $1 FOR UPDATE",
        )
        .bind(request.vehicle_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            RepositoryError::NotFound(format!("Vehicle {} not found", request.vehicle_id))
        })?;

        let status: PaymentStatus = vehicle
            .payment_status
            .parse()
            .map_err(|e: String| RepositoryError::Database(sqlx::Error::Decode(e.into())))?;
        if status == PaymentStatus::Paid {
            return Err(RepositoryError::AlreadyPaid(request.vehicle_id));
        }

        let package_name: String =
            sqlx::query_scalar("SELECT package_name FROM packages WHERE pack_id = $1")
                .bind(request.package_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    RepositoryError::NotFound(format!("Package {} not found", request.package_id))
                })?;

        // A vehicle that already left keeps its recorded exit time.
        let exit_time = vehicle.exit_time.unwrap_or_else(Utc::now);
        let amount = pricing.quote(
            &vehicle.vehicle_size,
            &package_name,
            vehicle.entry_time,
            exit_time,
        )?;
        let payment_date = Utc::now();

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                vehicle_id, package_id, user_id, amount, payment_date, entry_time, exit_time
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING payment_id, vehicle_id, package_id, user_id, amount,
                      payment_date, entry_time, exit_time
            "#,
        )
        .bind(request.vehicle_id)
        .bind(request.package_id)
        .bind(request.operator_id)
        .bind(&amount)
        .bind(payment_date)
        .bind(vehicle.entry_time)
        .bind(exit_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match RepositoryError::from_write(e, "payment already recorded") {
            RepositoryError::Conflict(_) => RepositoryError::AlreadyPaid(request.vehicle_id),
            other => other,
        })?;

        let updated = sqlx::query(
            "UPDATE vehicles SET payment_status = $1, exit_time = $2 \
             WHERE vehicle_id = $3 AND payment_status = $4",
        )
        .bind(PaymentStatus::Paid.as_str())
        .bind(exit_time)
        .bind(request.vehicle_id)
        .bind(PaymentStatus::Unpaid.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            warn!(
                vehicle_id = request.vehicle_id,
                "Vehicle status changed under the payment transaction, rolling back"
            );
            tx.rollback().await?;
            return Err(RepositoryError::AlreadyPaid(request.vehicle_id));
        }

        tx.commit().await?;

        info!(
            payment_id = payment.payment_id,
            vehicle_id = payment.vehicle_id,
            amount = %payment.amount,
            "Payment recorded"
        );

        Ok(payment)
    }

    async fn list(&self, filter: &PaymentFilter) -> RepoResult<Vec<PaymentDetail>> {
        let payments = sqlx::query_as::<_, PaymentDetail>(
            r#"
            SELECT
                p.payment_id, p.vehicle_id, p.package_id, p.user_id, p.amount,
                p.payment_date, p.entry_time, p.exit_time,
                v.license_plate, v.vehicle_type, v.vehicle_size, v.owner_name, v.owner_phone,
                pk.package_name, u.username AS cashier
            FROM payments p
            JOIN vehicles v ON v.vehicle_id = p.vehicle_id
            JOIN packages pk ON pk.pack_id = p.package_id
            JOIN users u ON u.user_id = p.user_id
            WHERE ($1::timestamptz IS NULL OR p.payment_date >= $1)
              AND ($2::timestamptz IS NULL OR p.payment_date < $2)
              AND ($3::bigint IS NULL OR p.vehicle_id = $3)
            ORDER BY p.payment_date DESC
            LIMIT $4
            "#,
        )
        .bind(filter.from)
        .bind(filter.until)
        .bind(filter.vehicle_id)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }
}
