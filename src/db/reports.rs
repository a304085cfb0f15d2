//! Read-side aggregates over settled payments. Bounds are half-open `[from, until)`.

use crate::db::models::{DailySummaryRow, TimeAnalysisRow, VehicleTypeSummaryRow};
use crate::ports::{RepoResult, ReportRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn daily_summary(
    pool: &PgPool,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> sqlx::Result<Vec<DailySummaryRow>> {
    sqlx::query_as::<_, DailySummaryRow>(
        r#"
        SELECT
            v.vehicle_size,
            pk.package_name,
            COUNT(*) AS total_payments,
            SUM(p.amount) AS total_revenue
        FROM payments p
        JOIN vehicles v ON v.vehicle_id = p.vehicle_id
        JOIN packages pk ON pk.pack_id = p.package_id
        WHERE p.payment_date >= $1 AND p.payment_date < $2
        GROUP BY v.vehicle_size, pk.package_name
        ORDER BY v.vehicle_size, pk.package_name
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await
}

async fn time_analysis(
    pool: &PgPool,
    from: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
) -> sqlx::Result<Vec<TimeAnalysisRow>> {
    sqlx::query_as::<_, TimeAnalysisRow>(
        r#"
        SELECT
            v.vehicle_type,
            AVG(EXTRACT(EPOCH FROM (p.exit_time - p.entry_time)) / 60)::FLOAT8 AS avg_time_minutes,
            COUNT(*) AS total_vehicles
        FROM payments p
        JOIN vehicles v ON v.vehicle_id = p.vehicle_id
        WHERE ($1::timestamptz IS NULL OR p.payment_date >= $1)
          AND ($2::timestamptz IS NULL OR p.payment_date < $2)
        GROUP BY v.vehicle_type
        ORDER BY avg_time_minutes DESC
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await
}

async fn vehicle_type_summary(
    pool: &PgPool,
    from: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
) -> sqlx::Result<Vec<VehicleTypeSummaryRow>> {
    sqlx::query_as::<_, VehicleTypeSummaryRow>(
        r#"
        SELECT
            v.vehicle_type,
            COUNT(*) AS total_payments,
            SUM(p.amount) AS total_revenue
        FROM payments p
        JOIN vehicles v ON v.vehicle_id = p.vehicle_id
        WHERE ($1::timestamptz IS NULL OR p.payment_date >= $1)
          AND ($2::timestamptz IS NULL OR p.payment_date < $2)
        GROUP BY v.vehicle_type
        ORDER BY total_revenue DESC
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn daily_summary(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<DailySummaryRow>> {
        Ok(daily_summary(&self.pool, from, until).await?)
    }

    async fn time_analysis(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<TimeAnalysisRow>> {
        Ok(time_analysis(&self.pool, from, until).await?)
    }

    async fn vehicle_type_summary(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VehicleTypeSummaryRow>> {
        Ok(vehicle_type_summary(&self.pool, from, until).await?)
    }
}
