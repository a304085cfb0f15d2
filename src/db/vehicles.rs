use crate::db::models::{Vehicle, VehicleHistory};
use crate::domain::VehicleDetails;
use crate::ports::{RepoResult, RepositoryError, VehicleRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const VEHICLE_COLUMNS: &str = "vehicle_id, license_plate, vehicle_type, vehicle_size, \
     owner_name, owner_phone, entry_time, exit_time, payment_status";

#[derive(Clone)]
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn plate_conflict(details: &VehicleDetails) -> String {
    format!(
        "Vehicle {} is already in the washing bay",
        details.license_plate
    )
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self) -> RepoResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles ORDER BY entry_time DESC",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    async fn list_active(&self) -> RepoResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles WHERE exit_time IS NULL ORDER BY entry_time ASC",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    async fn find(&self, id: i64) -> RepoResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles WHERE vehicle_id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vehicle)
    }

    async fn insert(&self, details: &VehicleDetails) -> RepoResult<Vehicle> {
        // The partial unique index on active plates settles racing intakes.
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (
                license_plate, vehicle_type, vehicle_size, owner_name, owner_phone,
                entry_time, payment_status
            ) VALUES ($1, $2, $3, $4, $5, $6, 'unpaid')
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(&details.license_plate)
        .bind(&details.vehicle_type)
        .bind(details.vehicle_size.as_str())
        .bind(&details.owner_name)
        .bind(&details.owner_phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, plate_conflict(details)))
    }

    async fn update(&self, id: i64, details: &VehicleDetails) -> RepoResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET license_plate = $1, vehicle_type = $2, vehicle_size = $3,
                owner_name = $4, owner_phone = $5
            WHERE vehicle_id = $6
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(&details.license_plate)
        .bind(&details.vehicle_type)
        .bind(details.vehicle_size.as_str())
        .bind(&details.owner_name)
        .bind(&details.owner_phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, plate_conflict(details)))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE vehicle_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_write(
                    e,
                    format!("Vehicle {} has a recorded payment and cannot be deleted", id),
                )
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_exited(&self, id: i64) -> RepoResult<Option<DateTime<Utc>>> {
        let exit_time: Option<DateTime<Utc>> = sqlx::query_scalar(
            "UPDATE vehicles SET exit_time = $1 WHERE vehicle_id = $2 AND exit_time IS NULL \
             RETURNING exit_time",
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(exit_time)
    }

    async fn history(&self, id: i64) -> RepoResult<Option<VehicleHistory>> {
        let history = sqlx::query_as::<_, VehicleHistory>(
            r#"
            SELECT
                v.vehicle_id, v.license_plate, v.vehicle_type, v.vehicle_size,
                v.owner_name, v.owner_phone, v.entry_time, v.exit_time, v.payment_status,
                FLOOR(EXTRACT(EPOCH FROM (COALESCE(v.exit_time, NOW()) - v.entry_time)) / 60)::BIGINT
                    AS minutes_in_bay,
                p.amount, p.payment_date, pk.package_name
            FROM vehicles v
            LEFT JOIN payments p ON p.vehicle_id = v.vehicle_id
            LEFT JOIN packages pk ON pk.pack_id = p.package_id
            WHERE v.vehicle_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(history)
    }
}
