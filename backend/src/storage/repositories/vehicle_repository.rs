use async_trait::async_trait;
use shared::{RentalVehicle, VehicleStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::repositories::decode_text;
use crate::storage::traits::RecordStorage;

/// Repository for the rental fleet
#[derive(Clone)]
pub struct VehicleRepository {
    db: DbConnection,
}

impl VehicleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn vehicle_from_row(row: &SqliteRow) -> sqlx::Result<RentalVehicle> {
    Ok(RentalVehicle {
        id: row.try_get("id")?,
        vehicle_number: row.try_get("vehicle_number")?,
        model: row.try_get("model")?,
        driver_name: row.try_get("driver_name")?,
        monthly_rent: row.try_get("monthly_rent")?,
        status: decode_text::<VehicleStatus>(row, "status")?,
        acquired_date: row.try_get("acquired_date")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<RentalVehicle> for VehicleRepository {
    async fn store(&self, vehicle: &RentalVehicle) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO rental_vehicles (
                id, vehicle_number, model, driver_name, monthly_rent,
                status, acquired_date, description, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.vehicle_number)
        .bind(&vehicle.model)
        .bind(&vehicle.driver_name)
        .bind(&vehicle.monthly_rent)
        .bind(vehicle.status.as_str())
        .bind(&vehicle.acquired_date)
        .bind(&vehicle.description)
        .bind(&vehicle.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<RentalVehicle>> {
        let row = sqlx::query(
            r#"
            SELECT id, vehicle_number, model, driver_name, monthly_rent,
                   status, acquired_date, description, created_at
            FROM rental_vehicles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(vehicle_from_row).transpose()
    }

    async fn list(&self) -> sqlx::Result<Vec<RentalVehicle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, vehicle_number, model, driver_name, monthly_rent,
                   status, acquired_date, description, created_at
            FROM rental_vehicles
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(vehicle_from_row).collect()
    }

    async fn update(&self, vehicle: &RentalVehicle) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE rental_vehicles
            SET vehicle_number = ?, model = ?, driver_name = ?, monthly_rent = ?,
                status = ?, acquired_date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.vehicle_number)
        .bind(&vehicle.model)
        .bind(&vehicle.driver_name)
        .bind(&vehicle.monthly_rent)
        .bind(vehicle.status.as_str())
        .bind(&vehicle.acquired_date)
        .bind(&vehicle.description)
        .bind(&vehicle.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM rental_vehicles WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
