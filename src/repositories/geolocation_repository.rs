//! Repositorio de geolocalización
//!
//! Upsert por driver_id. No valida que el driver exista: una coordenada
//! de un driver inexistente simplemente nunca aparece en ningún join.

use crate::models::GeolocationRecord;
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct GeolocationRepository {
    pool: PgPool,
}

impl GeolocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn save_or_update(
        &self,
        driver_id: Uuid,
        latitude: Decimal,
        longitude: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO driver_geolocation (driver_id, latitude, longitude, date_coordinate_updated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (driver_id) DO UPDATE SET
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                date_coordinate_updated = EXCLUDED.date_coordinate_updated
            "#,
        )
        .bind(driver_id)
        .bind(latitude)
        .bind(longitude)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, driver_id: Uuid) -> Result<Option<GeolocationRecord>, AppError> {
        let location = sqlx::query_as::<_, GeolocationRecord>(
            "SELECT * FROM driver_geolocation WHERE driver_id = $1",
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }
}
