//! Repositorio de Cars

use crate::models::{CarRecord, EngineType};
use crate::repositories::escape_like;
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar con ON CONFLICT DO NOTHING y releer por VIN. Con un VIN
    /// duplicado la fila existente gana y los valores nuevos se descartan.
    pub async fn create(&self, record: CarRecord) -> Result<CarRecord, AppError> {
        sqlx::query(
            r#"
            INSERT INTO car (id, vin, model, license_plate, seat_count, engine_type,
                             convertible, rating, manufacturer_id, deleted, date_created)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(&record.vin)
        .bind(&record.model)
        .bind(&record.license_plate)
        .bind(record.seat_count)
        .bind(record.engine_type)
        .bind(record.convertible)
        .bind(record.rating)
        .bind(record.manufacturer_id)
        .bind(record.deleted)
        .bind(record.date_created)
        .execute(&self.pool)
        .await?;

        let car = sqlx::query_as::<_, CarRecord>("SELECT * FROM car WHERE vin = $1")
            .bind(&record.vin)
            .fetch_one(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CarRecord>, AppError> {
        let car = sqlx::query_as::<_, CarRecord>("SELECT * FROM car WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    /// Lectura con `FOR UPDATE`: dos asignaciones concurrentes del mismo
    /// car serializan sobre esta fila.
    pub async fn find_by_id_locked(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<CarRecord>, AppError> {
        let car = sqlx::query_as::<_, CarRecord>("SELECT * FROM car WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(car)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM car WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Update parcial: sólo los campos presentes pisan el valor almacenado.
    pub async fn update_car_by_id(
        &self,
        id: Uuid,
        model: Option<&str>,
        license_plate: Option<&str>,
        seat_count: Option<i32>,
        engine_type: Option<EngineType>,
        convertible: Option<bool>,
        rating: Option<f64>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE car SET
                model = COALESCE($2, model),
                license_plate = COALESCE($3, license_plate),
                seat_count = COALESCE($4, seat_count),
                engine_type = COALESCE($5::engine_type, engine_type),
                convertible = COALESCE($6, convertible),
                rating = COALESCE($7, rating),
                manufacturer_id = COALESCE($8, manufacturer_id)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(model)
        .bind(license_plate)
        .bind(seat_count)
        .bind(engine_type)
        .bind(convertible)
        .bind(rating)
        .bind(manufacturer_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Búsqueda filtrada; substrings literales con ILIKE (se escapan `%` y
    /// `_`), rating con cotas inclusivas. Sin ORDER BY explícito: el orden
    /// es el del almacenamiento.
    pub async fn find_by_parameters(
        &self,
        license_plate: Option<&str>,
        rating_low_bound: Option<f64>,
        rating_high_bound: Option<f64>,
        vin: Option<&str>,
        manufacturer_id: Option<Uuid>,
        seat_count: Option<i32>,
        model: Option<&str>,
        engine_type: Option<EngineType>,
    ) -> Result<Vec<CarRecord>, AppError> {
        let cars = sqlx::query_as::<_, CarRecord>(
            r#"
            SELECT * FROM car
            WHERE ($1::text IS NULL OR license_plate ILIKE '%' || $1 || '%')
              AND ($2::double precision IS NULL OR rating >= $2)
              AND ($3::double precision IS NULL OR rating <= $3)
              AND ($4::text IS NULL OR vin ILIKE '%' || $4 || '%')
              AND ($5::uuid IS NULL OR manufacturer_id = $5)
              AND ($6::int IS NULL OR seat_count = $6)
              AND ($7::text IS NULL OR model ILIKE '%' || $7 || '%')
              AND ($8::engine_type IS NULL OR engine_type = $8)
            "#,
        )
        .bind(license_plate.map(escape_like))
        .bind(rating_low_bound)
        .bind(rating_high_bound)
        .bind(vin.map(escape_like))
        .bind(manufacturer_id)
        .bind(seat_count)
        .bind(model.map(escape_like))
        .bind(engine_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }
}
