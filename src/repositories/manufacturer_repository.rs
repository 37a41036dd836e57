//! Repositorio de Manufacturers
//!
//! find-or-create seguro frente a carreras: INSERT .. ON CONFLICT DO
//! NOTHING seguido de relectura garantizada por la clave única `name`.
//! Nunca check-de-existencia + insert en dos pasos.

use crate::models::ManufacturerRecord;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ManufacturerRepository {
    pool: PgPool,
}

impl ManufacturerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_or_create(&self, name: &str) -> Result<ManufacturerRecord, AppError> {
        sqlx::query(
            r#"
            INSERT INTO manufacturer (id, name, origin_country, date_created)
            VALUES ($1, $2, NULL, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let manufacturer =
            sqlx::query_as::<_, ManufacturerRecord>("SELECT * FROM manufacturer WHERE name = $1")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(manufacturer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ManufacturerRecord>, AppError> {
        let manufacturer =
            sqlx::query_as::<_, ManufacturerRecord>("SELECT * FROM manufacturer WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(manufacturer)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<ManufacturerRecord>, AppError> {
        let manufacturer =
            sqlx::query_as::<_, ManufacturerRecord>("SELECT * FROM manufacturer WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(manufacturer)
    }
}
