//! Repositorio de Drivers
//!
//! Incluye variantes `*_locked` que toman una conexión de transacción y
//! bloquean la fila (`FOR UPDATE`) para el camino de asignación de Car.

use crate::models::{DriverRecord, OnlineStatus};
use crate::repositories::escape_like;
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar con ON CONFLICT DO NOTHING y releer por username.
    /// Un username duplicado devuelve la fila ya existente, sin pisar nada.
    pub async fn create(&self, record: DriverRecord) -> Result<DriverRecord, AppError> {
        sqlx::query(
            r#"
            INSERT INTO driver (id, username, password, date_created, deleted, password_expired, online_status, car_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(&record.username)
        .bind(&record.password)
        .bind(record.date_created)
        .bind(record.deleted)
        .bind(record.password_expired)
        .bind(record.online_status)
        .bind(record.car_id)
        .execute(&self.pool)
        .await?;

        let driver = sqlx::query_as::<_, DriverRecord>("SELECT * FROM driver WHERE username = $1")
            .bind(&record.username)
            .fetch_one(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DriverRecord>, AppError> {
        let driver = sqlx::query_as::<_, DriverRecord>("SELECT * FROM driver WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_by_id_locked(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<DriverRecord>, AppError> {
        let driver =
            sqlx::query_as::<_, DriverRecord>("SELECT * FROM driver WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(driver)
    }

    /// Driver que tiene asignado el car dado, bloqueado dentro de la
    /// transacción de asignación.
    pub async fn find_by_car_id_locked(
        &self,
        conn: &mut PgConnection,
        car_id: Uuid,
    ) -> Result<Option<DriverRecord>, AppError> {
        let driver =
            sqlx::query_as::<_, DriverRecord>("SELECT * FROM driver WHERE car_id = $1 FOR UPDATE")
                .bind(car_id)
                .fetch_optional(conn)
                .await?;

        Ok(driver)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM driver WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn assign_car(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        car_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE driver SET car_id = $2 WHERE id = $1")
            .bind(id)
            .bind(car_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Quita la referencia sólo si el car almacenado coincide con el dado;
    /// protege contra des-asignar una relación que ya cambió.
    pub async fn unassign_car(&self, id: Uuid, car_id: Uuid) -> Result<bool, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.unassign_car_in(&mut conn, id, car_id).await
    }

    pub async fn unassign_car_in(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        car_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE driver SET car_id = NULL WHERE id = $1 AND car_id = $2")
            .bind(id)
            .bind(car_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        online_status: OnlineStatus,
    ) -> Result<Option<DriverRecord>, AppError> {
        let driver = sqlx::query_as::<_, DriverRecord>(
            "UPDATE driver SET online_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(online_status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    /// Búsqueda filtrada. Cada parámetro en NULL se ignora; un array de
    /// car_ids vacío NO se ignora: `car_id = ANY('{}')` no matchea a nadie.
    /// El filtro de username busca substring literal: `%` y `_` se escapan.
    pub async fn find_by_parameters(
        &self,
        username: Option<&str>,
        online_status: Option<OnlineStatus>,
        deleted: Option<bool>,
        password_expired: Option<bool>,
        car_ids: Option<&[Uuid]>,
    ) -> Result<Vec<DriverRecord>, AppError> {
        let drivers = sqlx::query_as::<_, DriverRecord>(
            r#"
            SELECT * FROM driver
            WHERE ($1::text IS NULL OR username ILIKE '%' || $1 || '%')
              AND ($2::online_status IS NULL OR online_status = $2)
              AND ($3::boolean IS NULL OR deleted = $3)
              AND ($4::boolean IS NULL OR password_expired = $4)
              AND ($5::uuid[] IS NULL OR car_id = ANY($5))
            "#,
        )
        .bind(username.map(escape_like))
        .bind(online_status)
        .bind(deleted)
        .bind(password_expired)
        .bind(car_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }
}
