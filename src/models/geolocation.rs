//! Modelo de geolocalización
//!
//! Última coordenada conocida por driver (relación uno a uno, upsert).
//! No es una entidad independiente: siempre se accede vía su driver.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct GeolocationRecord {
    pub driver_id: Uuid,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub date_coordinate_updated: DateTime<Utc>,
}
