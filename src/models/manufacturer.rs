//! Modelo de Manufacturer
//!
//! Mapea a la tabla `manufacturer`. Se crea de forma perezosa la primera
//! vez que un Car lo referencia por nombre.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ManufacturerRecord {
    pub id: Uuid,
    pub name: String,
    pub origin_country: Option<String>,
    pub date_created: DateTime<Utc>,
}
