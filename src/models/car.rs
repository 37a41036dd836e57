//! Modelo de Car
//!
//! Mapea a la tabla `car`. Cada Car pertenece exactamente a un
//! Manufacturer (`manufacturer_id`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de motor - mapea al ENUM engine_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "engine_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EngineType {
    Oil,
    Electric,
    Gas,
    Hybrid,
}

#[derive(Debug, Clone, FromRow)]
pub struct CarRecord {
    pub id: Uuid,
    pub vin: String,
    pub model: String,
    pub license_plate: String,
    pub seat_count: i32,
    pub engine_type: EngineType,
    pub convertible: bool,
    pub rating: f64,
    pub manufacturer_id: Uuid,
    pub deleted: bool,
    pub date_created: DateTime<Utc>,
}
