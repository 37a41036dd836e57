use crate::models::{CarRecord, EngineType, ManufacturerRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para crear un car
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 5, max = 64))]
    pub vin: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,

    #[validate(range(min = 1, max = 12))]
    pub seat_count: i32,

    pub engine_type: EngineType,

    pub convertible: Option<bool>,

    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f64>,

    /// Nombre del manufacturer; se resuelve o crea al persistir
    #[validate(length(min = 1, max = 100))]
    pub manufacturer: String,
}

// Request para actualizar un car: sólo los campos presentes pisan valores
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,

    #[validate(range(min = 1, max = 12))]
    pub seat_count: Option<i32>,

    pub engine_type: Option<EngineType>,

    pub convertible: Option<bool>,

    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f64>,

    #[validate(length(min = 1, max = 100))]
    pub manufacturer: Option<String>,
}

// Filtros de búsqueda de cars (query params)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarsQuery {
    pub license_plate: Option<String>,
    pub rating_low_bound: Option<f64>,
    pub rating_high_bound: Option<f64>,
    pub vin: Option<String>,
    pub engine_type: Option<EngineType>,
    pub seat_count: Option<i32>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerResponse {
    pub id: Uuid,
    pub name: String,
    pub origin_country: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl From<ManufacturerRecord> for ManufacturerResponse {
    fn from(record: ManufacturerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            origin_country: record.origin_country,
            date_created: record.date_created,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub vin: String,
    pub model: String,
    pub license_plate: String,
    pub seat_count: i32,
    pub engine_type: EngineType,
    pub convertible: bool,
    pub rating: f64,
    pub manufacturer: ManufacturerResponse,
    pub deleted: bool,
    pub date_created: DateTime<Utc>,
}

impl CarResponse {
    pub fn from_record(record: CarRecord, manufacturer: ManufacturerResponse) -> Self {
        Self {
            id: record.id,
            vin: record.vin,
            model: record.model,
            license_plate: record.license_plate,
            seat_count: record.seat_count,
            engine_type: record.engine_type,
            convertible: record.convertible,
            rating: record.rating,
            manufacturer,
            deleted: record.deleted,
            date_created: record.date_created,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CarListResponse {
    pub cars: Vec<CarResponse>,
}
