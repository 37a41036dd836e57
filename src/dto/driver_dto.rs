use crate::dto::car_dto::{CarResponse, CarsQuery};
use crate::models::{EngineType, OnlineStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para crear un driver
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 64))]
    pub username: String,

    #[validate(length(min = 8, max = 64))]
    pub password: String,
}

// Update parcial de driver; por ahora sólo el estado online
#[derive(Debug, Deserialize)]
pub struct UpdateDriverRequest {
    pub online_status: OnlineStatus,
}

// Coordenada entrante para update-location
#[derive(Debug, Deserialize, Validate)]
pub struct GeoLocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinateResponse {
    pub latitude: f64,
    pub longitude: f64,
}

/// Vista compuesta de driver: fila + coordenada + car (ambos opcionales).
/// El password nunca viaja en la respuesta.
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub username: String,
    pub date_created: DateTime<Utc>,
    pub online_status: OnlineStatus,
    pub deleted: bool,
    pub password_expired: bool,
    pub coordinate: Option<CoordinateResponse>,
    pub car: Option<CarResponse>,
}

#[derive(Debug, Serialize)]
pub struct DriverListResponse {
    pub drivers: Vec<DriverResponse>,
}

// Filtros de búsqueda de drivers; los campos de car disparan una
// sub-búsqueda de cars cuyo resultado se intersecta por car_id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriversQuery {
    pub username: Option<String>,
    pub online_status: Option<OnlineStatus>,
    pub deleted: Option<bool>,
    pub password_expired: Option<bool>,

    // Atributos de car
    pub license_plate: Option<String>,
    pub rating_low_bound: Option<f64>,
    pub rating_high_bound: Option<f64>,
    pub vin: Option<String>,
    pub engine_type: Option<EngineType>,
    pub seat_count: Option<i32>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
}

impl DriversQuery {
    pub fn has_car_parameters(&self) -> bool {
        self.license_plate.is_some()
            || self.rating_low_bound.is_some()
            || self.rating_high_bound.is_some()
            || self.vin.is_some()
            || self.engine_type.is_some()
            || self.seat_count.is_some()
            || self.model.is_some()
            || self.manufacturer.is_some()
    }

    pub fn car_query(&self) -> CarsQuery {
        CarsQuery {
            license_plate: self.license_plate.clone(),
            rating_low_bound: self.rating_low_bound,
            rating_high_bound: self.rating_high_bound,
            vin: self.vin.clone(),
            engine_type: self.engine_type,
            seat_count: self.seat_count,
            model: self.model.clone(),
            manufacturer: self.manufacturer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_only_filters_have_no_car_parameters() {
        let query = DriversQuery {
            username: Some("john".to_string()),
            online_status: Some(OnlineStatus::Online),
            deleted: Some(false),
            password_expired: Some(false),
            ..Default::default()
        };
        assert!(!query.has_car_parameters());
    }

    #[test]
    fn any_car_attribute_triggers_car_sub_query() {
        let query = DriversQuery {
            rating_low_bound: Some(4.0),
            ..Default::default()
        };
        assert!(query.has_car_parameters());

        let query = DriversQuery {
            manufacturer: Some("BMW".to_string()),
            ..Default::default()
        };
        assert!(query.has_car_parameters());
    }

    #[test]
    fn car_query_carries_all_car_filters() {
        let query = DriversQuery {
            username: Some("ignored-for-cars".to_string()),
            vin: Some("WDD".to_string()),
            seat_count: Some(4),
            engine_type: Some(EngineType::Electric),
            ..Default::default()
        };
        let car_query = query.car_query();
        assert_eq!(car_query.vin.as_deref(), Some("WDD"));
        assert_eq!(car_query.seat_count, Some(4));
        assert_eq!(car_query.engine_type, Some(EngineType::Electric));
        assert!(car_query.model.is_none());
    }
}
