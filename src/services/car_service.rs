//! Servicio de Cars
//!
//! Envuelve CarRepository + ManufacturerRepository. Resuelve (o crea) el
//! manufacturer al dar de alta o modificar un car y arma las vistas
//! completas de Car.

use crate::dto::car_dto::{
    CarListResponse, CarResponse, CarsQuery, CreateCarRequest, ManufacturerResponse,
    UpdateCarRequest,
};
use crate::models::CarRecord;
use crate::repositories::{CarRepository, ManufacturerRepository};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct CarService {
    cars: CarRepository,
    manufacturers: ManufacturerRepository,
}

impl CarService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            manufacturers: ManufacturerRepository::new(pool),
        }
    }

    pub(crate) fn car_not_found(car_id: Uuid) -> AppError {
        AppError::NotFound(format!(
            "Car with ID: '{}' hasn't been found in database",
            car_id
        ))
    }

    pub async fn add_car(&self, request: CreateCarRequest) -> Result<CarResponse, AppError> {
        tracing::debug!("Attempt to add a Car with VIN {}", request.vin);
        let manufacturer = self.manufacturers.find_or_create(&request.manufacturer).await?;

        let record = CarRecord {
            id: Uuid::new_v4(),
            vin: request.vin,
            model: request.model,
            license_plate: request.license_plate,
            seat_count: request.seat_count,
            engine_type: request.engine_type,
            convertible: request.convertible.unwrap_or(false),
            rating: request.rating.unwrap_or(0.0),
            manufacturer_id: manufacturer.id,
            deleted: false,
            date_created: Utc::now(),
        };
        let created = self.cars.create(record).await?;

        // Con un VIN duplicado la fila devuelta es la ya existente y puede
        // apuntar a otro manufacturer
        let manufacturer = if created.manufacturer_id == manufacturer.id {
            ManufacturerResponse::from(manufacturer)
        } else {
            self.manufacturer_view(created.manufacturer_id).await?
        };

        Ok(CarResponse::from_record(created, manufacturer))
    }

    pub async fn car_info(&self, car_id: Uuid) -> Result<CarResponse, AppError> {
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| Self::car_not_found(car_id))?;
        let manufacturer = self.manufacturer_view(car.manufacturer_id).await?;
        Ok(CarResponse::from_record(car, manufacturer))
    }

    /// Lectura del car dentro de la transacción de asignación, con la fila
    /// bloqueada. La usa el Driver Service.
    pub async fn car_info_locked(
        &self,
        conn: &mut PgConnection,
        car_id: Uuid,
    ) -> Result<CarRecord, AppError> {
        self.cars
            .find_by_id_locked(conn, car_id)
            .await?
            .ok_or_else(|| Self::car_not_found(car_id))
    }

    pub async fn find_cars(&self, query: &CarsQuery) -> Result<CarListResponse, AppError> {
        let manufacturer = match &query.manufacturer {
            Some(name) => Some(self.manufacturers.find_by_name(name).await?.ok_or_else(|| {
                AppError::Validation(
                    "Cannot use Manufacturer parameter, such manufacturer doesn't exist in database"
                        .to_string(),
                )
            })?),
            None => None,
        };

        let records = self
            .cars
            .find_by_parameters(
                query.license_plate.as_deref(),
                query.rating_low_bound,
                query.rating_high_bound,
                query.vin.as_deref(),
                manufacturer.as_ref().map(|m| m.id),
                query.seat_count,
                query.model.as_deref(),
                query.engine_type,
            )
            .await?;

        let resolved = manufacturer.map(ManufacturerResponse::from);
        let mut cars = Vec::with_capacity(records.len());
        for record in records {
            let view = match &resolved {
                Some(m) => m.clone(),
                None => self.manufacturer_view(record.manufacturer_id).await?,
            };
            cars.push(CarResponse::from_record(record, view));
        }

        Ok(CarListResponse { cars })
    }

    pub async fn modify_car(
        &self,
        car_id: Uuid,
        update: UpdateCarRequest,
    ) -> Result<CarResponse, AppError> {
        tracing::debug!("Attempt to modify Car {}", car_id);
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| Self::car_not_found(car_id))?;

        let manufacturer_id = match &update.manufacturer {
            Some(name) => Some(self.manufacturers.find_or_create(name).await?.id),
            None => None,
        };

        self.cars
            .update_car_by_id(
                car.id,
                update.model.as_deref(),
                update.license_plate.as_deref(),
                update.seat_count,
                update.engine_type,
                update.convertible,
                update.rating,
                manufacturer_id,
            )
            .await?;

        self.car_info(car.id).await
    }

    pub async fn remove_car(&self, car_id: Uuid) -> Result<(), AppError> {
        tracing::debug!("Attempt to remove Car {}", car_id);
        if !self.cars.delete_by_id(car_id).await? {
            return Err(Self::car_not_found(car_id));
        }
        Ok(())
    }

    async fn manufacturer_view(
        &self,
        manufacturer_id: Uuid,
    ) -> Result<ManufacturerResponse, AppError> {
        let manufacturer = self
            .manufacturers
            .find_by_id(manufacturer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Manufacturer with ID: '{}' hasn't been found in database",
                    manufacturer_id
                ))
            })?;
        Ok(manufacturer.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_not_found_message_matches_contract() {
        let id = Uuid::parse_str("7d4de459-3de9-4f56-b07c-a0f6d7e16a57").unwrap();
        let err = CarService::car_not_found(id);
        assert_eq!(
            err.to_string(),
            "Not found: Car with ID: '7d4de459-3de9-4f56-b07c-a0f6d7e16a57' hasn't been found in database"
        );
    }
}
