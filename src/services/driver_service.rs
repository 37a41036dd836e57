//! Servicio de Drivers
//!
//! Dueño de la máquina de estados de asignación driver↔car y del armado
//! de la vista compuesta (driver + coordenada + car). Llama al Car Service
//! de forma síncrona dentro de la misma transacción de asignación.
//!
//! Política de asignación: el driver solicitante debe estar ONLINE. Si el
//! car lo tiene otro driver OFFLINE, se le quita primero (steal-on-offline);
//! si el otro driver está ONLINE, la asignación se rechaza.

use crate::dto::driver_dto::{
    CoordinateResponse, CreateDriverRequest, DriverListResponse, DriverResponse,
    DriversQuery, GeoLocationRequest, UpdateDriverRequest,
};
use crate::models::{DriverRecord, OnlineStatus};
use crate::repositories::{DriverRepository, GeolocationRepository};
use crate::services::CarService;
use crate::utils::errors::AppError;
use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DriverService {
    pool: PgPool,
    drivers: DriverRepository,
    geolocations: GeolocationRepository,
    cars: CarService,
}

/// Resultado de evaluar una asignación contra el estado actual del car.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum AssignmentAction {
    Assign,
    StealThenAssign { holder_id: Uuid },
}

/// Gate de asignación: el solicitante debe estar ONLINE. Se evalúa antes
/// de mirar el car, igual que el resto del flujo.
pub(crate) fn ensure_online(requester: &DriverRecord) -> Result<(), AppError> {
    if requester.online_status != OnlineStatus::Online {
        return Err(AppError::Validation(
            "Cannot assign Car, Driver is not ONLINE".to_string(),
        ));
    }
    Ok(())
}

/// Regla pura de conflicto: un holder distinto y ONLINE bloquea; un holder
/// OFFLINE pierde el car; el propio solicitante re-asigna sin conflicto.
pub(crate) fn resolve_conflict(
    requester_id: Uuid,
    holder: Option<&DriverRecord>,
) -> Result<AssignmentAction, AppError> {
    match holder {
        Some(holder) if holder.id != requester_id => {
            if holder.online_status == OnlineStatus::Online {
                Err(AppError::CarAlreadyInUse(
                    "Cannot assign Car, assigned to another Driver".to_string(),
                ))
            } else {
                Ok(AssignmentAction::StealThenAssign {
                    holder_id: holder.id,
                })
            }
        }
        _ => Ok(AssignmentAction::Assign),
    }
}

impl DriverService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            drivers: DriverRepository::new(pool.clone()),
            geolocations: GeolocationRepository::new(pool.clone()),
            cars: CarService::new(pool.clone()),
            pool,
        }
    }

    fn driver_not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!(
            "Driver with ID: '{}' hasn't been found in database",
            id
        ))
    }

    pub async fn create_driver(
        &self,
        request: CreateDriverRequest,
    ) -> Result<DriverResponse, AppError> {
        tracing::debug!("Attempt to create Driver '{}'", request.username);
        let record = DriverRecord {
            id: Uuid::new_v4(),
            username: request.username,
            password: request.password,
            date_created: Utc::now(),
            deleted: false,
            password_expired: false,
            online_status: OnlineStatus::Offline,
            car_id: None,
        };
        let created = self.drivers.create(record).await?;

        // Un driver recién creado no tiene coordenada ni car: el join sobra
        Ok(DriverResponse {
            id: created.id,
            username: created.username,
            date_created: created.date_created,
            online_status: created.online_status,
            deleted: created.deleted,
            password_expired: created.password_expired,
            coordinate: None,
            car: None,
        })
    }

    pub async fn get_driver(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::driver_not_found(id))?;
        self.merge_values(driver).await
    }

    pub async fn delete_driver(&self, id: Uuid) -> Result<(), AppError> {
        tracing::debug!("Attempt to delete Driver {}", id);
        if !self.drivers.delete_by_id(id).await? {
            return Err(Self::driver_not_found(id));
        }
        Ok(())
    }

    /// Asignación de car: todo el camino (driver, car, holder, steal,
    /// update) corre en una sola transacción con las filas bloqueadas, de
    /// modo que dos asignaciones concurrentes del mismo car serializan y
    /// exactamente una gana.
    pub async fn assign_car(&self, id: Uuid, car_id: Uuid) -> Result<(), AppError> {
        tracing::debug!("Attempt to assign Car {} to Driver {}", car_id, id);
        let mut tx = self.pool.begin().await?;

        let driver = self
            .drivers
            .find_by_id_locked(&mut tx, id)
            .await?
            .ok_or_else(|| Self::driver_not_found(id))?;
        ensure_online(&driver)?;

        self.cars.car_info_locked(&mut tx, car_id).await?;

        let holder = self.drivers.find_by_car_id_locked(&mut tx, car_id).await?;
        if let AssignmentAction::StealThenAssign { holder_id } =
            resolve_conflict(driver.id, holder.as_ref())?
        {
            tracing::debug!(
                "Stealing Car {} from OFFLINE Driver {}",
                car_id,
                holder_id
            );
            if !self.drivers.unassign_car_in(&mut tx, holder_id, car_id).await? {
                return Err(AppError::Validation(
                    "Failed to unassign Car from Driver".to_string(),
                ));
            }
        }

        // La fila del driver está bloqueada, así que el update tiene que
        // tocar exactamente una fila; cualquier otra cosa aborta la tx.
        if !self.drivers.assign_car(&mut tx, driver.id, car_id).await? {
            return Err(AppError::Internal(
                "Failed to assign Car to Driver".to_string(),
            ));
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn unassign_car(&self, id: Uuid, car_id: Uuid) -> Result<(), AppError> {
        tracing::debug!("Attempt to unassign Car {} from Driver {}", car_id, id);
        if !self.drivers.unassign_car(id, car_id).await? {
            return Err(AppError::Validation(
                "Failed to unassign Car from Driver".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn find_drivers(&self, query: &DriversQuery) -> Result<DriverListResponse, AppError> {
        let car_ids: Option<Vec<Uuid>> = if query.has_car_parameters() {
            let cars = self.cars.find_cars(&query.car_query()).await?;
            // Un sub-query sin resultados matchea cero drivers; el filtro
            // no se descarta
            Some(cars.cars.into_iter().map(|c| c.id).collect())
        } else {
            None
        };

        let records = self
            .drivers
            .find_by_parameters(
                query.username.as_deref(),
                query.online_status,
                query.deleted,
                query.password_expired,
                car_ids.as_deref(),
            )
            .await?;

        let mut drivers = Vec::with_capacity(records.len());
        for record in records {
            drivers.push(self.merge_values(record).await?);
        }
        Ok(DriverListResponse { drivers })
    }

    pub async fn merge_driver(
        &self,
        id: Uuid,
        update: UpdateDriverRequest,
    ) -> Result<DriverResponse, AppError> {
        let driver = self
            .drivers
            .update_status(id, update.online_status)
            .await?
            .ok_or_else(|| Self::driver_not_found(id))?;
        self.merge_values(driver).await
    }

    /// Upsert de la última coordenada. No valida que el driver exista.
    pub async fn update_location(
        &self,
        id: Uuid,
        location: &GeoLocationRequest,
    ) -> Result<(), AppError> {
        tracing::debug!("Attempt to update Geolocation for Driver {}", id);
        let latitude = Decimal::from_f64_retain(location.latitude)
            .ok_or_else(|| AppError::Validation("Invalid latitude value".to_string()))?;
        let longitude = Decimal::from_f64_retain(location.longitude)
            .ok_or_else(|| AppError::Validation("Invalid longitude value".to_string()))?;
        self.geolocations.save_or_update(id, latitude, longitude).await
    }

    /// Vista compuesta: fila de driver + coordenada + car. Una referencia
    /// de car colgante propaga el NotFound del Car Service, no se traga.
    async fn merge_values(&self, record: DriverRecord) -> Result<DriverResponse, AppError> {
        let coordinate = self
            .geolocations
            .find_by_id(record.id)
            .await?
            .map(|location| CoordinateResponse {
                latitude: location.latitude.to_f64().unwrap_or(0.0),
                longitude: location.longitude.to_f64().unwrap_or(0.0),
            });

        let car = match record.car_id {
            Some(car_id) => Some(self.cars.car_info(car_id).await?),
            None => None,
        };

        Ok(DriverResponse {
            id: record.id,
            username: record.username,
            date_created: record.date_created,
            online_status: record.online_status,
            deleted: record.deleted,
            password_expired: record.password_expired,
            coordinate,
            car,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(id: Uuid, online_status: OnlineStatus, car_id: Option<Uuid>) -> DriverRecord {
        DriverRecord {
            id,
            username: format!("driver-{}", id),
            password: "password00012".to_string(),
            date_created: Utc::now(),
            deleted: false,
            password_expired: false,
            online_status,
            car_id,
        }
    }

    #[test]
    fn offline_requester_is_rejected() {
        let requester = driver(Uuid::new_v4(), OnlineStatus::Offline, None);
        let err = ensure_online(&requester).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Cannot assign Car, Driver is not ONLINE"
        );
    }

    #[test]
    fn online_requester_passes_the_gate() {
        let requester = driver(Uuid::new_v4(), OnlineStatus::Online, None);
        assert!(ensure_online(&requester).is_ok());
    }

    #[test]
    fn free_car_is_assigned() {
        let action = resolve_conflict(Uuid::new_v4(), None).unwrap();
        assert_eq!(action, AssignmentAction::Assign);
    }

    #[test]
    fn online_holder_blocks_assignment() {
        let car_id = Uuid::new_v4();
        let holder = driver(Uuid::new_v4(), OnlineStatus::Online, Some(car_id));
        let err = resolve_conflict(Uuid::new_v4(), Some(&holder)).unwrap_err();
        assert!(matches!(err, AppError::CarAlreadyInUse(_)));
        assert_eq!(
            err.to_string(),
            "Car already in use: Cannot assign Car, assigned to another Driver"
        );
    }

    #[test]
    fn offline_holder_loses_the_car() {
        let car_id = Uuid::new_v4();
        let holder = driver(Uuid::new_v4(), OnlineStatus::Offline, Some(car_id));
        let action = resolve_conflict(Uuid::new_v4(), Some(&holder)).unwrap();
        assert_eq!(
            action,
            AssignmentAction::StealThenAssign {
                holder_id: holder.id
            }
        );
    }

    #[test]
    fn reassigning_own_car_is_idempotent() {
        let car_id = Uuid::new_v4();
        let requester = driver(Uuid::new_v4(), OnlineStatus::Online, Some(car_id));
        let action = resolve_conflict(requester.id, Some(&requester)).unwrap();
        assert_eq!(action, AssignmentAction::Assign);
    }

    #[test]
    fn driver_not_found_message_matches_contract() {
        let id = Uuid::parse_str("e3e82769-d0da-4fa2-9184-3e4f5baa8ab6").unwrap();
        let err = DriverService::driver_not_found(id);
        assert_eq!(
            err.to_string(),
            "Not found: Driver with ID: 'e3e82769-d0da-4fa2-9184-3e4f5baa8ab6' hasn't been found in database"
        );
    }
}
