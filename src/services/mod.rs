//! Servicios de negocio
//!
//! Los servicios envuelven a los repositorios y son dueños de las reglas:
//! resolución de manufacturers, máquina de estados de asignación y armado
//! de las vistas compuestas.

pub mod car_service;
pub mod driver_service;

pub use car_service::CarService;
pub use driver_service::DriverService;
