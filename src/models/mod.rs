//! Modelos del sistema
//!
//! Este módulo contiene los registros que mapean exactamente
//! al schema PostgreSQL (tablas manufacturer, car, driver, driver_geolocation).

pub mod car;
pub mod driver;
pub mod geolocation;
pub mod manufacturer;

pub use car::{CarRecord, EngineType};
pub use driver::{DriverRecord, OnlineStatus};
pub use geolocation::GeolocationRecord;
pub use manufacturer::ManufacturerRecord;
