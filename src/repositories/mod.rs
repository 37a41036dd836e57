//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad. Cada uno es dueño de su SQL; la lógica de
//! negocio vive en los servicios.

pub mod car_repository;
pub mod driver_repository;
pub mod geolocation_repository;
pub mod manufacturer_repository;

pub use car_repository::CarRepository;
pub use driver_repository::DriverRepository;
pub use geolocation_repository::GeolocationRepository;
pub use manufacturer_repository::ManufacturerRepository;

/// Escapa los metacaracteres de LIKE (`\`, `%`, `_`) para que los filtros
/// de substring los traten como texto literal.
pub(crate) fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("VW_Golf"), "VW\\_Golf");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
