//! DTOs de la API
//!
//! Requests, responses y queries de búsqueda. Los registros de base de
//! datos nunca se serializan directamente.

pub mod car_dto;
pub mod driver_dto;
