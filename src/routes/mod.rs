//! Routers de la API
//!
//! Handlers finos: validan el request, instancian el servicio sobre el
//! pool del estado y traducen el resultado a JSON.

pub mod car_routes;
pub mod driver_routes;

use axum::response::Json;
use serde_json::json;

/// Endpoint de liveness
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-management",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
