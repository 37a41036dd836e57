//! Backend de gestión de flota: drivers, cars, manufacturers y
//! geolocalización, con asignación driver↔car como núcleo de negocio.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .nest("/api/car", routes::car_routes::create_car_router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
