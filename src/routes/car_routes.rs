use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{CarListResponse, CarResponse, CarsQuery, CreateCarRequest, UpdateCarRequest};
use crate::services::CarService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_car))
        .route("/", get(find_cars))
        .route("/:id", get(car_info))
        .route("/:id", put(modify_car))
        .route("/:id", delete(remove_car))
}

async fn add_car(
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    request.validate()?;
    let service = CarService::new(state.pool.clone());
    let response = service.add_car(request).await?;
    Ok(Json(response))
}

async fn car_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let service = CarService::new(state.pool.clone());
    let response = service.car_info(id).await?;
    Ok(Json(response))
}

async fn find_cars(
    State(state): State<AppState>,
    Query(query): Query<CarsQuery>,
) -> Result<Json<CarListResponse>, AppError> {
    let service = CarService::new(state.pool.clone());
    let response = service.find_cars(&query).await?;
    Ok(Json(response))
}

async fn modify_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    request.validate()?;
    let service = CarService::new(state.pool.clone());
    let response = service.modify_car(id, request).await?;
    Ok(Json(response))
}

async fn remove_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = CarService::new(state.pool.clone());
    service.remove_car(id).await?;
    Ok(Json(json!({ "success": true })))
}
