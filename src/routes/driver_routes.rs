use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::{
    CreateDriverRequest, DriverListResponse, DriverResponse, DriversQuery, GeoLocationRequest,
    UpdateDriverRequest,
};
use crate::services::DriverService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_driver))
        .route("/", get(find_drivers))
        .route("/:id", get(get_driver))
        .route("/:id", patch(merge_driver))
        .route("/:id", delete(delete_driver))
        .route("/:id/car/:car_id", post(assign_car))
        .route("/:id/car/:car_id", delete(unassign_car))
        .route("/:id/location", put(update_location))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<DriverResponse>, AppError> {
    request.validate()?;
    let service = DriverService::new(state.pool.clone());
    let response = service.create_driver(request).await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    let service = DriverService::new(state.pool.clone());
    let response = service.get_driver(id).await?;
    Ok(Json(response))
}

async fn find_drivers(
    State(state): State<AppState>,
    Query(query): Query<DriversQuery>,
) -> Result<Json<DriverListResponse>, AppError> {
    let service = DriverService::new(state.pool.clone());
    let response = service.find_drivers(&query).await?;
    Ok(Json(response))
}

async fn merge_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<DriverResponse>, AppError> {
    let service = DriverService::new(state.pool.clone());
    let response = service.merge_driver(id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = DriverService::new(state.pool.clone());
    service.delete_driver(id).await?;
    Ok(Json(json!({ "success": true })))
}

async fn assign_car(
    State(state): State<AppState>,
    Path((id, car_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = DriverService::new(state.pool.clone());
    service.assign_car(id, car_id).await?;
    Ok(Json(json!({ "success": true })))
}

async fn unassign_car(
    State(state): State<AppState>,
    Path((id, car_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = DriverService::new(state.pool.clone());
    service.unassign_car(id, car_id).await?;
    Ok(Json(json!({ "success": true })))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GeoLocationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    request.validate()?;
    let service = DriverService::new(state.pool.clone());
    service.update_location(id, &request).await?;
    Ok(Json(json!({ "success": true })))
}
