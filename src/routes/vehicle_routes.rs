use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::dto::{JsonBody, PathParams};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles/person/:person_id",
            get(list_person_vehicles).post(add_vehicle),
        )
        .route(
            "/vehicle/:vehicle_id/person/:person_id",
            get(get_vehicle).delete(delete_vehicle),
        )
}

/// List the vehicles of a person
#[utoipa::path(
    get,
    path = "/api/vehicles/person/{person_id}",
    params(("person_id" = i32, Path, description = "Person id")),
    responses(
        (status = 200, description = "Vehicles of the person", body = [VehicleResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "vehicles",
    security(("bearerAuth" = []))
)]
pub async fn list_person_vehicles(
    State(state): State<AppState>,
    PathParams(person_id): PathParams<i32>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let vehicles = state.vehicle_controller().list_by_person(person_id).await?;
    Ok(Json(vehicles))
}

/// Add a new vehicle to a person (max 3 vehicles) with color
/// (yellow, blue, gray) and model (hatch, sedan, convertible)
#[utoipa::path(
    post,
    path = "/api/vehicles/person/{person_id}",
    params(("person_id" = i32, Path, description = "Person id")),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 400, description = "Vehicle limit reached or invalid color/model", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Person cannot buy vehicles yet.", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "vehicles",
    security(("bearerAuth" = []))
)]
pub async fn add_vehicle(
    State(state): State<AppState>,
    PathParams(person_id): PathParams<i32>,
    JsonBody(request): JsonBody<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let vehicle = state.vehicle_controller().create(person_id, request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Get vehicle information
#[utoipa::path(
    get,
    path = "/api/vehicle/{vehicle_id}/person/{person_id}",
    params(
        ("vehicle_id" = i32, Path, description = "Vehicle id"),
        ("person_id" = i32, Path, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Vehicle", body = VehicleResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Vehicle does not belong to person.", body = ErrorResponse),
        (status = 404, description = "Vehicle not found.", body = ErrorResponse)
    ),
    tag = "vehicles",
    security(("bearerAuth" = []))
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    PathParams((vehicle_id, person_id)): PathParams<(i32, i32)>,
) -> Result<Json<VehicleResponse>, AppError> {
    let vehicle = state.vehicle_controller().get_by_id(vehicle_id, person_id).await?;
    Ok(Json(vehicle))
}

/// Delete a vehicle from a person
#[utoipa::path(
    delete,
    path = "/api/vehicle/{vehicle_id}/person/{person_id}",
    params(
        ("vehicle_id" = i32, Path, description = "Vehicle id"),
        ("person_id" = i32, Path, description = "Owner id")
    ),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Vehicle does not belong to person.", body = ErrorResponse),
        (status = 404, description = "Vehicle not found.", body = ErrorResponse)
    ),
    tag = "vehicles",
    security(("bearerAuth" = []))
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    PathParams((vehicle_id, person_id)): PathParams<(i32, i32)>,
) -> Result<StatusCode, AppError> {
    state.vehicle_controller().delete(vehicle_id, person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
