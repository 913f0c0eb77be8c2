use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use tracing::debug;

use crate::dto::person_dto::{CreatePersonRequest, ListPeopleQuery, PersonResponse, UpdatePersonRequest};
use crate::dto::{JsonBody, PathParams};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

pub fn create_person_router() -> Router<AppState> {
    Router::new()
        .route("/people", get(list_people).post(create_person))
        .route(
            "/person/:person_id",
            get(get_person).delete(delete_person).patch(update_person),
        )
}

/// Get all people with their vehicles
#[utoipa::path(
    get,
    path = "/api/people",
    params(ListPeopleQuery),
    responses(
        (status = 200, description = "People with their vehicles", body = [PersonResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "people",
    security(("bearerAuth" = []))
)]
pub async fn list_people(
    State(state): State<AppState>,
    Query(query): Query<ListPeopleQuery>,
) -> Result<Json<Vec<PersonResponse>>, AppError> {
    let people = state.person_controller().list(query).await?;
    Ok(Json(people))
}

/// Add a new person
#[utoipa::path(
    post,
    path = "/api/people",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 400, description = "Error adding person.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "people",
    security(("bearerAuth" = []))
)]
pub async fn create_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(request): JsonBody<CreatePersonRequest>,
) -> Result<(StatusCode, Json<PersonResponse>), AppError> {
    debug!("🧑 {} crea una persona", user.username);
    let person = state.person_controller().create(request).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// Get a person by id
#[utoipa::path(
    get,
    path = "/api/person/{person_id}",
    params(("person_id" = i32, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person with vehicles", body = PersonResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "people",
    security(("bearerAuth" = []))
)]
pub async fn get_person(
    State(state): State<AppState>,
    PathParams(person_id): PathParams<i32>,
) -> Result<Json<PersonResponse>, AppError> {
    let person = state.person_controller().get_by_id(person_id).await?;
    Ok(Json(person))
}

/// Edit a person; omitted fields are left unchanged
#[utoipa::path(
    patch,
    path = "/api/person/{person_id}",
    params(("person_id" = i32, Path, description = "Person id")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Updated person", body = PersonResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "people",
    security(("bearerAuth" = []))
)]
pub async fn update_person(
    State(state): State<AppState>,
    PathParams(person_id): PathParams<i32>,
    JsonBody(request): JsonBody<UpdatePersonRequest>,
) -> Result<Json<PersonResponse>, AppError> {
    let person = state.person_controller().update(person_id, request).await?;
    Ok(Json(person))
}

/// Delete a person and their vehicles
#[utoipa::path(
    delete,
    path = "/api/person/{person_id}",
    params(("person_id" = i32, Path, description = "Person id")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "people",
    security(("bearerAuth" = []))
)]
pub async fn delete_person(
    State(state): State<AppState>,
    PathParams(person_id): PathParams<i32>,
) -> Result<StatusCode, AppError> {
    state.person_controller().delete(person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
