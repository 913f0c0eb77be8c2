use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::dto::auth_dto::{CredentialsRequest, LoginResponse, UserResponse};
use crate::dto::JsonBody;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

/// Configura las rutas públicas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "User already exists", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.auth_controller().register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Access token", body = LoginResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = state.auth_controller().login(request).await?;
    Ok(Json(response))
}
