//! Rutas HTTP
//!
//! Construye el router completo: rutas públicas (registro, login, docs) y
//! rutas protegidas por el middleware JWT.

pub mod auth_routes;
pub mod docs_routes;
pub mod person_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

/// Crear el router principal de la aplicación
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(person_routes::create_person_router())
        .merge(vehicle_routes::create_vehicle_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .merge(auth_routes::create_auth_router())
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .merge(docs_routes::create_docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
