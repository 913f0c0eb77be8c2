//! Car Management API
//!
//! Servicio CRUD autenticado con JWT para gestionar personas y los vehículos
//! que pueden comprar (máximo tres por persona, solo con `sale_oportunity`).

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
