//! Controllers
//!
//! Orquestan repositorios y reglas de negocio para cada recurso.

pub mod auth_controller;
pub mod person_controller;
pub mod vehicle_controller;
