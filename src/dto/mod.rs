//! DTOs de la API
//!
//! Payloads de entrada y salida de los endpoints.

pub mod auth_dto;
pub mod person_dto;
pub mod vehicle_dto;

use axum::extract::{FromRequest, FromRequestParts};

use crate::utils::errors::AppError;

/// Extractor JSON cuyos rechazos se devuelven con el formato de `AppError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Extractor de parámetros de ruta; un id inválido responde 404 con el formato de `AppError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParams<T>(pub T);
