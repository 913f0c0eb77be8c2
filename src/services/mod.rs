//! Servicios de negocio
//!
//! Reglas de dominio compartidas por los controllers y los stores.

pub mod rules;
