//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los enums de color y modelo.
//! Mapea exactamente a la tabla `vehicles` y a los ENUM `vehicle_color` / `vehicle_model`.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Color del vehículo - mapea al ENUM vehicle_color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "vehicle_color", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleColor {
    Yellow,
    Blue,
    Gray,
}

impl VehicleColor {
    pub const ALL: [VehicleColor; 3] = [VehicleColor::Yellow, VehicleColor::Blue, VehicleColor::Gray];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleColor::Yellow => "yellow",
            VehicleColor::Blue => "blue",
            VehicleColor::Gray => "gray",
        }
    }
}

impl FromStr for VehicleColor {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == value).ok_or(())
    }
}

impl fmt::Display for VehicleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modelo (carrocería) del vehículo - mapea al ENUM vehicle_model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "vehicle_model", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleModel {
    Hatch,
    Sedan,
    Convertible,
}

impl VehicleModel {
    pub const ALL: [VehicleModel; 3] = [VehicleModel::Hatch, VehicleModel::Sedan, VehicleModel::Convertible];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleModel::Hatch => "hatch",
            VehicleModel::Sedan => "sedan",
            VehicleModel::Convertible => "convertible",
        }
    }
}

impl FromStr for VehicleModel {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.as_str() == value).ok_or(())
    }
}

impl fmt::Display for VehicleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub color: VehicleColor,
    pub model: VehicleModel,
    pub person_id: i32,
}

/// Vehículo ya validado por las reglas de negocio, listo para insertar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub name: String,
    pub color: VehicleColor,
    pub model: VehicleModel,
    pub person_id: i32,
}
