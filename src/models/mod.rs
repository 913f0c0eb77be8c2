//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (`users`, `persons`, `vehicles`).

pub mod person;
pub mod user;
pub mod vehicle;

pub use person::{NewPerson, Person, PersonChanges};
pub use user::User;
pub use vehicle::{NewVehicle, Vehicle, VehicleColor, VehicleModel};
