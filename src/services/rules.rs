//! Reglas de negocio de personas y vehículos
//!
//! Funciones puras: no tocan la base de datos. Los stores las ejecutan dentro
//! de su transacción, así que el orden de los chequeos es siempre el mismo:
//! existencia de la persona → sale_oportunity → límite de vehículos → color → modelo → nombre.

use crate::dto::person_dto::{CreatePersonRequest, UpdatePersonRequest};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{NewPerson, NewVehicle, Person, PersonChanges, Vehicle, VehicleColor, VehicleModel};
use crate::utils::errors::{bad_request_error, forbidden_error, not_found_error, AppError, AppResult};

/// Máximo de vehículos por persona
pub const MAX_VEHICLES_PER_PERSON: i64 = 3;

pub const PERSON_NOT_FOUND: &str = "Person not found.";
pub const VEHICLE_NOT_FOUND: &str = "Vehicle not found.";
pub const CANNOT_BUY_YET: &str = "Person cannot buy vehicles yet.";
pub const VEHICLE_LIMIT_REACHED: &str = "A person can only have up to 3 vehicles.";
pub const COLOR_NOT_AVAILABLE: &str = "Color not available.";
pub const MODEL_NOT_AVAILABLE: &str = "Model not available.";
pub const VEHICLE_NAME_REQUIRED: &str = "Vehicle name is required.";
pub const VEHICLE_NAME_TOO_LONG: &str = "Vehicle name is too long.";
pub const NOT_OWNER: &str = "Vehicle does not belong to person.";
pub const ERROR_ADDING_PERSON: &str = "Error adding person.";
pub const PERSON_NAME_REQUIRED: &str = "Person name is required.";
pub const ERROR_DELETING_VEHICLE: &str = "Error deleting vehicle.";

const MAX_NAME_LENGTH: usize = 100;

pub fn person_not_found() -> AppError {
    not_found_error(PERSON_NOT_FOUND)
}

pub fn vehicle_not_found() -> AppError {
    not_found_error(VEHICLE_NOT_FOUND)
}

/// Valida los datos de alta de una persona
pub fn new_person(request: CreatePersonRequest) -> AppResult<NewPerson> {
    let name = request
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request_error(ERROR_ADDING_PERSON))?;

    Ok(NewPerson {
        name,
        sale_oportunity: request.sale_oportunity.unwrap_or(false),
    })
}

/// Normaliza una edición parcial: el nombre, si viene, se guarda sin espacios y no puede quedar vacío
pub fn person_changes(request: UpdatePersonRequest) -> AppResult<PersonChanges> {
    let name = match request.name {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(bad_request_error(PERSON_NAME_REQUIRED));
            }
            Some(name.to_string())
        }
        None => None,
    };

    Ok(PersonChanges {
        name,
        sale_oportunity: request.sale_oportunity,
    })
}

/// Decide si `person`, que ya posee `owned` vehículos, puede comprar el vehículo pedido
pub fn approve_purchase(
    person: &Person,
    owned: i64,
    request: &CreateVehicleRequest,
) -> AppResult<NewVehicle> {
    if !person.sale_oportunity {
        return Err(forbidden_error(CANNOT_BUY_YET));
    }

    if owned >= MAX_VEHICLES_PER_PERSON {
        return Err(bad_request_error(VEHICLE_LIMIT_REACHED));
    }

    let color = parse_color(request.color.as_deref())?;
    let model = parse_model(request.model.as_deref())?;
    let name = vehicle_name(request.name.as_deref())?;

    Ok(NewVehicle {
        name,
        color,
        model,
        person_id: person.id,
    })
}

/// Un vehículo solo se consulta o borra a través de su dueño
pub fn ensure_ownership(vehicle: &Vehicle, person_id: i32) -> AppResult<()> {
    if vehicle.person_id != person_id {
        return Err(forbidden_error(NOT_OWNER));
    }
    Ok(())
}

fn parse_color(value: Option<&str>) -> AppResult<VehicleColor> {
    value
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| bad_request_error(COLOR_NOT_AVAILABLE))
}

fn parse_model(value: Option<&str>) -> AppResult<VehicleModel> {
    value
        .and_then(|m| m.parse().ok())
        .ok_or_else(|| bad_request_error(MODEL_NOT_AVAILABLE))
}

fn vehicle_name(value: Option<&str>) -> AppResult<String> {
    let name = value.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(bad_request_error(VEHICLE_NAME_REQUIRED));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(bad_request_error(VEHICLE_NAME_TOO_LONG));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(sale_oportunity: bool) -> Person {
        Person { id: 7, name: "Bob".into(), sale_oportunity }
    }

    fn request(name: &str, color: &str, model: &str) -> CreateVehicleRequest {
        CreateVehicleRequest {
            name: Some(name.into()),
            color: Some(color.into()),
            model: Some(model.into()),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::BadRequest(m) | AppError::Forbidden(m) | AppError::NotFound(m) => m,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_valid_purchase() {
        let vehicle = approve_purchase(&buyer(true), 2, &request("Golf", "yellow", "hatch")).unwrap();
        assert_eq!(
            vehicle,
            NewVehicle {
                name: "Golf".into(),
                color: VehicleColor::Yellow,
                model: VehicleModel::Hatch,
                person_id: 7,
            }
        );
    }

    #[test]
    fn test_sale_oportunity_is_checked_first() {
        // Todo es inválido, pero gana el chequeo de sale_oportunity
        let err = approve_purchase(&buyer(false), 5, &request("", "invalid", "invalid")).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(message(err), CANNOT_BUY_YET);
    }

    #[test]
    fn test_limit_is_checked_before_fields() {
        let err = approve_purchase(&buyer(true), 3, &request("Test", "invalid", "invalid")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(message(err), VEHICLE_LIMIT_REACHED);
    }

    #[test]
    fn test_color_before_model() {
        let err = approve_purchase(&buyer(true), 0, &request("Test", "invalid", "invalid")).unwrap_err();
        assert_eq!(message(err), COLOR_NOT_AVAILABLE);

        let err = approve_purchase(&buyer(true), 0, &request("Test", "yellow", "invalid")).unwrap_err();
        assert_eq!(message(err), MODEL_NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_fields() {
        let err = approve_purchase(&buyer(true), 0, &CreateVehicleRequest::default()).unwrap_err();
        assert_eq!(message(err), COLOR_NOT_AVAILABLE);

        let missing_name = CreateVehicleRequest {
            name: Some("   ".into()),
            color: Some("gray".into()),
            model: Some("sedan".into()),
        };
        let err = approve_purchase(&buyer(true), 0, &missing_name).unwrap_err();
        assert_eq!(message(err), VEHICLE_NAME_REQUIRED);
    }

    #[test]
    fn test_ownership() {
        let vehicle = Vehicle {
            id: 1,
            name: "Golf".into(),
            color: VehicleColor::Blue,
            model: VehicleModel::Sedan,
            person_id: 7,
        };
        assert!(ensure_ownership(&vehicle, 7).is_ok());
        assert_eq!(message(ensure_ownership(&vehicle, 8).unwrap_err()), NOT_OWNER);
    }

    #[test]
    fn test_new_person_defaults_and_requires_name() {
        let person = new_person(CreatePersonRequest { name: Some("Ann".into()), sale_oportunity: None }).unwrap();
        assert!(!person.sale_oportunity);

        let err = new_person(CreatePersonRequest { name: None, sale_oportunity: Some(true) }).unwrap_err();
        assert_eq!(message(err), ERROR_ADDING_PERSON);
    }

    #[test]
    fn test_person_changes_trims_and_rejects_blank_name() {
        let changes = person_changes(UpdatePersonRequest {
            name: Some("  Ann  ".into()),
            sale_oportunity: Some(false),
        })
        .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Ann"));
        assert_eq!(changes.sale_oportunity, Some(false));

        let err = person_changes(UpdatePersonRequest { name: Some("   ".into()), sale_oportunity: None }).unwrap_err();
        assert_eq!(message(err), PERSON_NAME_REQUIRED);

        assert!(person_changes(UpdatePersonRequest::default()).unwrap().is_empty());
    }
}
