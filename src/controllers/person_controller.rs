use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::person_dto::{CreatePersonRequest, ListPeopleQuery, PersonResponse, UpdatePersonRequest};
use crate::models::{Person, Vehicle};
use crate::repositories::Store;
use crate::services::rules;
use crate::utils::errors::AppError;

pub struct PersonController {
    store: Arc<dyn Store>,
}

impl PersonController {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: ListPeopleQuery) -> Result<Vec<PersonResponse>, AppError> {
        let (limit, offset) = query.normalized();
        let people = self.store.list_people(limit, offset).await?;

        let ids: Vec<i32> = people.iter().map(|p| p.id).collect();
        let mut by_person: HashMap<i32, Vec<Vehicle>> = HashMap::new();
        for vehicle in self.store.vehicles_of(&ids).await? {
            by_person.entry(vehicle.person_id).or_default().push(vehicle);
        }

        Ok(people
            .into_iter()
            .map(|person| {
                let vehicles = by_person.remove(&person.id).unwrap_or_default();
                PersonResponse::new(person, vehicles)
            })
            .collect())
    }

    pub async fn create(&self, request: CreatePersonRequest) -> Result<PersonResponse, AppError> {
        request
            .validate()
            .map_err(|_| AppError::BadRequest(rules::ERROR_ADDING_PERSON.to_string()))?;
        let new_person = rules::new_person(request)?;

        let person = self
            .store
            .create_person(new_person)
            .await
            .map_err(|e| e.on_persistence(rules::ERROR_ADDING_PERSON))?;
        info!("🧑 Persona {} creada", person.id);

        Ok(PersonResponse::new(person, Vec::new()))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<PersonResponse, AppError> {
        let person = self
            .store
            .find_person(id)
            .await?
            .ok_or_else(rules::person_not_found)?;

        self.with_vehicles(person).await
    }

    pub async fn update(&self, id: i32, request: UpdatePersonRequest) -> Result<PersonResponse, AppError> {
        request.validate()?;
        let changes = rules::person_changes(request)?;

        let person = self
            .store
            .update_person(id, changes)
            .await?
            .ok_or_else(rules::person_not_found)?;

        self.with_vehicles(person).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.store.delete_person(id).await? {
            return Err(rules::person_not_found());
        }
        info!("🗑️ Persona {} eliminada junto con sus vehículos", id);
        Ok(())
    }

    async fn with_vehicles(&self, person: Person) -> Result<PersonResponse, AppError> {
        let vehicles = self.store.vehicles_of(&[person.id]).await?;
        Ok(PersonResponse::new(person, vehicles))
    }
}
