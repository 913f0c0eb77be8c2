use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{Store, USER_ALREADY_EXISTS};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{NewPerson, Person, PersonChanges, User, Vehicle};
use crate::services::rules;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct MemoryData {
    users: BTreeMap<i32, User>,
    people: BTreeMap<i32, Person>,
    vehicles: BTreeMap<i32, Vehicle>,
    next_user_id: i32,
    next_person_id: i32,
    next_vehicle_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Store en memoria (desarrollo y tests). Cada operación toma el lock una sola vez,
/// así que las comprobaciones y la escritura son atómicas.
#[derive(Default)]
pub struct InMemoryStore {
    data: RwLock<MemoryData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut data = self.data.write().await;
        if data.users.values().any(|u| u.username == username) {
            return Err(AppError::Conflict(USER_ALREADY_EXISTS.to_string()));
        }

        let user = User {
            id: next_id(&mut data.next_user_id),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        data.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_people(&self, limit: Option<i64>, offset: i64) -> AppResult<Vec<Person>> {
        let data = self.data.read().await;
        let skip = usize::try_from(offset).unwrap_or(0);
        let take = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(data.people.values().skip(skip).take(take).cloned().collect())
    }

    async fn find_person(&self, id: i32) -> AppResult<Option<Person>> {
        Ok(self.data.read().await.people.get(&id).cloned())
    }

    async fn create_person(&self, person: NewPerson) -> AppResult<Person> {
        let mut data = self.data.write().await;
        let person = Person {
            id: next_id(&mut data.next_person_id),
            name: person.name,
            sale_oportunity: person.sale_oportunity,
        };
        data.people.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update_person(&self, id: i32, changes: PersonChanges) -> AppResult<Option<Person>> {
        let mut data = self.data.write().await;
        Ok(data.people.get_mut(&id).map(|person| {
            changes.apply_to(person);
            person.clone()
        }))
    }

    async fn delete_person(&self, id: i32) -> AppResult<bool> {
        let mut data = self.data.write().await;
        if data.people.remove(&id).is_none() {
            return Ok(false);
        }
        data.vehicles.retain(|_, v| v.person_id != id);
        Ok(true)
    }

    async fn vehicles_of(&self, person_ids: &[i32]) -> AppResult<Vec<Vehicle>> {
        let data = self.data.read().await;
        Ok(data
            .vehicles
            .values()
            .filter(|v| person_ids.contains(&v.person_id))
            .cloned()
            .collect())
    }

    async fn find_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>> {
        Ok(self.data.read().await.vehicles.get(&id).cloned())
    }

    async fn add_vehicle(&self, person_id: i32, request: &CreateVehicleRequest) -> AppResult<Vehicle> {
        let mut data = self.data.write().await;
        let person = data
            .people
            .get(&person_id)
            .ok_or_else(rules::person_not_found)?;
        let owned = data.vehicles.values().filter(|v| v.person_id == person_id).count() as i64;

        let new_vehicle = rules::approve_purchase(person, owned, request)?;
        let vehicle = Vehicle {
            id: next_id(&mut data.next_vehicle_id),
            name: new_vehicle.name,
            color: new_vehicle.color,
            model: new_vehicle.model,
            person_id: new_vehicle.person_id,
        };
        data.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn delete_vehicle(&self, id: i32, person_id: i32) -> AppResult<()> {
        let mut data = self.data.write().await;
        let vehicle = data.vehicles.get(&id).ok_or_else(rules::vehicle_not_found)?;
        rules::ensure_ownership(vehicle, person_id)?;
        data.vehicles.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn golf() -> CreateVehicleRequest {
        CreateVehicleRequest {
            name: Some("Golf".into()),
            color: Some("yellow".into()),
            model: Some("hatch".into()),
        }
    }

    async fn buyer(store: &InMemoryStore) -> Person {
        store
            .create_person(NewPerson { name: "Bob".into(), sale_oportunity: true })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = InMemoryStore::new();
        store.create_user("john", "hash").await.unwrap();
        let err = store.create_user("john", "other").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_person_cascades_to_vehicles() {
        let store = InMemoryStore::new();
        let bob = buyer(&store).await;
        let vehicle = store.add_vehicle(bob.id, &golf()).await.unwrap();

        assert!(store.delete_person(bob.id).await.unwrap());
        assert!(store.find_vehicle(vehicle.id).await.unwrap().is_none());
        assert!(!store.delete_person(bob.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_purchases_respect_limit() {
        let store = Arc::new(InMemoryStore::new());
        let bob_id = buyer(&store).await.id;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add_vehicle(bob_id, &golf()).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 3);
        assert_eq!(store.vehicles_of(&[bob_id]).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_pagination() {
        let store = InMemoryStore::new();
        for name in ["A", "B", "C"] {
            store
                .create_person(NewPerson { name: name.into(), sale_oportunity: false })
                .await
                .unwrap();
        }

        let page = store.list_people(Some(1), 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "B");
        assert_eq!(store.list_people(None, 0).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_unknown_person() {
        let store = InMemoryStore::new();
        let updated = store.update_person(99, PersonChanges::default()).await.unwrap();
        assert!(updated.is_none());
    }
}
