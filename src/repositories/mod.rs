//! Repositorios
//!
//! Abstracción de persistencia. `PgStore` es la implementación de producción;
//! `InMemoryStore` sirve para desarrollo y tests. Las dos delegan las reglas de
//! compra y propiedad en `services::rules` y ejecutan cada operación de forma atómica.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{NewPerson, Person, PersonChanges, User, Vehicle};
use crate::utils::errors::AppResult;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

pub const USER_ALREADY_EXISTS: &str = "User already exists";

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Falla con `Conflict` si el username ya existe
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User>;

    /// Personas ordenadas por id; `limit = None` devuelve todas
    async fn list_people(&self, limit: Option<i64>, offset: i64) -> AppResult<Vec<Person>>;

    async fn find_person(&self, id: i32) -> AppResult<Option<Person>>;

    async fn create_person(&self, person: NewPerson) -> AppResult<Person>;

    async fn update_person(&self, id: i32, changes: PersonChanges) -> AppResult<Option<Person>>;

    /// Borra la persona y sus vehículos. Devuelve `false` si no existía.
    async fn delete_person(&self, id: i32) -> AppResult<bool>;

    /// Vehículos de las personas indicadas, ordenados por id
    async fn vehicles_of(&self, person_ids: &[i32]) -> AppResult<Vec<Vehicle>>;

    async fn find_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>>;

    /// Valida y crea el vehículo con la persona bloqueada durante toda la operación
    async fn add_vehicle(&self, person_id: i32, request: &CreateVehicleRequest) -> AppResult<Vehicle>;

    /// Comprueba la propiedad y borra en la misma transacción
    async fn delete_vehicle(&self, id: i32, person_id: i32) -> AppResult<()>;
}
