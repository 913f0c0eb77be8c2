use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{Store, USER_ALREADY_EXISTS};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{NewPerson, Person, PersonChanges, User, Vehicle};
use crate::services::rules;
use crate::utils::errors::{AppError, AppResult};

const PERSON_COLUMNS: &str = "id, name, sale_oportunity";
const VEHICLE_COLUMNS: &str = "id, name, color, model, person_id";

/// Store sobre PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_error) = &e {
                if db_error.is_unique_violation() {
                    return AppError::Conflict(USER_ALREADY_EXISTS.to_string());
                }
            }
            AppError::Database(e)
        })
    }

    async fn list_people(&self, limit: Option<i64>, offset: i64) -> AppResult<Vec<Person>> {
        // LIMIT NULL equivale a LIMIT ALL
        let people = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    async fn find_person(&self, id: i32) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }

    async fn create_person(&self, person: NewPerson) -> AppResult<Person> {
        let created = sqlx::query_as::<_, Person>(&format!(
            "INSERT INTO persons (name, sale_oportunity) VALUES ($1, $2) RETURNING {PERSON_COLUMNS}"
        ))
        .bind(person.name)
        .bind(person.sale_oportunity)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_person(&self, id: i32, changes: PersonChanges) -> AppResult<Option<Person>> {
        let updated = sqlx::query_as::<_, Person>(&format!(
            r#"
            UPDATE persons
            SET name = COALESCE($2, name),
                sale_oportunity = COALESCE($3, sale_oportunity)
            WHERE id = $1
            RETURNING {PERSON_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.sale_oportunity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_person(&self, id: i32) -> AppResult<bool> {
        // Los vehículos caen por ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn vehicles_of(&self, person_ids: &[i32]) -> AppResult<Vec<Vehicle>> {
        if person_ids.is_empty() {
            return Ok(Vec::new());
        }

        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE person_id = ANY($1) ORDER BY id"
        ))
        .bind(person_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn add_vehicle(&self, person_id: i32, request: &CreateVehicleRequest) -> AppResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        // El bloqueo de la fila serializa compras concurrentes de la misma persona
        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE id = $1 FOR UPDATE"
        ))
        .bind(person_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(rules::person_not_found)?;

        let (owned,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE person_id = $1")
            .bind(person_id)
            .fetch_one(&mut *tx)
            .await?;

        let new_vehicle = rules::approve_purchase(&person, owned, request)?;

        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (name, color, model, person_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(new_vehicle.name)
        .bind(new_vehicle.color)
        .bind(new_vehicle.model)
        .bind(new_vehicle.person_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("🚗 Vehículo {} creado para persona {}", vehicle.id, person_id);

        Ok(vehicle)
    }

    async fn delete_vehicle(&self, id: i32, person_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(rules::vehicle_not_found)?;

        rules::ensure_ownership(&vehicle, person_id)?;

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
