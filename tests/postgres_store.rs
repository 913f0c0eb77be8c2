//! Tests del store PostgreSQL
//!
//! Necesitan una base de datos real:
//! `DATABASE_URL=postgres://... cargo test --test postgres_store -- --ignored`

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use car_management::config::database::{run_migrations, DatabaseConfig};
use car_management::dto::vehicle_dto::CreateVehicleRequest;
use car_management::models::{NewPerson, Person, PersonChanges};
use car_management::repositories::{PgStore, Store};
use car_management::utils::errors::AppError;

async fn connect() -> PgStore {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let pool = DatabaseConfig::new(url, 20).create_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();
    PgStore::new(pool)
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{prefix}-{nanos}")
}

fn golf() -> CreateVehicleRequest {
    CreateVehicleRequest {
        name: Some("Golf".into()),
        color: Some("yellow".into()),
        model: Some("hatch".into()),
    }
}

async fn buyer(store: &PgStore, sale_oportunity: bool) -> Person {
    store
        .create_person(NewPerson { name: unique("Bob"), sale_oportunity })
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_username_maps_to_conflict() {
    let store = connect().await;
    let username = unique("john");

    store.create_user(&username, "hash").await.unwrap();
    let err = store.create_user(&username, "other").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref m) if m == "User already exists"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_partial_update_keeps_omitted_fields() {
    let store = connect().await;
    let bob = buyer(&store, true).await;

    let renamed = store
        .update_person(bob.id, PersonChanges { name: Some("Robert".into()), sale_oportunity: None })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Robert");
    assert!(renamed.sale_oportunity);

    let blocked = store
        .update_person(bob.id, PersonChanges { name: None, sale_oportunity: Some(false) })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(blocked.name, "Robert");
    assert!(!blocked.sale_oportunity);

    assert!(store.update_person(-1, PersonChanges::default()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_people_without_limit_returns_everything() {
    let store = connect().await;
    buyer(&store, false).await;
    buyer(&store, false).await;

    let all = store.list_people(None, 0).await.unwrap();
    assert!(all.len() >= 2);
    assert!(all.windows(2).all(|pair| pair[0].id < pair[1].id));

    let page = store.list_people(Some(1), 1).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_purchases_respect_limit() {
    let store = Arc::new(connect().await);
    let bob_id = buyer(&store, true).await.id;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add_vehicle(bob_id, &golf()).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, AppError::BadRequest(ref m) if m == "A person can only have up to 3 vehicles.")),
        }
    }

    assert_eq!(created, 3);
    assert_eq!(store.vehicles_of(&[bob_id]).await.unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_vehicle_rules_and_cascade() {
    let store = connect().await;
    let blocked = buyer(&store, false).await;
    let err = store.add_vehicle(blocked.id, &golf()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let bob = buyer(&store, true).await;
    let other = buyer(&store, true).await;
    let vehicle = store.add_vehicle(bob.id, &golf()).await.unwrap();

    let err = store.delete_vehicle(vehicle.id, other.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    assert!(store.delete_person(bob.id).await.unwrap());
    assert!(store.find_vehicle(vehicle.id).await.unwrap().is_none());
}
