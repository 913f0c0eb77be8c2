//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::{
    auth_controller::AuthController, person_controller::PersonController,
    vehicle_controller::VehicleController,
};
use crate::repositories::Store;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: EnvironmentConfig) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            store,
            config: Arc::new(config),
            jwt,
        }
    }

    pub fn auth_controller(&self) -> AuthController {
        AuthController::new(self.store.clone(), self.jwt.clone(), self.config.bcrypt_cost)
    }

    pub fn person_controller(&self) -> PersonController {
        PersonController::new(self.store.clone())
    }

    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.store.clone())
    }
}
