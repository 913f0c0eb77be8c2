use bcrypt::{hash, verify};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{CredentialsRequest, LoginResponse, UserResponse};
use crate::repositories::{Store, USER_ALREADY_EXISTS};
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthController {
    store: Arc<dyn Store>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(store: Arc<dyn Store>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self { store, jwt, bcrypt_cost }
    }

    pub async fn register(&self, request: CredentialsRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        // Verificar que el username no exista
        if self.store.find_user_by_username(&request.username).await?.is_some() {
            return Err(AppError::Conflict(USER_ALREADY_EXISTS.to_string()));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = self.store.create_user(&request.username, &password_hash).await?;
        info!("👤 Usuario registrado: {}", user.username);

        Ok(user.into())
    }

    pub async fn login(&self, request: CredentialsRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .store
            .find_user_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = generate_token(&user, &self.jwt)?;
        info!("🔑 Login correcto para {}", user.username);

        Ok(LoginResponse { access_token })
    }
}
