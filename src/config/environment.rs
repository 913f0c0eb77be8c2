//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use tracing::warn;

/// Secreto por defecto para desarrollo; nunca se acepta en producción
const DEFAULT_JWT_SECRET: &str = "super-secret-key";

/// Vida máxima de un token: diez años
pub const MAX_JWT_EXPIRATION: u64 = 10 * 365 * 24 * 3600;

/// Backend de almacenamiento seleccionado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("STORAGE_BACKEND desconocido: '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    /// Vida del token en segundos
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            storage: StorageBackend::Postgres,
            database_url: None,
            db_max_connections: 10,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration: 86_400,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración a partir de las variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let jwt_secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET_KEY"))
            .ok()
            .filter(|secret| !secret.trim().is_empty());

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.storage,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORAGE_BACKEND is postgres");
        }

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            storage,
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            jwt_secret: jwt_secret.clone().unwrap_or(defaults.jwt_secret),
            jwt_expiration: check_jwt_expiration(parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            cors_origins,
        };

        if jwt_secret.is_none() {
            if config.is_production() {
                bail!("JWT_SECRET must be set in production");
            }
            warn!("⚠️ JWT_SECRET no definido, usando secreto de desarrollo");
        }

        Ok(config)
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// La vida del token debe ser positiva y no pasar de MAX_JWT_EXPIRATION
fn check_jwt_expiration(seconds: u64) -> Result<u64> {
    if seconds == 0 || seconds > MAX_JWT_EXPIRATION {
        bail!("JWT_EXPIRATION must be between 1 and {} seconds", MAX_JWT_EXPIRATION);
    }
    Ok(seconds)
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert_eq!(" Memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_config_has_finite_token_ttl() {
        let config = EnvironmentConfig::default();
        assert!(config.jwt_expiration > 0);
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_jwt_expiration_bounds() {
        assert_eq!(check_jwt_expiration(86_400).unwrap(), 86_400);
        assert_eq!(check_jwt_expiration(MAX_JWT_EXPIRATION).unwrap(), MAX_JWT_EXPIRATION);
        assert!(check_jwt_expiration(0).is_err());
        assert!(check_jwt_expiration(100_000_000_000_000_000).is_err());
    }
}
