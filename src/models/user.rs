//! Modelo de User
//!
//! Este módulo contiene el struct User que mapea a la tabla users.

use sqlx::FromRow;

/// User - mapea exactamente a la tabla users. Solo guarda el hash bcrypt.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}
