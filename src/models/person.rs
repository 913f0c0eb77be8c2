//! Modelo de Person
//!
//! Una persona puede comprar hasta tres vehículos cuando tiene `sale_oportunity`.

use sqlx::FromRow;

/// Person - mapea exactamente a la tabla persons
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub sale_oportunity: bool,
}

/// Datos para crear una persona
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub sale_oportunity: bool,
}

/// Cambios parciales: cada campo ausente se deja como está
#[derive(Debug, Clone, Default)]
pub struct PersonChanges {
    pub name: Option<String>,
    pub sale_oportunity: Option<bool>,
}

impl PersonChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.sale_oportunity.is_none()
    }

    /// Aplicar los cambios sobre una persona existente
    pub fn apply_to(self, person: &mut Person) {
        if let Some(name) = self.name {
            person.name = name;
        }
        if let Some(sale_oportunity) = self.sale_oportunity {
            person.sale_oportunity = sale_oportunity;
        }
    }
}
