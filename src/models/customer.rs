//! Modelo de Customer
//!
//! Cliente del negocio de alquiler más su perfil de datos 1:1
//! (CustomerDetails), que se escribe siempre como unidad completa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Customer principal - mapea a la tabla customers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Perfil 1:1 del cliente - mapea a la tabla customer_details.
/// Como máximo existe una fila por cliente (PK = customer_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerDetails {
    pub customer_id: Uuid,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub marketing_consent: bool,
    pub updated_at: DateTime<Utc>,
}
