//! Modelo de Vehicle
//!
//! Mapea a la tabla vehicles. El flag de disponibilidad es un toggle
//! manual del staff, independiente de las reservas existentes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Valores permitidos del flag de disponibilidad
pub const AVAILABILITY_VALUES: [&str; 2] = ["available", "unavailable"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub vehicle_type: String,
    pub registration_plate: String,
    /// Tarifa diaria base, siempre positiva
    pub base_rate: Decimal,
    pub availability: String,
    pub created_at: DateTime<Utc>,
}
