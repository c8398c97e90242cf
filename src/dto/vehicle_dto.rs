use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: String,

    #[validate(length(min = 2, max = 20))]
    pub registration_plate: String,

    /// Tarifa diaria base; la positividad se valida en el controller
    pub base_rate: Decimal,

    /// "available" / "unavailable"; por defecto "available"
    pub availability: Option<String>,
}

/// Filtros para listado de vehículos
#[derive(Debug, Deserialize)]
pub struct ListVehiclesQuery {
    #[serde(default)]
    pub only_available: bool,
}

/// Query del preview de disponibilidad
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub vehicle_type: String,
    pub registration_plate: String,
    pub base_rate: Decimal,
    pub availability: String,
    pub created_at: DateTime<Utc>,
}

/// Rango ocupado por una reserva no cancelada, para que el cliente
/// pueda pintar un calendario
#[derive(Debug, Serialize)]
pub struct OccupiedRange {
    pub rental_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: String,
}

/// Response del preview de disponibilidad.
/// AVISO: es una lectura consultiva sobre un snapshot; la comprobación
/// vinculante ocurre dentro de la transacción de reserva.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub available: bool,
    pub occupied: Vec<OccupiedRange>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.brand,
            model: v.model,
            vehicle_type: v.vehicle_type,
            registration_plate: v.registration_plate,
            base_rate: v.base_rate,
            availability: v.availability,
            created_at: v.created_at,
        }
    }
}
