use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Rental, RentalWithNames};
use crate::services::pricing_service::Quote;

// Request para crear una reserva
#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Query de la cotización idempotente (no reserva nada)
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: String,
    pub daily_rate: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Response de la operación de reserva: la reserva creada más la regla
/// estacional aplicada, para que el cliente muestre el precio sin una
/// segunda petición
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    #[serde(flatten)]
    pub rental: RentalResponse,
    pub season: Option<String>,
    pub multiplier: Decimal,
}

/// Elemento del listado de reservas, enriquecido con nombres
#[derive(Debug, Serialize)]
pub struct RentalListItem {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: String,
    pub daily_rate: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub days: i64,
    pub season: Option<String>,
    pub multiplier: Decimal,
    pub daily_rate: Decimal,
    pub total_cost: Decimal,
}

impl From<Rental> for RentalResponse {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id,
            customer_id: r.customer_id,
            vehicle_id: r.vehicle_id,
            date_from: r.date_from,
            date_to: r.date_to,
            status: r.status,
            daily_rate: r.daily_rate,
            total_cost: r.total_cost,
            created_at: r.created_at,
        }
    }
}

impl From<RentalWithNames> for RentalListItem {
    fn from(r: RentalWithNames) -> Self {
        Self {
            id: r.id,
            customer_id: r.customer_id,
            vehicle_id: r.vehicle_id,
            date_from: r.date_from,
            date_to: r.date_to,
            status: r.status,
            daily_rate: r.daily_rate,
            total_cost: r.total_cost,
            created_at: r.created_at,
            customer_first_name: r.customer_first_name,
            customer_last_name: r.customer_last_name,
            vehicle_brand: r.vehicle_brand,
            vehicle_model: r.vehicle_model,
        }
    }
}

impl QuoteResponse {
    pub fn from_quote(vehicle_id: Uuid, date_from: NaiveDate, date_to: NaiveDate, quote: Quote) -> Self {
        Self {
            vehicle_id,
            date_from,
            date_to,
            days: (date_to - date_from).num_days(),
            season: quote.season,
            multiplier: quote.multiplier,
            daily_rate: quote.daily_rate,
            total_cost: quote.total_cost,
        }
    }
}
