//! Modelo de PriceRule
//!
//! Regla estacional de precio: multiplicador sobre la tarifa base del
//! vehículo durante una ventana de validez inclusiva [valid_from, valid_to].
//! El modelo de datos permite ventanas solapadas para un mismo vehículo;
//! el desempate determinista vive en el resolver de precios.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceRule {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    /// Etiqueta libre de temporada, p.ej. "verano" / "temporada alta"
    pub season: String,
    /// Multiplicador positivo sobre la tarifa base (1.0 = tarifa base)
    pub multiplier: Decimal,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub created_at: DateTime<Utc>,
}
