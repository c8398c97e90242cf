use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::PriceRule;

// Request para crear una regla de precio estacional
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePriceRuleRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 50))]
    pub season: String,

    /// Multiplicador sobre la tarifa base; la positividad se valida
    /// en el controller
    pub multiplier: Decimal,

    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

/// Filtro opcional por vehículo
#[derive(Debug, Deserialize)]
pub struct ListPriceRulesQuery {
    pub vehicle_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PriceRuleResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub season: String,
    pub multiplier: Decimal,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<PriceRule> for PriceRuleResponse {
    fn from(r: PriceRule) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            season: r.season,
            multiplier: r.multiplier,
            valid_from: r.valid_from,
            valid_to: r.valid_to,
            created_at: r.created_at,
        }
    }
}
