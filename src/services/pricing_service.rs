//! Resolver de precios estacionales
//!
//! Dada una tarifa base y las reglas estacionales que intersectan el
//! rango pedido, calcula la tarifa diaria y el coste total. Es una
//! función pura del estado actual de reglas/vehículo: no tiene efectos
//! secundarios y es seguro llamarla repetidamente para cotizar.
//!
//! Política de desempate cuando varias reglas intersectan el mismo
//! rango (el modelo de datos lo permite): gana la regla con valid_from
//! más tardío (el override más reciente/específico); si persiste el
//! empate, gana el id más bajo. Nunca se depende del orden de iteración.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PriceRule;
use crate::repositories::price_rule_repository::PriceRuleRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};

/// Cotización resuelta para un vehículo y rango de fechas
#[derive(Debug, Clone)]
pub struct Quote {
    pub daily_rate: Decimal,
    pub total_cost: Decimal,
    /// Temporada de la regla aplicada; None si aplica la tarifa base
    pub season: Option<String>,
    pub multiplier: Decimal,
}

/// Selección determinista entre reglas candidatas:
/// valid_from más tardío primero, id más bajo como desempate final.
pub fn pick_rule(rules: &[PriceRule]) -> Option<&PriceRule> {
    rules
        .iter()
        .max_by(|a, b| {
            a.valid_from
                .cmp(&b.valid_from)
                .then_with(|| b.id.cmp(&a.id))
        })
}

/// Redondeo al céntimo con half-up
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Cálculo puro de la cotización a partir de la tarifa base y las
/// reglas que intersectan el rango. Falla con InvalidRange si
/// date_from >= date_to.
pub fn compute_quote(
    base_rate: Decimal,
    intersecting_rules: &[PriceRule],
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Quote, AppError> {
    if date_from >= date_to {
        return Err(AppError::InvalidRange(format!(
            "date_from ({}) debe ser anterior a date_to ({})",
            date_from, date_to
        )));
    }

    let (season, multiplier) = match pick_rule(intersecting_rules) {
        Some(rule) => (Some(rule.season.clone()), rule.multiplier),
        None => (None, Decimal::ONE),
    };

    let daily_rate = round_currency(base_rate * multiplier);
    let days = (date_to - date_from).num_days();
    let total_cost = round_currency(daily_rate * Decimal::from(days));

    Ok(Quote {
        daily_rate,
        total_cost,
        season,
        multiplier,
    })
}

pub struct PricingService {
    pool: PgPool,
}

impl PricingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolver la cotización contra el estado actual de reglas y
    /// vehículo. Sin efectos secundarios: es el endpoint de cotización.
    pub async fn resolve(
        &self,
        vehicle_id: Uuid,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Quote, AppError> {
        if date_from >= date_to {
            return Err(AppError::InvalidRange(format!(
                "date_from ({}) debe ser anterior a date_to ({})",
                date_from, date_to
            )));
        }

        let vehicle = VehicleRepository::new(self.pool.clone())
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

        let rules =
            PriceRuleRepository::find_intersecting(&self.pool, vehicle_id, date_from, date_to)
                .await?;

        compute_quote(vehicle.base_rate, &rules, date_from, date_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn rule(id: &str, season: &str, multiplier: &str, from: NaiveDate, to: NaiveDate) -> PriceRule {
        PriceRule {
            id: Uuid::from_str(id).unwrap(),
            vehicle_id: Uuid::new_v4(),
            season: season.to_string(),
            multiplier: dec(multiplier),
            valid_from: from,
            valid_to: to,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summer_rule_applies() {
        // base 100, regla verano x1.5 -> 150.00/día, 450.00 por 3 días
        let rules = vec![rule(
            "00000000-0000-0000-0000-000000000001",
            "verano",
            "1.5",
            date(2024, 6, 1),
            date(2024, 8, 31),
        )];
        let quote =
            compute_quote(dec("100"), &rules, date(2024, 7, 1), date(2024, 7, 4)).unwrap();
        assert_eq!(quote.daily_rate, dec("150.00"));
        assert_eq!(quote.total_cost, dec("450.00"));
        assert_eq!(quote.season.as_deref(), Some("verano"));
        assert_eq!(quote.multiplier, dec("1.5"));
    }

    #[test]
    fn test_no_rule_means_base_rate() {
        // rango fuera de cualquier regla -> 100.00/día, 200.00 por 2 días
        let quote =
            compute_quote(dec("100"), &[], date(2024, 1, 10), date(2024, 1, 12)).unwrap();
        assert_eq!(quote.daily_rate, dec("100.00"));
        assert_eq!(quote.total_cost, dec("200.00"));
        assert_eq!(quote.season, None);
        assert_eq!(quote.multiplier, Decimal::ONE);
    }

    #[test]
    fn test_latest_start_wins() {
        let generic = rule(
            "00000000-0000-0000-0000-000000000001",
            "temporada alta",
            "1.2",
            date(2024, 6, 1),
            date(2024, 8, 31),
        );
        let override_rule = rule(
            "00000000-0000-0000-0000-000000000002",
            "agosto pico",
            "1.8",
            date(2024, 8, 1),
            date(2024, 8, 31),
        );
        // orden de entrada irrelevante
        for rules in [
            vec![generic.clone(), override_rule.clone()],
            vec![override_rule.clone(), generic.clone()],
        ] {
            let picked = pick_rule(&rules).unwrap();
            assert_eq!(picked.season, "agosto pico");
        }
    }

    #[test]
    fn test_tie_breaks_on_lowest_id() {
        let window_from = date(2024, 6, 1);
        let window_to = date(2024, 8, 31);
        let low = rule(
            "00000000-0000-0000-0000-000000000001",
            "regla-a",
            "1.1",
            window_from,
            window_to,
        );
        let high = rule(
            "ffffffff-ffff-ffff-ffff-ffffffffffff",
            "regla-b",
            "1.9",
            window_from,
            window_to,
        );
        for rules in [vec![low.clone(), high.clone()], vec![high.clone(), low.clone()]] {
            let picked = pick_rule(&rules).unwrap();
            assert_eq!(picked.season, "regla-a");
        }
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 99.99 * 1.105 = 110.48895 -> 110.49
        let rules = vec![rule(
            "00000000-0000-0000-0000-000000000001",
            "media",
            "1.105",
            date(2024, 3, 1),
            date(2024, 3, 31),
        )];
        let quote =
            compute_quote(dec("99.99"), &rules, date(2024, 3, 10), date(2024, 3, 11)).unwrap();
        assert_eq!(quote.daily_rate, dec("110.49"));
        assert_eq!(quote.total_cost, dec("110.49"));

        // caso exacto de mitad: 100.125 -> 100.13
        assert_eq!(round_currency(dec("100.125")), dec("100.13"));
    }

    #[test]
    fn test_same_day_range_is_rejected() {
        let result = compute_quote(dec("100"), &[], date(2024, 5, 1), date(2024, 5, 1));
        assert!(matches!(result, Err(AppError::InvalidRange(_))));

        let inverted = compute_quote(dec("100"), &[], date(2024, 5, 2), date(2024, 5, 1));
        assert!(matches!(inverted, Err(AppError::InvalidRange(_))));
    }

    #[test]
    fn test_quote_is_deterministic() {
        let rules = vec![rule(
            "00000000-0000-0000-0000-000000000001",
            "verano",
            "1.5",
            date(2024, 6, 1),
            date(2024, 8, 31),
        )];
        let a = compute_quote(dec("100"), &rules, date(2024, 7, 1), date(2024, 7, 4)).unwrap();
        let b = compute_quote(dec("100"), &rules, date(2024, 7, 1), date(2024, 7, 4)).unwrap();
        assert_eq!(a.daily_rate, b.daily_rate);
        assert_eq!(a.total_cost, b.total_cost);
        assert_eq!(a.season, b.season);
    }
}
