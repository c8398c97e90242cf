use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PriceRule;
use crate::utils::errors::AppError;

pub struct PriceRuleRepository {
    pool: PgPool,
}

impl PriceRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        season: String,
        multiplier: Decimal,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> Result<PriceRule, AppError> {
        let rule = sqlx::query_as::<_, PriceRule>(
            r#"
            INSERT INTO price_rules (id, vehicle_id, season, multiplier, valid_from, valid_to)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(season)
        .bind(multiplier)
        .bind(valid_from)
        .bind(valid_to)
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn list(&self, vehicle_id: Option<Uuid>) -> Result<Vec<PriceRule>, AppError> {
        let rules = match vehicle_id {
            Some(vid) => {
                sqlx::query_as::<_, PriceRule>(
                    "SELECT * FROM price_rules WHERE vehicle_id = $1 ORDER BY valid_from DESC, id ASC",
                )
                .bind(vid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PriceRule>(
                    "SELECT * FROM price_rules ORDER BY valid_from DESC, id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rules)
    }

    /// Reglas cuya ventana inclusiva [valid_from, valid_to] intersecta
    /// el rango semiabierto [date_from, date_to). Acepta executor para
    /// leerse desde el mismo snapshot que la comprobación de
    /// disponibilidad durante la reserva.
    pub async fn find_intersecting<'e, E: PgExecutor<'e>>(
        executor: E,
        vehicle_id: Uuid,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<PriceRule>, AppError> {
        let rules = sqlx::query_as::<_, PriceRule>(
            r#"
            SELECT * FROM price_rules
            WHERE vehicle_id = $1
              AND valid_from < $3
              AND valid_to >= $2
            ORDER BY valid_from DESC, id ASC
            "#,
        )
        .bind(vehicle_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_all(executor)
        .await?;

        Ok(rules)
    }

    pub async fn count_by_vehicle(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM price_rules WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
