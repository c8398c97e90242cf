use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Rental, RentalStatus, RentalWithNames};
use crate::utils::errors::AppError;

/// Nombre de la constraint de exclusión que respalda el invariante de
/// no-solapamiento (ver database/connection.rs)
const NO_OVERLAP_CONSTRAINT: &str = "rentals_no_overlap";

pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    /// Listado enriquecido con nombres de cliente y vehículo
    pub async fn list_with_names(&self) -> Result<Vec<RentalWithNames>, AppError> {
        let rentals = sqlx::query_as::<_, RentalWithNames>(
            r#"
            SELECT r.*,
                   c.first_name AS customer_first_name,
                   c.last_name  AS customer_last_name,
                   v.brand      AS vehicle_brand,
                   v.model      AS vehicle_model
            FROM rentals r
            JOIN customers c ON c.id = r.customer_id
            JOIN vehicles v ON v.id = r.vehicle_id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    /// Reservas activas (reserved/started) de un vehículo, opcionalmente
    /// excluyendo una reserva concreta. Acepta executor para ejecutarse
    /// dentro de la transacción de reserva.
    pub async fn find_active_by_vehicle<'e, E: PgExecutor<'e>>(
        executor: E,
        vehicle_id: Uuid,
        exclude_rental_id: Option<Uuid>,
    ) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE vehicle_id = $1
              AND status IN ('reserved', 'started')
              AND ($2::uuid IS NULL OR id <> $2)
            ORDER BY date_from ASC
            "#,
        )
        .bind(vehicle_id)
        .bind(exclude_rental_id)
        .fetch_all(executor)
        .await?;

        Ok(rentals)
    }

    /// Reservas no canceladas de un vehículo, para el preview consultivo
    /// de disponibilidad (incluye las finalizadas como histórico visible)
    pub async fn find_visible_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE vehicle_id = $1 AND status <> 'canceled'
            ORDER BY date_from ASC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    /// Insertar una reserva nueva en estado 'reserved'. Debe ejecutarse
    /// dentro de la transacción de reserva; una violación de la
    /// constraint de exclusión se traduce a SlotConflict.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        customer_id: Uuid,
        vehicle_id: Uuid,
        date_from: NaiveDate,
        date_to: NaiveDate,
        daily_rate: Decimal,
        total_cost: Decimal,
    ) -> Result<Rental, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals
                (id, customer_id, vehicle_id, date_from, date_to, status, daily_rate, total_cost)
            VALUES ($1, $2, $3, $4, $5, 'reserved', $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(date_from)
        .bind(date_to)
        .bind(daily_rate)
        .bind(total_cost)
        .fetch_one(executor)
        .await
        .map_err(map_overlap_violation)?;

        Ok(rental)
    }

    /// Check-and-set atómico del estado: solo escribe si el estado
    /// actual sigue siendo uno de los esperados. Devuelve None si
    /// ninguna fila cumplió la condición.
    pub async fn cas_status(
        &self,
        id: Uuid,
        expected: &[RentalStatus],
        new_status: RentalStatus,
    ) -> Result<Option<Rental>, AppError> {
        let expected: Vec<String> = expected.iter().map(|s| s.as_str().to_string()).collect();

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET status = $2
            WHERE id = $1 AND status = ANY($3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_status.as_str())
        .bind(expected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    pub async fn count_by_customer(&self, customer_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rentals WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn count_by_vehicle(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rentals WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}

/// Dos reservas concurrentes que pasaron ambas la comprobación explícita
/// acaban aquí: la constraint de exclusión rechaza la segunda escritura.
fn map_overlap_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.constraint() == Some(NO_OVERLAP_CONSTRAINT) {
            return AppError::SlotConflict {
                conflicting_rental: None,
            };
        }
    }
    AppError::Database(e)
}
