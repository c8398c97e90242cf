//! Motor de reservas
//!
//! Orquesta la creación de reservas como unidad atómica y gobierna la
//! máquina de estados del ciclo de vida.
//!
//! La sección crítica es `reserve`: la lectura de reservas activas y la
//! inserción de la nueva deben ser una sola unidad atómica. Se
//! implementa bloqueando la fila del vehículo (SELECT ... FOR UPDATE),
//! lo que serializa las reservas concurrentes sobre el mismo vehículo;
//! la constraint de exclusión de la tabla rentals actúa de respaldo si
//! alguna escritura llegara por otro camino.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{Rental, RentalAction};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::price_rule_repository::PriceRuleRepository;
use crate::repositories::rental_repository::RentalRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::find_conflict;
use crate::services::pricing_service::{compute_quote, Quote};
use crate::utils::errors::{not_found_error, AppError};

/// Resultado de una reserva aceptada: la fila creada más la regla
/// estacional que se aplicó al precio
pub struct ReservationOutcome {
    pub rental: Rental,
    pub quote: Quote,
}

pub struct ReservationService {
    pool: PgPool,
}

impl ReservationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una reserva como unidad atómica:
    /// 1. bloquear la fila del vehículo,
    /// 2. comprobar disponibilidad dentro de la transacción,
    /// 3. resolver el precio desde el mismo snapshot,
    /// 4. insertar con estado 'reserved' y confirmar.
    /// Cualquier fallo aborta sin cambios parciales.
    pub async fn reserve(
        &self,
        customer_id: Uuid,
        vehicle_id: Uuid,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<ReservationOutcome, AppError> {
        if date_from >= date_to {
            return Err(AppError::InvalidRange(format!(
                "date_from ({}) debe ser anterior a date_to ({})",
                date_from, date_to
            )));
        }

        let mut tx = self.pool.begin().await?;

        let vehicle = VehicleRepository::find_by_id_for_update(&mut *tx, vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

        if !CustomerRepository::exists(&mut *tx, customer_id).await? {
            return Err(not_found_error("Customer", &customer_id.to_string()));
        }

        let active =
            RentalRepository::find_active_by_vehicle(&mut *tx, vehicle_id, None).await?;
        if let Some(conflict) = find_conflict(&active, date_from, date_to) {
            return Err(AppError::SlotConflict {
                conflicting_rental: Some(conflict.id),
            });
        }

        let rules =
            PriceRuleRepository::find_intersecting(&mut *tx, vehicle_id, date_from, date_to)
                .await?;
        let quote = compute_quote(vehicle.base_rate, &rules, date_from, date_to)?;

        let rental = RentalRepository::insert(
            &mut *tx,
            customer_id,
            vehicle_id,
            date_from,
            date_to,
            quote.daily_rate,
            quote.total_cost,
        )
        .await?;

        tx.commit().await?;

        info!(
            "📝 Reserva {} creada: vehículo {} [{} – {}), tarifa {}/día, total {}",
            rental.id, vehicle_id, date_from, date_to, quote.daily_rate, quote.total_cost
        );

        Ok(ReservationOutcome { rental, quote })
    }

    /// Aplicar una acción de ciclo de vida con check-and-set atómico.
    /// La transición no recalcula precio ni re-ejecuta disponibilidad:
    /// cancelar libera el hueco por el mero cambio de estado, porque el
    /// invariante de no-solapamiento solo considera reserved/started.
    pub async fn apply_action(
        &self,
        rental_id: Uuid,
        action: RentalAction,
    ) -> Result<Rental, AppError> {
        let repository = RentalRepository::new(self.pool.clone());

        let updated = repository
            .cas_status(rental_id, action.allowed_from(), action.target_status())
            .await?;

        match updated {
            Some(rental) => {
                info!(
                    "🔄 Reserva {}: acción '{}' -> estado '{}'",
                    rental.id,
                    action.as_str(),
                    rental.status
                );
                Ok(rental)
            }
            // El CAS no escribió nada: o la reserva no existe o la
            // acción es ilegal desde su estado actual
            None => match repository.find_by_id(rental_id).await? {
                Some(rental) => Err(AppError::InvalidTransition {
                    current: rental.status,
                    action: action.as_str().to_string(),
                }),
                None => Err(not_found_error("Rental", &rental_id.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RentalStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rental_with(status: RentalStatus, from: NaiveDate, to: NaiveDate) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            date_from: from,
            date_to: to,
            status: status.as_str().to_string(),
            daily_rate: Decimal::from_str("100.00").unwrap(),
            total_cost: Decimal::from_str("400.00").unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_conflict_reports_the_colliding_rental() {
        let existing = rental_with(RentalStatus::Reserved, date(2024, 5, 1), date(2024, 5, 5));
        let existing_id = existing.id;
        let rentals = vec![existing];

        let conflict = find_conflict(&rentals, date(2024, 5, 4), date(2024, 5, 10));
        assert_eq!(conflict.map(|r| r.id), Some(existing_id));
    }

    #[test]
    fn test_adjacent_reservation_is_accepted() {
        let rentals = vec![rental_with(
            RentalStatus::Started,
            date(2024, 5, 1),
            date(2024, 5, 5),
        )];
        assert!(find_conflict(&rentals, date(2024, 5, 5), date(2024, 5, 10)).is_none());
    }

    #[test]
    fn test_canceled_rentals_free_the_slot() {
        // El repositorio solo carga reserved/started; aquí verificamos
        // que sobre una lista sin activas el rango idéntico queda libre
        let rentals: Vec<Rental> = Vec::new();
        assert!(find_conflict(&rentals, date(2024, 5, 1), date(2024, 5, 5)).is_none());
    }
}
