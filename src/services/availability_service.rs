//! Comprobación de disponibilidad
//!
//! El predicado de solapamiento es una función pura compartida por los
//! dos puntos de uso: la puerta autoritativa dentro de la transacción
//! de reserva y el preview consultivo que se sirve sobre un snapshot
//! sin bloqueo (solo lectura, no vinculante).

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Rental;
use crate::repositories::rental_repository::RentalRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};

/// Predicado de solapamiento para rangos semiabiertos [from, to):
/// [a1, a2) y [b1, b2) se solapan sii a1 < b2 AND b1 < a2.
/// Dos rangos adyacentes que comparten frontera NO se solapan
/// (el día de devolución no es una noche ocupada).
pub fn ranges_overlap(
    a_from: NaiveDate,
    a_to: NaiveDate,
    b_from: NaiveDate,
    b_to: NaiveDate,
) -> bool {
    a_from < b_to && b_from < a_to
}

/// Primera reserva de la lista que colisiona con el rango pedido
pub fn find_conflict(
    rentals: &[Rental],
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Option<&Rental> {
    rentals
        .iter()
        .find(|r| ranges_overlap(r.date_from, r.date_to, date_from, date_to))
}

/// Resultado del preview consultivo
pub struct AvailabilitySnapshot {
    pub available: bool,
    /// Reservas no canceladas del vehículo (histórico visible incluido)
    pub visible_rentals: Vec<Rental>,
}

pub struct AvailabilityService {
    pool: PgPool,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Preview de disponibilidad sobre un snapshot sin bloqueo.
    /// Aplica el mismo predicado que la puerta autoritativa, pero el
    /// resultado puede quedar obsoleto frente a reservas concurrentes.
    pub async fn preview(
        &self,
        vehicle_id: Uuid,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<AvailabilitySnapshot, AppError> {
        if date_from >= date_to {
            return Err(AppError::InvalidRange(format!(
                "date_from ({}) debe ser anterior a date_to ({})",
                date_from, date_to
            )));
        }

        let vehicle = VehicleRepository::new(self.pool.clone())
            .find_by_id(vehicle_id)
            .await?;
        if vehicle.is_none() {
            return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
        }

        let repository = RentalRepository::new(self.pool.clone());
        let visible = repository.find_visible_by_vehicle(vehicle_id).await?;

        // Solo las activas cuentan para el conflicto; las finalizadas
        // son histórico y se devuelven únicamente para el calendario
        let active: Vec<Rental> = visible
            .iter()
            .filter(|r| {
                crate::models::RentalStatus::parse(&r.status)
                    .map(|s| s.is_active())
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        let available = find_conflict(&active, date_from, date_to).is_none();

        Ok(AvailabilitySnapshot {
            available,
            visible_rentals: visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        // [05-01, 05-05) x [05-04, 05-10) -> conflicto
        assert!(ranges_overlap(
            date(2024, 5, 1),
            date(2024, 5, 5),
            date(2024, 5, 4),
            date(2024, 5, 10)
        ));
    }

    #[test]
    fn test_adjacent_ranges_do_not_conflict() {
        // [05-01, 05-05) x [05-05, 05-10) -> sin conflicto (frontera compartida)
        assert!(!ranges_overlap(
            date(2024, 5, 1),
            date(2024, 5, 5),
            date(2024, 5, 5),
            date(2024, 5, 10)
        ));
    }

    #[test]
    fn test_contained_range_conflicts() {
        assert!(ranges_overlap(
            date(2024, 5, 1),
            date(2024, 5, 31),
            date(2024, 5, 10),
            date(2024, 5, 12)
        ));
    }

    #[test]
    fn test_identical_ranges_conflict() {
        assert!(ranges_overlap(
            date(2024, 5, 1),
            date(2024, 5, 5),
            date(2024, 5, 1),
            date(2024, 5, 5)
        ));
    }

    #[test]
    fn test_disjoint_ranges_do_not_conflict() {
        assert!(!ranges_overlap(
            date(2024, 5, 1),
            date(2024, 5, 5),
            date(2024, 6, 1),
            date(2024, 6, 5)
        ));
        // simétrico
        assert!(!ranges_overlap(
            date(2024, 6, 1),
            date(2024, 6, 5),
            date(2024, 5, 1),
            date(2024, 5, 5)
        ));
    }

    #[test]
    fn test_predicate_is_symmetric() {
        let cases = [
            (date(2024, 5, 1), date(2024, 5, 5), date(2024, 5, 4), date(2024, 5, 10)),
            (date(2024, 5, 1), date(2024, 5, 5), date(2024, 5, 5), date(2024, 5, 10)),
            (date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1), date(2024, 4, 1)),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(
                ranges_overlap(a1, a2, b1, b2),
                ranges_overlap(b1, b2, a1, a2)
            );
        }
    }
}
