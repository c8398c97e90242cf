//! Modelo de Rental y máquina de estados del ciclo de vida
//!
//! Una reserva ocupa el rango semiabierto [date_from, date_to): el día
//! de devolución no cuenta como noche ocupada, así que dos reservas
//! adyacentes que comparten esa frontera no entran en conflicto.
//!
//! Ciclo de vida: reserved -> started -> finished, con cancelación desde
//! reserved o started. finished y canceled son estados terminales.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rental principal - mapea a la tabla rentals.
/// Creado solo por la operación de reserva; mutado solo por la
/// operación de transición de estado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: String,
    /// Tarifa diaria cobrada, capturada en la creación (no se recalcula)
    pub daily_rate: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Rental enriquecido con nombres de cliente y vehículo para listados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RentalWithNames {
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

/// Estado del ciclo de vida de una reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Reserved,
    Started,
    Finished,
    Canceled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Reserved => "reserved",
            RentalStatus::Started => "started",
            RentalStatus::Finished => "finished",
            RentalStatus::Canceled => "canceled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reserved" => Some(RentalStatus::Reserved),
            "started" => Some(RentalStatus::Started),
            "finished" => Some(RentalStatus::Finished),
            "canceled" => Some(RentalStatus::Canceled),
            _ => None,
        }
    }

    /// Una reserva activa cuenta para el invariante de no-solapamiento
    pub fn is_active(&self) -> bool {
        matches!(self, RentalStatus::Reserved | RentalStatus::Started)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Finished | RentalStatus::Canceled)
    }
}

/// Acción de ciclo de vida solicitada por el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalAction {
    Start,
    Finish,
    Cancel,
}

impl RentalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalAction::Start => "start",
            RentalAction::Finish => "finish",
            RentalAction::Cancel => "cancel",
        }
    }

    /// Estados desde los que la acción es legal
    pub fn allowed_from(&self) -> &'static [RentalStatus] {
        match self {
            RentalAction::Start => &[RentalStatus::Reserved],
            RentalAction::Finish => &[RentalStatus::Started],
            RentalAction::Cancel => &[RentalStatus::Reserved, RentalStatus::Started],
        }
    }

    /// Estado resultante de la acción
    pub fn target_status(&self) -> RentalStatus {
        match self {
            RentalAction::Start => RentalStatus::Started,
            RentalAction::Finish => RentalStatus::Finished,
            RentalAction::Cancel => RentalStatus::Canceled,
        }
    }

    /// Transición pura: devuelve el estado resultante si la acción es
    /// legal desde `current`, None en caso contrario.
    pub fn apply(&self, current: RentalStatus) -> Option<RentalStatus> {
        if self.allowed_from().contains(&current) {
            Some(self.target_status())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            RentalStatus::Reserved,
            RentalStatus::Started,
            RentalStatus::Finished,
            RentalStatus::Canceled,
        ] {
            assert_eq!(RentalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RentalStatus::parse("active"), None);
    }

    #[test]
    fn test_active_statuses() {
        assert!(RentalStatus::Reserved.is_active());
        assert!(RentalStatus::Started.is_active());
        assert!(!RentalStatus::Finished.is_active());
        assert!(!RentalStatus::Canceled.is_active());
    }

    #[test]
    fn test_happy_path_transitions() {
        let started = RentalAction::Start.apply(RentalStatus::Reserved).unwrap();
        assert_eq!(started, RentalStatus::Started);
        let finished = RentalAction::Finish.apply(started).unwrap();
        assert_eq!(finished, RentalStatus::Finished);
    }

    #[test]
    fn test_cancel_from_reserved_and_started() {
        assert_eq!(
            RentalAction::Cancel.apply(RentalStatus::Reserved),
            Some(RentalStatus::Canceled)
        );
        assert_eq!(
            RentalAction::Cancel.apply(RentalStatus::Started),
            Some(RentalStatus::Canceled)
        );
    }

    #[test]
    fn test_finish_directly_from_reserved_is_illegal() {
        assert_eq!(RentalAction::Finish.apply(RentalStatus::Reserved), None);
    }

    #[test]
    fn test_terminal_states_accept_no_action() {
        for terminal in [RentalStatus::Finished, RentalStatus::Canceled] {
            for action in [RentalAction::Start, RentalAction::Finish, RentalAction::Cancel] {
                assert_eq!(action.apply(terminal), None, "{:?} desde {:?}", action, terminal);
            }
        }
    }

    #[test]
    fn test_start_is_not_reentrant() {
        assert_eq!(RentalAction::Start.apply(RentalStatus::Started), None);
    }
}
