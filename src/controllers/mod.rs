//! Controllers de la API
//!
//! Capa entre las rutas y los repositorios/servicios: valida el input,
//! aplica los guards referenciales y mapea modelos a DTOs.

pub mod customer_controller;
pub mod price_rule_controller;
pub mod rental_controller;
pub mod vehicle_controller;

use crate::utils::errors::AppError;

/// Guard referencial de borrado: se rechaza si existe cualquier
/// referencia, sea cual sea su estado (el histórico debe seguir
/// siendo resoluble).
pub fn guard_delete(entity: &str, references: i64) -> Result<(), AppError> {
    if references > 0 {
        return Err(AppError::ReferentialConflict {
            entity: entity.to_string(),
            references,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_without_references_is_allowed() {
        assert!(guard_delete("customer 'abc'", 0).is_ok());
    }

    #[test]
    fn test_any_reference_blocks_the_delete() {
        // Una sola referencia basta, sin importar el estado de la reserva
        let err = guard_delete("customer 'abc'", 1).unwrap_err();
        match err {
            AppError::ReferentialConflict { entity, references } => {
                assert_eq!(entity, "customer 'abc'");
                assert_eq!(references, 1);
            }
            _ => panic!("expected ReferentialConflict"),
        }
    }

    #[test]
    fn test_combined_reference_counts_block_the_delete() {
        // El guard del vehículo suma reservas y reglas de precio
        let err = guard_delete("vehicle 'xyz'", 2 + 3).unwrap_err();
        match err {
            AppError::ReferentialConflict { references, .. } => assert_eq!(references, 5),
            _ => panic!("expected ReferentialConflict"),
        }
    }
}
