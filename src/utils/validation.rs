//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! en la frontera HTTP, antes de que el input llegue al motor de
//! reservas.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un decimal sea estrictamente positivo (precios y multiplicadores)
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté dentro de un conjunto permitido
pub fn validate_enum(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed".into(), &allowed.join(", "));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Toyota").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive_decimal() {
        assert!(validate_positive_decimal(&Decimal::from_str("100.00").unwrap()).is_ok());
        assert!(validate_positive_decimal(&Decimal::from_str("0.01").unwrap()).is_ok());
        assert!(validate_positive_decimal(&Decimal::ZERO).is_err());
        assert!(validate_positive_decimal(&Decimal::from_str("-1.5").unwrap()).is_err());
    }

    #[test]
    fn test_validate_enum() {
        let allowed = ["available", "unavailable"];
        assert!(validate_enum("available", &allowed).is_ok());
        assert!(validate_enum("maintenance", &allowed).is_err());
    }
}
