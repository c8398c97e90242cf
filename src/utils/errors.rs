//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.
//!
//! Los cinco errores de negocio (NotFound, InvalidRange, SlotConflict,
//! InvalidTransition, ReferentialConflict) son resultados esperados y
//! recuperables por el cliente; solo los fallos de almacenamiento se
//! tratan como errores genéricos.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Slot conflict: el vehículo ya tiene una reserva activa en el rango solicitado")]
    SlotConflict {
        /// Reserva con la que colisiona, si la detectó la comprobación
        /// explícita (la constraint de exclusión no la reporta).
        conflicting_rental: Option<Uuid>,
    },

    #[error("Invalid transition: acción '{action}' no permitida desde el estado '{current}'")]
    InvalidTransition { current: String, action: String },

    #[error("Referential conflict: {entity} tiene {references} referencias existentes")]
    ReferentialConflict { entity: String, references: i64 },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código de estado HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::InvalidRange(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotConflict { .. }
            | AppError::InvalidTransition { .. }
            | AppError::ReferentialConflict { .. } => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Database(e) => {
                eprintln!("Database error: {}", e);
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: Some(json!({ "sql_error": e.to_string() })),
                    code: Some("DB_ERROR".to_string()),
                }
            }

            AppError::Validation(e) => {
                eprintln!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: Some("VALIDATION_ERROR".to_string()),
                }
            }

            AppError::NotFound(msg) => {
                eprintln!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                }
            }

            AppError::InvalidRange(msg) => {
                eprintln!("Invalid date range: {}", msg);
                ErrorResponse {
                    error: "Invalid Range".to_string(),
                    message: msg,
                    details: None,
                    code: Some("INVALID_RANGE".to_string()),
                }
            }

            AppError::SlotConflict { conflicting_rental } => {
                eprintln!("Slot conflict: {:?}", conflicting_rental);
                ErrorResponse {
                    error: "Slot Conflict".to_string(),
                    message: "El vehículo ya tiene una reserva activa en el rango solicitado"
                        .to_string(),
                    details: conflicting_rental
                        .map(|id| json!({ "conflicting_rental": id.to_string() })),
                    code: Some("SLOT_CONFLICT".to_string()),
                }
            }

            AppError::InvalidTransition { current, action } => {
                eprintln!("Invalid transition: {} from {}", action, current);
                ErrorResponse {
                    error: "Invalid Transition".to_string(),
                    message: format!(
                        "Acción '{}' no permitida desde el estado '{}'",
                        action, current
                    ),
                    details: Some(json!({ "current_status": current, "action": action })),
                    code: Some("INVALID_TRANSITION".to_string()),
                }
            }

            AppError::ReferentialConflict { entity, references } => {
                eprintln!("Referential conflict: {} ({} refs)", entity, references);
                ErrorResponse {
                    error: "Referential Conflict".to_string(),
                    message: format!(
                        "No se puede eliminar {}: tiene {} referencias existentes",
                        entity, references
                    ),
                    details: Some(json!({ "entity": entity, "references": references })),
                    code: Some("REFERENTIAL_CONFLICT".to_string()),
                }
            }

            AppError::BadRequest(msg) => {
                eprintln!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                }
            }

            AppError::Internal(msg) => {
                eprintln!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code: Some("INTERNAL_ERROR".to_string()),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_map_to_expected_status() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidRange("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::SlotConflict { conflicting_rental: None }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidTransition {
                current: "finished".into(),
                action: "start".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::ReferentialConflict {
                entity: "customer".into(),
                references: 3
            }
            .status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_storage_errors_are_internal() {
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_helper_includes_context() {
        let err = not_found_error("Vehicle", "abc");
        match err {
            AppError::NotFound(msg) => {
                assert!(msg.contains("Vehicle"));
                assert!(msg.contains("abc"));
            }
            _ => panic!("expected NotFound"),
        }
    }
}
