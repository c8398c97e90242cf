use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::customer_dto::ApiResponse;
use crate::dto::price_rule_dto::{CreatePriceRuleRequest, PriceRuleResponse};
use crate::repositories::price_rule_repository::PriceRuleRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_positive_decimal;

pub struct PriceRuleController {
    repository: PriceRuleRepository,
    vehicle_repository: VehicleRepository,
}

impl PriceRuleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PriceRuleRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreatePriceRuleRequest,
    ) -> Result<ApiResponse<PriceRuleResponse>, AppError> {
        request.validate()?;

        validate_positive_decimal(&request.multiplier)
            .map_err(|_| AppError::BadRequest("El multiplicador debe ser positivo".to_string()))?;

        // La ventana de validez es inclusiva por ambos extremos
        if request.valid_from > request.valid_to {
            return Err(AppError::InvalidRange(format!(
                "valid_from ({}) no puede ser posterior a valid_to ({})",
                request.valid_from, request.valid_to
            )));
        }

        self.vehicle_repository
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Vehicle with id '{}' not found",
                    request.vehicle_id
                ))
            })?;

        let rule = self
            .repository
            .create(
                request.vehicle_id,
                request.season.trim().to_string(),
                request.multiplier,
                request.valid_from,
                request.valid_to,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            rule.into(),
            "Regla de precio creada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, vehicle_id: Option<Uuid>) -> Result<Vec<PriceRuleResponse>, AppError> {
        let rules = self.repository.list(vehicle_id).await?;
        Ok(rules.into_iter().map(PriceRuleResponse::from).collect())
    }
}
