use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::guard_delete;
use crate::dto::customer_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    AvailabilityQuery, AvailabilityResponse, CreateVehicleRequest, OccupiedRange, VehicleResponse,
};
use crate::models::AVAILABILITY_VALUES;
use crate::repositories::price_rule_repository::PriceRuleRepository;
use crate::repositories::rental_repository::RentalRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::AvailabilityService;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_enum, validate_positive_decimal};

pub struct VehicleController {
    repository: VehicleRepository,
    rental_repository: RentalRepository,
    price_rule_repository: PriceRuleRepository,
    availability_service: AvailabilityService,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            rental_repository: RentalRepository::new(pool.clone()),
            price_rule_repository: PriceRuleRepository::new(pool.clone()),
            availability_service: AvailabilityService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        validate_positive_decimal(&request.base_rate)
            .map_err(|_| AppError::BadRequest("La tarifa base debe ser positiva".to_string()))?;

        let availability = request
            .availability
            .unwrap_or_else(|| "available".to_string());
        validate_enum(&availability, &AVAILABILITY_VALUES).map_err(|_| {
            AppError::BadRequest(format!(
                "Disponibilidad inválida '{}': se espera available/unavailable",
                availability
            ))
        })?;

        let vehicle = self
            .repository
            .create(
                request.brand.trim().to_string(),
                request.model.trim().to_string(),
                request.vehicle_type.trim().to_string(),
                request.registration_plate.trim().to_string(),
                request.base_rate,
                availability,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, only_available: bool) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list(only_available).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    /// Borrar un vehículo. Guard referencial: se rechaza si lo
    /// referencia alguna reserva (cualquier estado) o alguna regla de
    /// precio.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        let rental_refs = self.rental_repository.count_by_vehicle(id).await?;
        let rule_refs = self.price_rule_repository.count_by_vehicle(id).await?;
        guard_delete(&format!("vehicle '{}'", id), rental_refs + rule_refs)?;

        self.repository.delete(id).await
    }

    /// Preview consultivo de disponibilidad: mismo predicado que la
    /// puerta autoritativa, pero sobre un snapshot sin bloqueo. No
    /// reserva nada y puede quedar obsoleto frente a escrituras
    /// concurrentes.
    pub async fn availability(
        &self,
        vehicle_id: Uuid,
        query: AvailabilityQuery,
    ) -> Result<AvailabilityResponse, AppError> {
        let snapshot = self
            .availability_service
            .preview(vehicle_id, query.date_from, query.date_to)
            .await?;

        let occupied = snapshot
            .visible_rentals
            .into_iter()
            .map(|r| OccupiedRange {
                rental_id: r.id,
                date_from: r.date_from,
                date_to: r.date_to,
                status: r.status,
            })
            .collect();

        Ok(AvailabilityResponse {
            vehicle_id,
            date_from: query.date_from,
            date_to: query.date_to,
            available: snapshot.available,
            occupied,
        })
    }
}
