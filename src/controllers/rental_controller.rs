use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::customer_dto::ApiResponse;
use crate::dto::rental_dto::{
    CreateRentalRequest, QuoteQuery, QuoteResponse, RentalListItem, RentalResponse,
    ReservationResponse,
};
use crate::models::RentalAction;
use crate::repositories::rental_repository::RentalRepository;
use crate::services::pricing_service::PricingService;
use crate::services::reservation_service::ReservationService;
use crate::utils::errors::AppError;

pub struct RentalController {
    repository: RentalRepository,
    reservation_service: ReservationService,
    pricing_service: PricingService,
}

impl RentalController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RentalRepository::new(pool.clone()),
            reservation_service: ReservationService::new(pool.clone()),
            pricing_service: PricingService::new(pool),
        }
    }

    /// Crear una reserva. Toda la lógica (disponibilidad, precio,
    /// atomicidad) vive en el motor; aquí solo se mapea el resultado.
    pub async fn reserve(
        &self,
        request: CreateRentalRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let outcome = self
            .reservation_service
            .reserve(
                request.customer_id,
                request.vehicle_id,
                request.date_from,
                request.date_to,
            )
            .await?;

        let response = ReservationResponse {
            rental: outcome.rental.into(),
            season: outcome.quote.season,
            multiplier: outcome.quote.multiplier,
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RentalResponse, AppError> {
        let rental = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id '{}' not found", id)))?;

        Ok(rental.into())
    }

    pub async fn list(&self) -> Result<Vec<RentalListItem>, AppError> {
        let rentals = self.repository.list_with_names().await?;
        Ok(rentals.into_iter().map(RentalListItem::from).collect())
    }

    /// Cotización idempotente: no reserva nada, se puede llamar
    /// repetidamente
    pub async fn quote(&self, query: QuoteQuery) -> Result<QuoteResponse, AppError> {
        let quote = self
            .pricing_service
            .resolve(query.vehicle_id, query.date_from, query.date_to)
            .await?;

        Ok(QuoteResponse::from_quote(
            query.vehicle_id,
            query.date_from,
            query.date_to,
            quote,
        ))
    }

    pub async fn apply_action(
        &self,
        rental_id: Uuid,
        action: RentalAction,
    ) -> Result<ApiResponse<RentalResponse>, AppError> {
        let rental = self
            .reservation_service
            .apply_action(rental_id, action)
            .await?;

        Ok(ApiResponse::success_with_message(
            rental.into(),
            format!("Acción '{}' aplicada", action.as_str()),
        ))
    }
}
