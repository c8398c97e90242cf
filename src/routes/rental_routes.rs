use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rental_controller::RentalController;
use crate::dto::customer_dto::ApiResponse;
use crate::dto::rental_dto::{
    CreateRentalRequest, QuoteQuery, QuoteResponse, RentalListItem, RentalResponse,
    ReservationResponse,
};
use crate::models::RentalAction;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rental))
        .route("/", get(list_rentals))
        .route("/quote", get(quote_rental))
        .route("/:id", get(get_rental))
        .route("/:id/start", post(start_rental))
        .route("/:id/finish", post(finish_rental))
        .route("/:id/cancel", post(cancel_rental))
}

async fn create_rental(
    State(state): State<AppState>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.reserve(request).await?;
    Ok(Json(response))
}

async fn list_rentals(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalListItem>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RentalResponse>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

/// Cotización idempotente, sin efectos secundarios
async fn quote_rental(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.quote(query).await?;
    Ok(Json(response))
}

async fn start_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.apply_action(id, RentalAction::Start).await?;
    Ok(Json(response))
}

async fn finish_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.apply_action(id, RentalAction::Finish).await?;
    Ok(Json(response))
}

async fn cancel_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.apply_action(id, RentalAction::Cancel).await?;
    Ok(Json(response))
}
