use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::customer_dto::{
    ApiResponse, CreateCustomerRequest, CustomerDetailsResponse, CustomerResponse,
    UpsertCustomerDetailsRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
        .route("/:id", delete(delete_customer))
        .route("/:id/details", post(upsert_customer_details))
        .route("/:id/details", get(get_customer_details))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente eliminado exitosamente"
    })))
}

async fn upsert_customer_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertCustomerDetailsRequest>,
) -> Result<Json<ApiResponse<CustomerDetailsResponse>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.upsert_details(id, request).await?;
    Ok(Json(response))
}

async fn get_customer_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDetailsResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.get_details(id).await?;
    Ok(Json(response))
}
