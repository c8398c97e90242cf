use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::price_rule_controller::PriceRuleController;
use crate::dto::customer_dto::ApiResponse;
use crate::dto::price_rule_dto::{CreatePriceRuleRequest, ListPriceRulesQuery, PriceRuleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_price_rule_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_price_rule))
        .route("/", get(list_price_rules))
}

async fn create_price_rule(
    State(state): State<AppState>,
    Json(request): Json<CreatePriceRuleRequest>,
) -> Result<Json<ApiResponse<PriceRuleResponse>>, AppError> {
    let controller = PriceRuleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_price_rules(
    State(state): State<AppState>,
    Query(query): Query<ListPriceRulesQuery>,
) -> Result<Json<Vec<PriceRuleResponse>>, AppError> {
    let controller = PriceRuleController::new(state.pool.clone());
    let response = controller.list(query.vehicle_id).await?;
    Ok(Json(response))
}
