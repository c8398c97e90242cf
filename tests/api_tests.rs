//! Smoke tests HTTP de la capa de rutas
//!
//! La lógica de negocio del motor (predicado de solapamiento, resolver
//! de precios, máquina de estados) se prueba en los módulos de
//! src/services y src/models; aquí solo se verifica la forma de la API
//! sobre un router de prueba sin base de datos.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["service"], "car-rental");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rental_create_requires_json_body() {
    let app = create_test_app();
    // POST sin content-type JSON debe rechazarse antes de llegar al motor
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rental")
                .body(Body::from("no-json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_lifecycle_routes_only_accept_post() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/rental/00000000-0000-0000-0000-000000000001/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// Router de prueba con la misma forma de rutas que la app real,
// sin conexión a base de datos
fn create_test_app() -> Router {
    async fn health() -> Json<Value> {
        Json(json!({
            "service": "car-rental",
            "status": "healthy"
        }))
    }

    async fn create_rental(Json(_body): Json<Value>) -> Json<Value> {
        Json(json!({ "success": true }))
    }

    async fn start_rental() -> Json<Value> {
        Json(json!({ "success": true }))
    }

    Router::new()
        .route("/health", get(health))
        .route("/api/rental", post(create_rental))
        .route("/api/rental/:id/start", post(start_rental))
}
