mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Car Rental API - Motor de reservas y precios");
    info!("================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.init_schema().await {
        error!("❌ Error inicializando el esquema: {}", e);
        return Err(e);
    }

    let pool = db_connection.pool().clone();

    // Crear router de la API
    let env_config = EnvironmentConfig::default();
    let app_state = AppState::new(pool);

    // Sin orígenes configurados se usa el modo permisivo de desarrollo
    let cors = if env_config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(env_config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/customer", routes::customer_routes::create_customer_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/price-rule", routes::price_rule_routes::create_price_rule_router())
        .nest("/api/rental", routes::rental_routes::create_rental_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", env_config.host, env_config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Endpoints - Customer:");
    info!("   POST /api/customer - Crear cliente");
    info!("   GET  /api/customer - Listar clientes");
    info!("   GET  /api/customer/:id - Obtener cliente");
    info!("   DELETE /api/customer/:id - Eliminar cliente (guard referencial)");
    info!("   POST /api/customer/:id/details - Guardar datos 1:1 del cliente");
    info!("   GET  /api/customer/:id/details - Obtener datos del cliente");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle?only_available=true - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo (guard referencial)");
    info!("   GET  /api/vehicle/:id/availability - Preview de disponibilidad (consultivo)");
    info!("💰 Endpoints - PriceRule:");
    info!("   POST /api/price-rule - Crear regla estacional");
    info!("   GET  /api/price-rule?vehicle_id= - Listar reglas");
    info!("📝 Endpoints - Rental:");
    info!("   POST /api/rental - Crear reserva (atómica)");
    info!("   GET  /api/rental - Listar reservas");
    info!("   GET  /api/rental/quote - Cotización idempotente");
    info!("   GET  /api/rental/:id - Obtener reserva");
    info!("   POST /api/rental/:id/start - Iniciar alquiler");
    info!("   POST /api/rental/:id/finish - Finalizar alquiler");
    info!("   POST /api/rental/:id/cancel - Cancelar reserva");

    // Iniciar servidor
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "car-rental",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
