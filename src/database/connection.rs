//! Conexión a PostgreSQL e inicialización del esquema
//!
//! El esquema se crea al arrancar con CREATE TABLE IF NOT EXISTS. La
//! tabla rentals lleva una constraint de exclusión GiST sobre
//! (vehicle_id, daterange) restringida a estados activos: es el
//! respaldo a nivel de almacenamiento del invariante de no-solapamiento
//! que la transacción de reserva comprueba explícitamente.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Sentencias DDL ejecutadas en orden al arrancar
const CREATE_SQL: &[&str] = &[
    "CREATE EXTENSION IF NOT EXISTS btree_gist",
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id UUID PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customer_details (
        customer_id UUID PRIMARY KEY REFERENCES customers(id),
        street TEXT,
        postal_code TEXT,
        city TEXT,
        email TEXT,
        marketing_consent BOOLEAN NOT NULL DEFAULT FALSE,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id UUID PRIMARY KEY,
        brand TEXT NOT NULL,
        model TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        registration_plate TEXT NOT NULL,
        base_rate NUMERIC(10, 2) NOT NULL CHECK (base_rate > 0),
        availability TEXT NOT NULL DEFAULT 'available'
            CHECK (availability IN ('available', 'unavailable')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS price_rules (
        id UUID PRIMARY KEY,
        vehicle_id UUID NOT NULL REFERENCES vehicles(id),
        season TEXT NOT NULL,
        multiplier NUMERIC(6, 3) NOT NULL CHECK (multiplier > 0),
        valid_from DATE NOT NULL,
        valid_to DATE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CHECK (valid_from <= valid_to)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rentals (
        id UUID PRIMARY KEY,
        customer_id UUID NOT NULL REFERENCES customers(id),
        vehicle_id UUID NOT NULL REFERENCES vehicles(id),
        date_from DATE NOT NULL,
        date_to DATE NOT NULL,
        status TEXT NOT NULL
            CHECK (status IN ('reserved', 'started', 'finished', 'canceled')),
        daily_rate NUMERIC(10, 2) NOT NULL,
        total_cost NUMERIC(12, 2) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CHECK (date_from < date_to),
        CONSTRAINT rentals_no_overlap EXCLUDE USING gist (
            vehicle_id WITH =,
            daterange(date_from, date_to) WITH &&
        ) WHERE (status IN ('reserved', 'started'))
    )
    "#,
];

/// Conexión a la base de datos con su pool
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = config.create_pool().await?;
        Ok(Self { pool })
    }

    /// Conectar con la configuración por defecto (DATABASE_URL)
    pub async fn new_default() -> Result<Self> {
        Self::new(&DatabaseConfig::default()).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Crear el esquema si no existe
    pub async fn init_schema(&self) -> Result<()> {
        for sql in CREATE_SQL {
            sqlx::query(sql).execute(&self.pool).await?;
        }
        info!("📦 Esquema de base de datos inicializado");
        Ok(())
    }
}
