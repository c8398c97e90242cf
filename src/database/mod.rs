//! Módulo de base de datos
//!
//! Maneja la conexión y la inicialización del esquema en PostgreSQL

pub mod connection;

pub use connection::DatabaseConnection;
