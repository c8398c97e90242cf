//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad con queries sqlx. Las queries que
//! participan en la sección crítica de la reserva aceptan un executor
//! genérico para poder ejecutarse dentro de la transacción del motor.

pub mod customer_repository;
pub mod price_rule_repository;
pub mod rental_repository;
pub mod vehicle_repository;
