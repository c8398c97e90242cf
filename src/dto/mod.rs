//! DTOs de la API
//!
//! Requests y responses JSON por entidad, con validación declarativa
//! en la frontera antes de llegar al motor.

pub mod customer_dto;
pub mod price_rule_dto;
pub mod rental_dto;
pub mod vehicle_dto;
