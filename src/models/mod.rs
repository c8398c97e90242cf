//! Modelos de dominio
//!
//! Este módulo contiene los structs que mapean a las tablas de PostgreSQL
//! y los enums del ciclo de vida de las reservas.

pub mod customer;
pub mod price_rule;
pub mod rental;
pub mod vehicle;

pub use customer::*;
pub use price_rule::*;
pub use rental::*;
pub use vehicle::*;
