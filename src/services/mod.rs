//! Services module
//!
//! Este módulo contiene la lógica de negocio del motor de reservas y
//! precios: el predicado de solapamiento compartido, el resolver de
//! precios estacionales y el motor de reservas con su máquina de estados.

pub mod availability_service;
pub mod pricing_service;
pub mod reservation_service;

pub use availability_service::*;
pub use pricing_service::*;
pub use reservation_service::*;
