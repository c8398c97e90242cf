pub mod customer_routes;
pub mod price_rule_routes;
pub mod rental_routes;
pub mod vehicle_routes;
