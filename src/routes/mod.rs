pub mod fleet_routes;
pub mod vehicle_routes;
