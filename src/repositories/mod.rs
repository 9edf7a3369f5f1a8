//! Repositorios
//!
//! Dueños del estado de la aplicación.

pub mod vehicle_repository;

pub use vehicle_repository::VehicleRepository;
