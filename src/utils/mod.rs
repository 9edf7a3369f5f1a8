//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! de formatos de la flota.

pub mod errors;
pub mod validation;
