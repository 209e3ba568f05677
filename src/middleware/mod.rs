//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y el registro de peticiones.

pub mod cors;
pub mod trace;

pub use cors::*;
pub use trace::*;
