//! Modelos del sistema
//!
//! Este módulo contiene las colecciones y constantes del dominio del garaje.

pub mod garage;

pub use garage::*;
