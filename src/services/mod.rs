//! Services module
//!
//! Este módulo contiene la lógica de negocio del gateway: la derivación
//! de estados (pagada, reparada) a partir de los resultados de Firestore.

pub mod status_service;

pub use status_service::*;
