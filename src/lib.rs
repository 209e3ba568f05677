//! Garage Gateway
//!
//! Proxy HTTP entre la aplicación de gestión del garaje y la API REST de
//! Firestore.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
