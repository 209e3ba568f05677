//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado mutable entre peticiones.

use anyhow::Result;

use crate::clients::firestore_client::FirestoreClient;
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub firestore: FirestoreClient,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Result<Self> {
        let firestore =
            FirestoreClient::new(config.firestore_base_url.clone(), config.upstream_timeout)?;
        Ok(Self { config, firestore })
    }
}
