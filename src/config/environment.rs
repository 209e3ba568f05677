//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: modo de ejecución,
//! dirección de escucha y datos del proyecto Firestore.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Proyecto Firestore usado cuando `FIRESTORE_PROJECT` no está definido
pub const DEFAULT_FIRESTORE_PROJECT: &str = "garrageapp-05";

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub firestore_project: String,
    /// URL base de documentos: `.../projects/{id}/databases/(default)/documents`
    pub firestore_base_url: String,
    pub upstream_timeout: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::for_project(DEFAULT_FIRESTORE_PROJECT)
    }
}

impl EnvironmentConfig {
    /// Configuración de desarrollo apuntando al proyecto indicado
    pub fn for_project(project: &str) -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            firestore_project: project.to_string(),
            firestore_base_url: firestore_documents_url(project),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }

    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => 3000,
        };

        let firestore_project = lookup("FIRESTORE_PROJECT")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FIRESTORE_PROJECT.to_string());

        let firestore_base_url = lookup("FIRESTORE_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| firestore_documents_url(&firestore_project));

        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("UPSTREAM_TIMEOUT_SECS must be a valid number, got '{}'", raw)
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            environment,
            port,
            host,
            firestore_project,
            firestore_base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn firestore_documents_url(project: &str) -> String {
    format!(
        "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
        project
    )
}
