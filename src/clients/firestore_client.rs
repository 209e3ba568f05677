//! Cliente HTTP para la API REST de Firestore
//!
//! Único punto del gateway que habla con Firestore. Toda respuesta distinta
//! de 200 se convierte en `AppError::Upstream`; timeouts y errores de red
//! en `AppError::Transport`.

use anyhow::Result;
use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::dto::firestore_dto::{DocumentFields, RunQueryRequest};
use crate::utils::errors::{AppError, AppResult};

/// Respuesta 200 de Firestore, cuerpo intacto
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamBody {
    /// Parsear el cuerpo como JSON
    pub fn json(&self) -> AppResult<Value> {
        serde_json::from_slice(&self.body).map_err(|e| {
            AppError::Internal(format!("Respuesta Firestore no es JSON válido: {}", e))
        })
    }

    /// Reenviar el cuerpo con otro status (p. ej. 201 en creaciones)
    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }
}

impl IntoResponse for UpstreamBody {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.body,
        )
            .into_response()
    }
}

/// Cliente HTTP para Firestore
#[derive(Clone)]
pub struct FirestoreClient {
    client: Client,
    base_url: String,
}

impl FirestoreClient {
    /// Crear nuevo cliente con timeout acotado por petición
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/{collection}`
    pub async fn list_documents(&self, collection: &str) -> AppResult<UpstreamBody> {
        let url = format!("{}/{}", self.base_url, encode_segment(collection)?);
        self.send(self.client.get(&url), &url).await
    }

    /// `GET {base}/{collection}/{id}`
    pub async fn get_document(&self, collection: &str, id: &str) -> AppResult<UpstreamBody> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            encode_segment(collection)?,
            encode_segment(id)?
        );
        self.send(self.client.get(&url), &url).await
    }

    /// `GET {base}/{path}` para rutas arbitrarias `coleccion/id[/subcoleccion/id...]`
    pub async fn get_document_path(&self, path: &str) -> AppResult<UpstreamBody> {
        let url = format!("{}/{}", self.base_url, encode_path(path)?);
        self.send(self.client.get(&url), &url).await
    }

    /// `POST {base}/{collection}` con campos tipados
    pub async fn create_document(
        &self,
        collection: &str,
        fields: &DocumentFields,
    ) -> AppResult<UpstreamBody> {
        self.create_raw_document(collection, fields).await
    }

    /// `POST {base}/{collection}` con un cuerpo ya en formato Firestore
    pub async fn create_raw_document<B: Serialize + ?Sized>(
        &self,
        collection: &str,
        body: &B,
    ) -> AppResult<UpstreamBody> {
        let url = format!("{}/{}", self.base_url, encode_segment(collection)?);
        self.send(self.client.post(&url).json(body), &url).await
    }

    /// `POST {base}:runQuery` con una consulta construida localmente
    pub async fn run_query(&self, query: &RunQueryRequest) -> AppResult<UpstreamBody> {
        self.run_raw_query(query).await
    }

    /// `POST {base}:runQuery` con un cuerpo arbitrario del cliente
    pub async fn run_raw_query<B: Serialize + ?Sized>(&self, body: &B) -> AppResult<UpstreamBody> {
        let url = format!("{}:runQuery", self.base_url);
        self.send(self.client.post(&url).json(body), &url).await
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> AppResult<UpstreamBody> {
        tracing::debug!("🌐 Firestore request: {}", url);

        let response = request
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_ENCODING, "identity")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            let text = String::from_utf8_lossy(&body);
            tracing::warn!("❌ Firestore {} -> {}", url, status);
            return Err(AppError::upstream(status.as_u16(), &text));
        }

        tracing::debug!("✅ Firestore {} -> {} ({} bytes)", url, status, body.len());
        Ok(UpstreamBody { status, body })
    }
}

/// Codificar un identificador como un único segmento de ruta.
/// `.` y `..` se rechazan: el parser de URL los resolvería como navegación.
fn encode_segment(segment: &str) -> AppResult<String> {
    if segment == "." || segment == ".." {
        return Err(AppError::BadRequest(format!(
            "Invalid path segment: {}",
            segment
        )));
    }
    Ok(urlencoding::encode(segment).into_owned())
}

/// Codificar cada segmento de una ruta manteniendo los separadores `/`
fn encode_path(path: &str) -> AppResult<String> {
    let segments = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(encode_segment)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(segments.join("/"))
}
