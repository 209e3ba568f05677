//! Sistema de manejo de errores
//!
//! Este módulo define los errores del gateway y su conversión a la
//! respuesta HTTP `{"error": {"code": <int>, "message": <string>}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Longitud máxima (en caracteres) del mensaje devuelto desde Firestore
pub const MAX_UPSTREAM_MESSAGE_CHARS: usize = 200;

const EMPTY_UPSTREAM_BODY: &str = "Pas de réponse";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream error {code}: {message}")]
    Upstream { code: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error de Firestore a partir del status y el cuerpo crudo de la respuesta
    pub fn upstream(code: u16, body: &str) -> Self {
        AppError::Upstream {
            code,
            message: truncate_upstream_message(body),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream { code, .. } => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Transport(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Upstream { message, .. } => message.clone(),
            AppError::Transport(msg) => format!("Erreur de connexion: {}", msg),
            AppError::BadRequest(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}

/// Cuerpo del envelope de error
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Upstream { code, message } => {
                log::warn!("⚠️ Firestore respondió {}: {}", code, message)
            }
            AppError::BadRequest(msg) => log::warn!("⚠️ Bad request: {}", msg),
            AppError::Transport(msg) => {
                log::error!("❌ Error de conexión con Firestore: {}", msg)
            }
            AppError::Internal(msg) => log::error!("❌ Internal error: {}", msg),
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: status.as_u16(),
                message: self.message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Recortar el cuerpo de Firestore a un mensaje de error presentable
pub fn truncate_upstream_message(body: &str) -> String {
    if body.is_empty() {
        return EMPTY_UPSTREAM_BODY.to_string();
    }
    body.chars().take(MAX_UPSTREAM_MESSAGE_CHARS).collect()
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_truncate_keeps_at_most_200_chars() {
        let long = "é".repeat(500);
        let message = truncate_upstream_message(&long);
        assert_eq!(message.chars().count(), MAX_UPSTREAM_MESSAGE_CHARS);
    }

    #[test]
    fn test_truncate_short_body_is_untouched() {
        assert_eq!(truncate_upstream_message("NOT_FOUND"), "NOT_FOUND");
    }

    #[test]
    fn test_empty_body_gets_placeholder() {
        assert_eq!(truncate_upstream_message(""), "Pas de réponse");
    }

    #[tokio::test]
    async fn test_upstream_error_keeps_status() {
        let response = AppError::upstream(404, r#"{"error":{"code":404}}"#).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 404);
        assert_eq!(body["error"]["message"], r#"{"error":{"code":404}}"#);
    }

    #[tokio::test]
    async fn test_transport_error_is_500() {
        let response = AppError::Transport("operation timed out".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 500);
        assert_eq!(
            body["error"]["message"],
            "Erreur de connexion: operation timed out"
        );
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let response = bad_request_error("No JSON data provided").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 400);
        assert_eq!(body["error"]["message"], "No JSON data provided");
    }
}
