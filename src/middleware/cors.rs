//! Middleware de CORS
//!
//! El gateway acepta peticiones desde cualquier origen: el frontend del
//! garaje puede servirse desde cualquier dominio.

use tower_http::cors::CorsLayer;

/// Crear middleware de CORS sin restricción de origen
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
