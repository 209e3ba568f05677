pub mod garage_routes;
pub mod index_routes;

use axum::Router;
use tower::ServiceBuilder;

use crate::middleware::{cors_middleware, trace_middleware};
use crate::state::AppState;

/// Router completo del gateway con CORS y trazas
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(index_routes::create_index_router())
        .merge(garage_routes::create_garage_router())
        .layer(
            ServiceBuilder::new()
                .layer(trace_middleware())
                .layer(cors_middleware()),
        )
        .with_state(state)
}
