use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_index_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}

/// Descripción estática del servicio y sus endpoints
async fn index() -> Json<Value> {
    Json(json!({
        "message": "API Garage",
        "endpoints": {
            "/voitures": "GET - Liste toutes les voitures",
            "/voitures/<id>/pannes": "GET - Pannes d'une voiture",
            "/voitures/<id>/complete": "GET - Voiture avec ses pannes",
            "/documents/<path>": "GET - Récupère un document",
            "/query": "POST - Exécute une requête Firestore",
            "/pannes": "POST - Pannes d'une voiture (idVoiture dans le corps)",
            "/pannes/<id>/details": "GET - Détails d'une panne",
            "/panneDetails": "POST - Détails d'une panne (idPanne dans le corps)",
            "/panneTypes/<id>": "GET - Type de panne",
            "/pannes/<id>/statut": "POST - Marque la panne comme réparée",
            "/pannes/<id>/statuts": "GET - Historique des statuts",
            "/panneStatuts": "POST - Crée un document de statut",
            "/pannes/<id>/paiement": "GET - Statut de paiement",
            "/pannes/<id>/est-reparee": "GET - Panne résolue ?",
            "/health": "GET - Health check"
        },
        "status": "online"
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "garage-gateway",
        "project": state.config.firestore_project,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
