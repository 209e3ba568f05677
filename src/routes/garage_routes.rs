use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::clients::firestore_client::UpstreamBody;
use crate::controllers::garage_controller::{GarageController, MISSING_JSON_BODY};
use crate::dto::garage_dto::*;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_garage_router() -> Router<AppState> {
    Router::new()
        .route("/voitures", get(list_vehicles))
        .route("/voitures/:id/pannes", get(vehicle_faults))
        .route("/voitures/:id/complete", get(vehicle_complete))
        .route("/documents/*path", get(get_document))
        .route("/query", post(run_query))
        .route("/pannes", post(vehicle_faults_from_body))
        .route("/pannes/:id/details", get(fault_details))
        .route("/panneDetails", post(fault_details_from_body))
        .route("/panneTypes/:id", get(fault_type))
        .route("/pannes/:id/statut", post(mark_repaired))
        .route("/pannes/:id/statuts", get(fault_statuses))
        .route("/panneStatuts", post(create_status))
        .route("/pannes/:id/paiement", get(payment_status))
        .route("/pannes/:id/est-reparee", get(resolution))
}

/// Cuerpo JSON obligatorio: cualquier rechazo de axum se traduce al 400 fijo
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            log::debug!("🚫 Cuerpo JSON rechazado: {}", rejection);
            bad_request_error(MISSING_JSON_BODY)
        })
}

/// Parámetro de ruta: un rechazo (p. ej. UTF-8 inválido) sale con el envelope de error
fn path_param(param: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    param.map(|Path(value)| value).map_err(|rejection| {
        log::debug!("🚫 Parámetro de ruta rechazado: {}", rejection);
        AppError::BadRequest(rejection.body_text())
    })
}

async fn list_vehicles(State(state): State<AppState>) -> Result<UpstreamBody, AppError> {
    let controller = GarageController::new(&state);
    controller.list_vehicles().await
}

async fn get_document(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<UpstreamBody, AppError> {
    let path = path_param(path)?;
    let controller = GarageController::new(&state);
    controller.get_document(&path).await
}

async fn run_query(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<UpstreamBody, AppError> {
    let query = json_body(payload)?;
    let controller = GarageController::new(&state);
    controller.run_query(query).await
}

async fn vehicle_faults(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<UpstreamBody, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    controller.vehicle_faults(&id, None).await
}

async fn vehicle_faults_from_body(
    State(state): State<AppState>,
    payload: Result<Json<VehicleFaultsRequest>, JsonRejection>,
) -> Result<UpstreamBody, AppError> {
    let request = json_body(payload)?;
    let controller = GarageController::new(&state);
    controller.vehicle_faults_from_body(request).await
}

async fn fault_details(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<UpstreamBody, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    controller.fault_details(&id).await
}

async fn fault_details_from_body(
    State(state): State<AppState>,
    payload: Result<Json<FaultDetailsRequest>, JsonRejection>,
) -> Result<UpstreamBody, AppError> {
    let request = json_body(payload)?;
    let controller = GarageController::new(&state);
    controller.fault_details_from_body(request).await
}

async fn fault_type(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<UpstreamBody, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    controller.fault_type(&id).await
}

async fn mark_repaired(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<UpstreamBody, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    controller.mark_repaired(&id).await
}

async fn fault_statuses(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<UpstreamBody, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    controller.fault_statuses(&id).await
}

async fn create_status(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<UpstreamBody, AppError> {
    let document = json_body(payload)?;
    let controller = GarageController::new(&state);
    controller.create_status(document).await
}

async fn payment_status(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PaymentStatusResponse>, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    let response = controller.payment_status(&id).await?;
    Ok(Json(response))
}

async fn resolution(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ResolutionResponse>, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    let response = controller.resolution(&id).await?;
    Ok(Json(response))
}

async fn vehicle_complete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<VehicleCompleteResponse>, AppError> {
    let id = path_param(id)?;
    let controller = GarageController::new(&state);
    let response = controller.vehicle_complete(&id).await?;
    Ok(Json(response))
}
