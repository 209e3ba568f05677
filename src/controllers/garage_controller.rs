use axum::http::StatusCode;
use serde_json::Value;

use crate::clients::firestore_client::{FirestoreClient, UpstreamBody};
use crate::dto::firestore_dto::{Direction, DocumentFields, FirestoreValue, StructuredQuery};
use crate::dto::garage_dto::*;
use crate::models::garage::{fields, Collection, DETAILS_LIMIT, PANNES_LIMIT, STATUT_PANNE_REPAREE};
use crate::services::status_service;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Mensaje fijo para cuerpos ausentes, vacíos o mal formados
pub const MISSING_JSON_BODY: &str = "No JSON data provided";

pub struct GarageController {
    firestore: FirestoreClient,
}

impl GarageController {
    pub fn new(state: &AppState) -> Self {
        Self {
            firestore: state.firestore.clone(),
        }
    }

    pub async fn list_vehicles(&self) -> Result<UpstreamBody, AppError> {
        log::info!("🚗 Listando voitures");
        self.firestore
            .list_documents(Collection::Voitures.as_str())
            .await
    }

    pub async fn get_document(&self, path: &str) -> Result<UpstreamBody, AppError> {
        log::info!("📄 Obteniendo documento: {}", path);
        if path.trim_matches('/').is_empty() {
            return Err(bad_request_error("Document path is required"));
        }
        self.firestore.get_document_path(path).await
    }

    /// Reenviar una consulta estructurada tal cual la envió el cliente
    pub async fn run_query(&self, query: Value) -> Result<UpstreamBody, AppError> {
        require_object(&query)?;
        log::info!("🔍 Ejecutando consulta estructurada del cliente");
        self.firestore.run_raw_query(&query).await
    }

    pub async fn vehicle_faults(
        &self,
        id_voiture: &str,
        limit: Option<u32>,
    ) -> Result<UpstreamBody, AppError> {
        log::info!("🔧 Pannes del vehículo {}", id_voiture);
        let mut query = StructuredQuery::field_equals(
            Collection::Pannes.as_str(),
            fields::ID_VOITURE,
            id_voiture,
        );
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.firestore.run_query(&query.into_request()).await
    }

    pub async fn vehicle_faults_from_body(
        &self,
        request: VehicleFaultsRequest,
    ) -> Result<UpstreamBody, AppError> {
        let id_voiture = required_id(request.id_voiture, fields::ID_VOITURE)?;
        self.vehicle_faults(&id_voiture, Some(PANNES_LIMIT)).await
    }

    pub async fn fault_details(&self, id_panne: &str) -> Result<UpstreamBody, AppError> {
        log::info!("🔎 Detalles de la panne {}", id_panne);
        let query = StructuredQuery::field_equals(
            Collection::PanneDetails.as_str(),
            fields::ID_PANNE,
            id_panne,
        )
        .limit(DETAILS_LIMIT);
        self.firestore.run_query(&query.into_request()).await
    }

    pub async fn fault_details_from_body(
        &self,
        request: FaultDetailsRequest,
    ) -> Result<UpstreamBody, AppError> {
        let id_panne = required_id(request.id_panne, fields::ID_PANNE)?;
        self.fault_details(&id_panne).await
    }

    pub async fn fault_type(&self, id: &str) -> Result<UpstreamBody, AppError> {
        log::info!("🏷️ Tipo de panne {}", id);
        self.firestore
            .get_document(Collection::PanneTypes.as_str(), id)
            .await
    }

    /// Historial de estados, del más reciente al más antiguo
    pub async fn fault_statuses(&self, id_panne: &str) -> Result<UpstreamBody, AppError> {
        log::info!("📜 Historial de estados de la panne {}", id_panne);
        let query = StructuredQuery::field_equals(
            Collection::PanneStatuts.as_str(),
            fields::ID_PANNE,
            id_panne,
        )
        .order_by(fields::DATE_HEURE, Direction::Descending)
        .limit(DETAILS_LIMIT);
        self.firestore.run_query(&query.into_request()).await
    }

    /// Registrar la panne como reparada con la hora actual del servidor
    pub async fn mark_repaired(&self, id_panne: &str) -> Result<UpstreamBody, AppError> {
        log::info!("🛠️ Marcando panne {} como reparada", id_panne);
        let document = DocumentFields::new()
            .with(fields::ID_PANNE, FirestoreValue::string(id_panne))
            .with(
                fields::ID_STATUT_FOR_PANNE,
                FirestoreValue::string(STATUT_PANNE_REPAREE),
            )
            .with(fields::DATE_HEURE, FirestoreValue::now());

        let created = self
            .firestore
            .create_document(Collection::PanneStatuts.as_str(), &document)
            .await?;
        Ok(created.with_status(StatusCode::CREATED))
    }

    /// Crear un documento de estado con el cuerpo recibido, sin modificarlo
    pub async fn create_status(&self, document: Value) -> Result<UpstreamBody, AppError> {
        require_object(&document)?;
        log::info!("📝 Creando documento en panneStatuts");
        let created = self
            .firestore
            .create_raw_document(Collection::PanneStatuts.as_str(), &document)
            .await?;
        Ok(created.with_status(StatusCode::CREATED))
    }

    pub async fn payment_status(&self, id_panne: &str) -> Result<PaymentStatusResponse, AppError> {
        log::info!("💶 Estado de pago de la panne {}", id_panne);
        let latest = self.latest_status(Collection::PaiementStatuts, id_panne).await?;
        let paid = status_service::is_paid(latest.as_ref());

        Ok(PaymentStatusResponse {
            id_panne: id_panne.to_string(),
            paid,
            statut: latest,
        })
    }

    /// Pagada implica resuelta; si no, se consulta el último estado de reparación
    pub async fn resolution(&self, id_panne: &str) -> Result<ResolutionResponse, AppError> {
        log::info!("✅ Verificando si la panne {} está resuelta", id_panne);

        let payment = self.latest_status(Collection::PaiementStatuts, id_panne).await?;
        if status_service::is_paid(payment.as_ref()) {
            return Ok(ResolutionResponse::resolved(ResolutionReason::Paid));
        }

        let status = self.latest_status(Collection::PanneStatuts, id_panne).await?;
        if status_service::is_repaired(status.as_ref()) {
            return Ok(ResolutionResponse::resolved(ResolutionReason::Repaired));
        }

        Ok(ResolutionResponse::unresolved())
    }

    /// Vehículo y sus pannes; un fallo del vehículo corta antes de consultar pannes
    pub async fn vehicle_complete(
        &self,
        id_voiture: &str,
    ) -> Result<VehicleCompleteResponse, AppError> {
        log::info!("🚙 Ficha completa del vehículo {}", id_voiture);

        let voiture = self
            .firestore
            .get_document(Collection::Voitures.as_str(), id_voiture)
            .await?
            .json()?;

        let pannes = self.vehicle_faults(id_voiture, None).await?.json()?;
        let pannes: Vec<Value> = status_service::matched_documents(&pannes)
            .into_iter()
            .cloned()
            .collect();

        Ok(VehicleCompleteResponse { voiture, pannes })
    }

    /// Documento más reciente de una colección de estados (`dateHeure` DESC, límite 1).
    /// En empate de `dateHeure` decide el orden de Firestore.
    async fn latest_status(
        &self,
        collection: Collection,
        id_panne: &str,
    ) -> Result<Option<Value>, AppError> {
        let query = StructuredQuery::field_equals(collection.as_str(), fields::ID_PANNE, id_panne)
            .order_by(fields::DATE_HEURE, Direction::Descending)
            .limit(1);

        let results = self.firestore.run_query(&query.into_request()).await?.json()?;
        Ok(status_service::first_document(&results).cloned())
    }
}

fn require_object(body: &Value) -> Result<(), AppError> {
    match body.as_object() {
        Some(map) if !map.is_empty() => Ok(()),
        _ => Err(bad_request_error(MISSING_JSON_BODY)),
    }
}

fn required_id(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(AppError::BadRequest(format!("{} is required", field))),
    }
}
