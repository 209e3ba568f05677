use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request para listar las pannes de un vehículo
#[derive(Debug, Deserialize)]
pub struct VehicleFaultsRequest {
    #[serde(rename = "idVoiture")]
    pub id_voiture: Option<String>,
}

// Request para obtener los detalles de una panne
#[derive(Debug, Deserialize)]
pub struct FaultDetailsRequest {
    #[serde(rename = "idPanne")]
    pub id_panne: Option<String>,
}

// Response del estado de pago
#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    #[serde(rename = "idPanne")]
    pub id_panne: String,
    pub paid: bool,
    /// Documento de estado más reciente, `null` si no existe ninguno
    pub statut: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionReason {
    Paid,
    Repaired,
}

// Response de la verificación "panne resuelta"
#[derive(Debug, Serialize)]
pub struct ResolutionResponse {
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ResolutionReason>,
}

impl ResolutionResponse {
    pub fn resolved(reason: ResolutionReason) -> Self {
        Self {
            resolved: true,
            reason: Some(reason),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            resolved: false,
            reason: None,
        }
    }
}

// Response combinada vehículo + pannes
#[derive(Debug, Serialize)]
pub struct VehicleCompleteResponse {
    pub voiture: Value,
    pub pannes: Vec<Value>,
}
