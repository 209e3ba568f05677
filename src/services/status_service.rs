//! Derivación de estados de pannes
//!
//! Funciones puras sobre el resultado de `:runQuery`. Firestore devuelve un
//! array donde cada elemento trae una clave `document` o es un marcador vacío
//! (p. ej. `{"readTime": ...}` cuando no hay coincidencias). Solo los
//! elementos con `document` cuentan como resultados.

use serde_json::Value;

use crate::models::garage::{fields, STATUT_PAIEMENT_PAYE, STATUT_PANNE_REPAREE};

/// Documentos que coinciden con la consulta, en el orden devuelto por Firestore
pub fn matched_documents(results: &Value) -> Vec<&Value> {
    results
        .as_array()
        .map(|items| items.iter().filter_map(|item| item.get("document")).collect())
        .unwrap_or_default()
}

/// Primer documento del resultado (el más reciente si la consulta ordena DESC)
pub fn first_document(results: &Value) -> Option<&Value> {
    matched_documents(results).into_iter().next()
}

/// Valor de un campo como string, aceptando `stringValue` o `integerValue`
pub fn field_as_string<'a>(document: &'a Value, field: &str) -> Option<&'a str> {
    let typed = document.get("fields")?.get(field)?;
    typed
        .get("stringValue")
        .or_else(|| typed.get("integerValue"))
        .and_then(Value::as_str)
}

/// Una panne está pagada si su último estado de pago vale `"3"`
pub fn is_paid(latest_payment: Option<&Value>) -> bool {
    latest_payment
        .and_then(|doc| field_as_string(doc, fields::ID_STATUT_FOR_PAIEMENT))
        .map(|code| code == STATUT_PAIEMENT_PAYE)
        .unwrap_or(false)
}

/// Una panne está reparada si su último estado vale `"2"`
pub fn is_repaired(latest_status: Option<&Value>) -> bool {
    latest_status
        .and_then(|doc| field_as_string(doc, fields::ID_STATUT_FOR_PANNE))
        .map(|code| code == STATUT_PANNE_REPAREE)
        .unwrap_or(false)
}
