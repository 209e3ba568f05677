//! Colecciones Firestore del garaje
//!
//! Los documentos se manejan como JSON opaco; aquí solo viven los nombres
//! de colecciones y campos que el gateway necesita conocer.

use std::fmt;

/// Colecciones Firestore usadas por el gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Voitures,
    Pannes,
    PanneDetails,
    PanneTypes,
    PanneStatuts,
    PaiementStatuts,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Voitures => "voitures",
            Collection::Pannes => "pannes",
            Collection::PanneDetails => "panneDetails",
            Collection::PanneTypes => "panneTypes",
            Collection::PanneStatuts => "panneStatuts",
            Collection::PaiementStatuts => "paiementStatuts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nombres de campos referenciados en filtros y documentos
pub mod fields {
    pub const ID_VOITURE: &str = "idVoiture";
    pub const ID_PANNE: &str = "idPanne";
    pub const ID_STATUT_FOR_PANNE: &str = "idStatutForPanne";
    pub const ID_STATUT_FOR_PAIEMENT: &str = "idStatutForPaiement";
    pub const DATE_HEURE: &str = "dateHeure";
}

/// Código de estado de panne: reparada
pub const STATUT_PANNE_REPAREE: &str = "2";

/// Código de estado de pago: pagada
pub const STATUT_PAIEMENT_PAYE: &str = "3";

/// Límite de pannes devueltas por vehículo
pub const PANNES_LIMIT: u32 = 20;

/// Límite para detalles e historial de estados
pub const DETAILS_LIMIT: u32 = 10;
