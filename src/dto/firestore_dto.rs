//! Tipos de la API REST de Firestore
//!
//! Consultas estructuradas (`:runQuery`) y valores tipados
//! (`stringValue`, `timestampValue`, ...) tal como los espera Firestore.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Valor tipado de Firestore
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FirestoreValue {
    #[serde(rename = "stringValue")]
    String(String),
    /// Firestore serializa los enteros como string decimal
    #[serde(rename = "integerValue")]
    Integer(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "timestampValue")]
    Timestamp(String),
    #[serde(rename = "nullValue")]
    Null(()),
}

impl FirestoreValue {
    pub fn string(value: impl Into<String>) -> Self {
        FirestoreValue::String(value.into())
    }

    pub fn integer(value: i64) -> Self {
        FirestoreValue::Integer(value.to_string())
    }

    /// Timestamp RFC 3339 en UTC con `Z` final
    pub fn timestamp(at: DateTime<Utc>) -> Self {
        FirestoreValue::Timestamp(at.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn now() -> Self {
        Self::timestamp(Utc::now())
    }
}

/// Cuerpo de creación de documento: `{"fields": {...}}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentFields {
    pub fields: BTreeMap<String, FirestoreValue>,
}

impl DocumentFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FirestoreValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldOperator {
    Equal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: FieldOperator,
    pub value: FirestoreValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompositeOperator {
    And,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeFilter {
    pub op: CompositeOperator,
    pub filters: Vec<Filter>,
}

/// Cláusula `where`
#[derive(Debug, Clone, Serialize)]
pub enum Filter {
    #[serde(rename = "fieldFilter")]
    Field(FieldFilter),
    #[serde(rename = "compositeFilter")]
    Composite(CompositeFilter),
}

impl Filter {
    pub fn equals(field: &str, value: FirestoreValue) -> Self {
        Filter::Field(FieldFilter {
            field: FieldReference {
                field_path: field.to_string(),
            },
            op: FieldOperator::Equal,
            value,
        })
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::Composite(CompositeFilter {
            op: CompositeOperator::And,
            filters,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl StructuredQuery {
    pub fn from_collection(collection: &str) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection.to_string(),
            }],
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// `SELECT * FROM collection WHERE field == value`
    pub fn field_equals(collection: &str, field: &str, value: &str) -> Self {
        Self::from_collection(collection)
            .filter(Filter::equals(field, FirestoreValue::string(value)))
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by.push(Order {
            field: FieldReference {
                field_path: field.to_string(),
            },
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Envolver en el cuerpo que espera `:runQuery`
    pub fn into_request(self) -> RunQueryRequest {
        RunQueryRequest {
            structured_query: self,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}
