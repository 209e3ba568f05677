//! Firestore falso para pruebas de integración
//!
//! Servidor axum en 127.0.0.1:0 que imita la API REST: listado, lectura,
//! creación y `:runQuery` con filtro de igualdad, orden y límite.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use garage_gateway::config::environment::EnvironmentConfig;
use garage_gateway::{create_app, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::util::ServiceExt;

pub const READ_TIME: &str = "2024-06-01T12:00:00.000000Z";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StoreInner {
    /// coleccion -> lista de (id, fields)
    collections: HashMap<String, Vec<(String, Value)>>,
    /// respuestas crudas por ruta GET, tienen prioridad
    raw: HashMap<String, (u16, String)>,
    /// status de error forzado para `:runQuery` sobre una colección
    query_failures: HashMap<String, (u16, String)>,
    requests: Vec<RecordedRequest>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct FakeFirestore {
    inner: Arc<Mutex<StoreInner>>,
}

impl FakeFirestore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, id: &str, fields: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push((id.to_string(), fields));
    }

    pub fn set_raw(&self, path: &str, status: u16, body: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.raw.insert(path.to_string(), (status, body.to_string()));
    }

    pub fn fail_queries_on(&self, collection: &str, status: u16, body: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .query_failures
            .insert(collection.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn queries(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(":runQuery"))
            .filter_map(|r| r.body)
            .collect()
    }

    pub fn documents(&self, collection: &str) -> Vec<Value> {
        let inner = self.inner.lock().unwrap();
        inner
            .collections
            .get(collection)
            .map(|docs| docs.iter().map(|(_, f)| f.clone()).collect())
            .unwrap_or_default()
    }

    /// Levantar el servidor y devolver la URL base de documentos
    pub async fn serve(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/documents", addr)
    }
}

fn document_json(collection: &str, id: &str, fields: &Value) -> Value {
    json!({
        "name": format!("projects/test/databases/(default)/documents/{}/{}", collection, id),
        "fields": fields,
        "createTime": READ_TIME,
        "updateTime": READ_TIME
    })
}

fn json_response(status: u16, body: String) -> Response {
    (
        StatusCode::from_u16(status).unwrap(),
        [("content-type", "application/json")],
        body,
    )
        .into_response()
}

async fn handle(State(store): State<FakeFirestore>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let bytes = to_bytes(request.into_body(), usize::MAX).await.unwrap();
    let body: Option<Value> = serde_json::from_slice(&bytes).ok();

    store.inner.lock().unwrap().requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body: body.clone(),
    });

    if path.starts_with("/documents/slow") {
        tokio::time::sleep(Duration::from_secs(3)).await;
        return json_response(200, "{}".to_string());
    }

    let raw = store.inner.lock().unwrap().raw.get(&path).cloned();
    if let Some((status, raw)) = raw {
        return json_response(status, raw);
    }

    if method == Method::POST && path == "/documents:runQuery" {
        return run_query(&store, body.unwrap_or(Value::Null));
    }

    let segments: Vec<String> = path
        .trim_start_matches("/documents/")
        .split('/')
        .map(|s| urlencoding::decode(s).unwrap().into_owned())
        .collect();

    let mut inner = store.inner.lock().unwrap();
    match (method.as_str(), segments.as_slice()) {
        ("GET", [collection]) => {
            let docs: Vec<Value> = inner
                .collections
                .get(collection)
                .map(|docs| {
                    docs.iter()
                        .map(|(id, f)| document_json(collection, id, f))
                        .collect()
                })
                .unwrap_or_default();
            json_response(200, json!({ "documents": docs }).to_string())
        }
        ("GET", [collection, id]) => {
            let found = inner
                .collections
                .get(collection)
                .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
                .map(|(doc_id, f)| document_json(collection, doc_id, f));
            match found {
                Some(doc) => json_response(200, doc.to_string()),
                None => json_response(
                    404,
                    json!({"error": {
                        "code": 404,
                        "message": format!(
                            "Document \"projects/test/databases/(default)/documents/{}/{}\" \
                             not found. The requested entity was not found in the database; \
                             check the collection name and document identifier and try again \
                             later.",
                            collection, id
                        ),
                        "status": "NOT_FOUND"
                    }})
                    .to_string(),
                ),
            }
        }
        ("POST", [collection]) => {
            inner.next_id += 1;
            let id = format!("gen{}", inner.next_id);
            let fields = body
                .as_ref()
                .and_then(|b| b.get("fields"))
                .cloned()
                .unwrap_or_else(|| json!({}));
            inner
                .collections
                .entry(collection.clone())
                .or_default()
                .push((id.clone(), fields.clone()));
            json_response(200, document_json(collection, &id, &fields).to_string())
        }
        _ => json_response(404, String::new()),
    }
}

fn typed_as_string(typed: &Value) -> Option<String> {
    typed
        .as_object()?
        .values()
        .next()
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn run_query(store: &FakeFirestore, body: Value) -> Response {
    let query = &body["structuredQuery"];
    let collection = query["from"][0]["collectionId"].as_str().unwrap_or_default();

    let inner = store.inner.lock().unwrap();
    if let Some((status, raw)) = inner.query_failures.get(collection).cloned() {
        return json_response(status, raw);
    }

    let filter = &query["where"]["fieldFilter"];
    let field = filter["field"]["fieldPath"].as_str();
    let expected = typed_as_string(&filter["value"]);

    let mut matches: Vec<(String, Value)> = inner
        .collections
        .get(collection)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, fields)| match (field, &expected) {
            (Some(field), Some(expected)) => {
                typed_as_string(&fields[field]).as_deref() == Some(expected.as_str())
            }
            _ => true,
        })
        .collect();

    if let Some(order) = query["orderBy"].as_array().and_then(|o| o.first()) {
        let order_field = order["field"]["fieldPath"].as_str().unwrap_or_default().to_string();
        matches.sort_by_key(|(_, fields)| typed_as_string(&fields[&order_field]));
        if order["direction"] == "DESCENDING" {
            matches.reverse();
        }
    }

    if let Some(limit) = query["limit"].as_u64() {
        matches.truncate(limit as usize);
    }

    let results: Vec<Value> = if matches.is_empty() {
        vec![json!({ "readTime": READ_TIME })]
    } else {
        matches
            .iter()
            .map(|(id, fields)| {
                json!({
                    "document": document_json(collection, id, fields),
                    "readTime": READ_TIME
                })
            })
            .collect()
    };

    json_response(200, Value::Array(results).to_string())
}

/// App del gateway apuntando a `base_url`
pub fn gateway(base_url: &str, timeout: Duration) -> Router {
    let mut config = EnvironmentConfig::for_project("test");
    config.firestore_base_url = base_url.to_string();
    config.upstream_timeout = timeout;
    create_app(AppState::new(config).unwrap())
}

pub async fn gateway_for(store: &FakeFirestore) -> Router {
    let base_url = store.serve().await;
    gateway(&base_url, Duration::from_secs(10))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub fn status_fields(id_panne: &str, field: &str, code: &str, at: &str) -> Value {
    json!({
        "idPanne": {"stringValue": id_panne},
        field: {"stringValue": code},
        "dateHeure": {"timestampValue": at}
    })
}
